//! Fiat–Shamir bindings.
//!
//! The swap challenge absorbs, in this order: protocol label, protocol version,
//! `SDK_VERSION` (big-endian), the 32-byte network id, the first leg's
//! commitment bytes and the second leg's commitment bytes (see [`crate::codec`]).

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use merlin::Transcript;

use crate::{append_point, challenge_scalar, labels, SwapCommitment, SDK_VERSION};

/// The one challenge both legs answer.
pub fn swap_challenge(
    network_id: &[u8; 32],
    first: &SwapCommitment,
    second: &SwapCommitment,
) -> Scalar {
    let mut t = Transcript::new(labels::PROTOCOL);
    t.append_message(b"proto", labels::PROTOCOL_V);
    t.append_message(b"sdk_version", &SDK_VERSION.to_be_bytes());
    t.append_message(b"network_id", network_id);
    t.append_message(labels::FIRST_LEG, &first.to_bytes());
    t.append_message(labels::SECOND_LEG, &second.to_bytes());
    challenge_scalar(&mut t, labels::CHAL_SWAP)
}

/// Base transcript for the range proof over `T`. Each bit forks it.
pub fn range_transcript(t_commitment: &RistrettoPoint) -> Transcript {
    let mut t = Transcript::new(labels::SECTION_RP);
    t.append_message(b"proto", labels::PROTOCOL_V);
    append_point(&mut t, b"T", t_commitment);
    t
}

/// Challenge for the OR proof of bit `index`, given both announcements.
pub fn bit_challenge(
    base: &Transcript,
    index: usize,
    commitment: &RistrettoPoint,
    r0: &RistrettoPoint,
    r1: &RistrettoPoint,
) -> Scalar {
    let mut t = base.clone();
    t.append_u64(b"bit", index as u64);
    append_point(&mut t, b"com", commitment);
    append_point(&mut t, b"r0", r0);
    append_point(&mut t, b"r1", r1);
    challenge_scalar(&mut t, labels::CHAL_BIT)
}
