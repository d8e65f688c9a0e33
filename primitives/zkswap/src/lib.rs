//! zkswap-primitives
//!
//! Shared, `no_std`-friendly primitives for confidential atomic swaps over
//! twisted-ElGamal encrypted balances.
//! - Fixed generators `G`/`H`, ciphertexts and Pedersen commitments
//! - Proof data types and their stable byte layouts
//! - Canonical Merlin transcript labels + bind order for the shared challenge
//! - The sigma equations, so prover and verifier stay in lockstep
//!
//! Use this crate from BOTH:
//! - the prover library (std) and
//! - the verifier (`no_std` capable)
//!
//! Both sides MUST use the same generators and the same transcript labels.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use core::fmt;

use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};
use lazy_static::lazy_static;
use merlin::Transcript;
use sha2::Sha512;
use subtle::ConstantTimeEq;

pub mod codec;
pub mod elgamal;
pub mod range;
pub mod sigma;
pub mod transcript;
pub mod types;


pub use elgamal::{pedersen_commit, scalar_from_i64, token_generator, Ciphertext};
pub use range::verify_bit_proofs;
pub use transcript::{bit_challenge, range_transcript, swap_challenge};
pub use types::{
    BitProof, RangeProof, SigmaCommitments, SwapCommitment, SwapProof, SwapProofPart,
    SwapResponses, SwapSide, SwapStatement,
};

/// Blinding generator (Ristretto basepoint).
pub use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT as G;

/// 32-byte compressed Ristretto encoding.
pub type CompressedPoint = [u8; 32];

/// 32-byte scalar encoding (big-endian on the wire).
pub type ScalarBytes = [u8; 32];

/// Version/tag of this protocol instance. Bump on any incompatible change.
pub const SDK_VERSION: u32 = 1;

/// Bit width of the balance range proof: remaining balances live in `[0, 2^RANGE_BITS)`.
pub const RANGE_BITS: usize = 32;

/// Domain and label strings. KEEP STABLE.
pub mod labels {
    pub const PROTOCOL: &[u8] = b"zkswap";
    pub const PROTOCOL_V: &[u8] = b"zkswap/v1";
    pub const PEDERSEN_H: &[u8] = b"zkswap/PedersenH";

    // transcript sections
    pub const FIRST_LEG: &[u8] = b"first_leg";
    pub const SECOND_LEG: &[u8] = b"second_leg";
    pub const SECTION_RP: &[u8] = b"zkswap/range";

    // challenge labels
    pub const CHAL_SWAP: &[u8] = b"swap_chal";
    pub const CHAL_BIT: &[u8] = b"bit_chal";
}

lazy_static! {
    /// Value generator, independent of `G` (hash-to-point, nothing up the sleeve).
    pub static ref H: RistrettoPoint = RistrettoPoint::hash_from_bytes::<Sha512>(labels::PEDERSEN_H);
}

/// Error type shared by prover/verifier helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Bytes do not decode to a canonical point, scalar or tag.
    Malformed,
    /// Input has the wrong length for a fixed-size layout.
    Length { expected: usize, got: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Malformed => write!(f, "malformed input"),
            Error::Length { expected, got } => {
                write!(f, "wrong length: expected {expected} bytes, got {got}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Chain/domain tag bound into every swap challenge.
///
/// The verifier is parameterized by a provider so a proof made for one
/// network never verifies on another.
pub trait NetworkIdProvider {
    fn network_id() -> [u8; 32];
}

/// Verifies a bit-decomposition range proof against the aggregate commitment `T`.
pub trait RangeProofVerifier {
    fn verify_range_proof(commitment: &RistrettoPoint, proof: &RangeProof) -> Result<(), Error>;
}

/// Accept/reject verification of a complete two-party swap proof.
///
/// Rejection reasons are deliberately not surfaced to the caller.
pub trait SwapProofVerifier {
    fn verify_swap(proof: &SwapProof) -> bool;

    fn verify_swap_bytes(bytes: &[u8]) -> bool {
        match SwapProof::from_bytes(bytes) {
            Ok(proof) => Self::verify_swap(&proof),
            Err(e) => {
                log::debug!(target: "zkswap", "swap proof rejected: {e}");
                false
            }
        }
    }
}

/// ----- Merlin transcript helpers -----

/// Append a compressed Ristretto point under a label.
pub fn append_point(t: &mut Transcript, label: &'static [u8], p: &RistrettoPoint) {
    t.append_message(label, p.compress().as_bytes());
}

/// Derive a Fiat–Shamir challenge scalar from the transcript with a label.
pub fn challenge_scalar(t: &mut Transcript, label: &'static [u8]) -> Scalar {
    let mut buf = [0u8; 64];
    t.challenge_bytes(label, &mut buf);
    Scalar::from_bytes_mod_order_wide(&buf)
}

/// Constant-time equality on compressed points.
pub fn ct_eq_point(a: &RistrettoPoint, b: &RistrettoPoint) -> bool {
    a.compress()
        .as_bytes()
        .ct_eq(b.compress().as_bytes())
        .into()
}

/// ----- Encoding helpers (stable across prover/verifier) -----

/// Decode a compressed Ristretto point (32 bytes).
pub fn point_from_bytes(bytes: &CompressedPoint) -> Result<RistrettoPoint, Error> {
    CompressedRistretto(*bytes)
        .decompress()
        .ok_or(Error::Malformed)
}

/// Encode a point to 32 bytes (compressed).
pub fn point_to_bytes(p: &RistrettoPoint) -> CompressedPoint {
    *p.compress().as_bytes()
}

/// Decode a scalar from its canonical 32-byte big-endian encoding.
pub fn scalar_from_be_bytes(bytes: &ScalarBytes) -> Result<Scalar, Error> {
    let mut le = *bytes;
    le.reverse();
    Option::<Scalar>::from(Scalar::from_canonical_bytes(le)).ok_or(Error::Malformed)
}

/// Encode a scalar to 32 bytes, big-endian.
pub fn scalar_to_be_bytes(x: &Scalar) -> ScalarBytes {
    let mut out = x.to_bytes();
    out.reverse();
    out
}
