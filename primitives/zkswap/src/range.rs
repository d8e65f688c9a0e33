//! Bit-decomposition range check shared by the verifier and the initiator's
//! check of the counterparty's reply.

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};

use crate::{bit_challenge, range_transcript, Error, RangeProof, G, H, RANGE_BITS};

/// Check that `proof` opens `commitment` to a value in `[0, 2^RANGE_BITS)`.
///
/// Requires exactly `RANGE_BITS` bit commitments summing to `commitment`, each
/// with a valid OR proof that it commits to `0` or `2^i`.
pub fn verify_bit_proofs(commitment: &RistrettoPoint, proof: &RangeProof) -> Result<(), Error> {
    if proof.bits.len() != RANGE_BITS {
        return Err(Error::Length {
            expected: RANGE_BITS,
            got: proof.bits.len(),
        });
    }
    if proof.aggregate() != *commitment {
        return Err(Error::Malformed);
    }

    let base = range_transcript(commitment);
    for (i, bit) in proof.bits.iter().enumerate() {
        let weight = Scalar::from(1u64 << i) * *H;
        let r0 = bit.z0 * G - bit.c0 * bit.commitment;
        let r1 = bit.z1 * G - bit.c1 * (bit.commitment - weight);
        if bit.c0 + bit.c1 != bit_challenge(&base, i, &bit.commitment, &r0, &r1) {
            return Err(Error::Malformed);
        }
    }
    Ok(())
}
