//! Bit-decomposition range proof.
//!
//! `Com_i = rs_i·G + (bit_i·2^i)·H`, so `Σ Com_i = rBar·G + value·H = T` when
//! `rBar = Σ rs_i`. Each bit gets a CDS OR proof that `Com_i` or `Com_i - 2^i·H`
//! is a multiple of `G` with known discrete log; the branch that does not match
//! the bit is simulated.

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use merlin::Transcript;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use zkswap_primitives::{bit_challenge, range_transcript, BitProof, RangeProof, G, H, RANGE_BITS};

use crate::{random_scalar, ProverError};

/// Per-bit randomness, drawn up front so bits can be proven independently.
#[derive(Zeroize)]
struct BitNonces {
    k: Scalar,
    c_sim: Scalar,
    z_sim: Scalar,
}

/// Prove `value ∈ [0, 2^RANGE_BITS)` for `T = (Σ rs)·G + value·H`.
pub fn prove_range<R: RngCore + CryptoRng>(
    t: &RistrettoPoint,
    value: u64,
    rs: &[Scalar; RANGE_BITS],
    rng: &mut R,
) -> Result<RangeProof, ProverError> {
    if value >> RANGE_BITS != 0 {
        return Err(ProverError::OutOfRange);
    }
    Ok(prove_bits(t, value, rs, rng))
}

/// Proves the low `RANGE_BITS` bits of `value`; callers check the range.
pub(crate) fn prove_bits<R: RngCore + CryptoRng>(
    t: &RistrettoPoint,
    value: u64,
    rs: &[Scalar; RANGE_BITS],
    rng: &mut R,
) -> RangeProof {
    let base = range_transcript(t);
    let nonces: Vec<BitNonces> = (0..RANGE_BITS)
        .map(|_| BitNonces {
            k: random_scalar(rng),
            c_sim: random_scalar(rng),
            z_sim: random_scalar(rng),
        })
        .collect();

    let prove = |(i, mut n): (usize, BitNonces)| {
        let proof = prove_bit(&base, i, (value >> i) & 1 == 1, &rs[i], &n);
        n.zeroize();
        proof
    };

    #[cfg(feature = "parallel")]
    let bits = nonces.into_par_iter().enumerate().map(prove).collect();
    #[cfg(not(feature = "parallel"))]
    let bits = nonces.into_iter().enumerate().map(prove).collect();

    RangeProof { bits }
}

fn prove_bit(base: &Transcript, i: usize, bit: bool, blind: &Scalar, n: &BitNonces) -> BitProof {
    let weight = Scalar::from(1u64 << i) * *H;
    let commitment = blind * G + if bit { weight } else { RistrettoPoint::default() };
    // Y0 = Com (bit = 0), Y1 = Com - 2^i·H (bit = 1); both equal blind·G for the true branch
    let y0 = commitment;
    let y1 = commitment - weight;

    if bit {
        let (c0, z0) = (n.c_sim, n.z_sim);
        let r0 = z0 * G - c0 * y0;
        let r1 = n.k * G;
        let c = bit_challenge(base, i, &commitment, &r0, &r1);
        let c1 = c - c0;
        BitProof {
            commitment,
            c0,
            c1,
            z0,
            z1: n.k + c1 * blind,
        }
    } else {
        let (c1, z1) = (n.c_sim, n.z_sim);
        let r0 = n.k * G;
        let r1 = z1 * G - c1 * y1;
        let c = bit_challenge(base, i, &commitment, &r0, &r1);
        let c0 = c - c1;
        BitProof {
            commitment,
            c0,
            c1,
            z0: n.k + c0 * blind,
            z1,
        }
    }
}
