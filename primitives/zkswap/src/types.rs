//! Proof data exchanged between the two parties and handed to the verifier.
//!
//! Amounts are from the owning party's point of view: `b_star_from` is what this
//! party sends, `b_star_to` what it receives. Token ids (and `ht1`/`ht2`) are
//! always in the initiator's order, in both parts.

use alloc::vec::Vec;

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};

use crate::Ciphertext;

/// Which leg of the swap a part belongs to. The fee is debited on the first leg only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapSide {
    First,
    Second,
}

impl SwapSide {
    pub fn to_byte(self) -> u8 {
        match self {
            SwapSide::First => 0,
            SwapSide::Second => 1,
        }
    }

    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(SwapSide::First),
            1 => Some(SwapSide::Second),
            _ => None,
        }
    }
}

/// Public statement of one party's leg.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapStatement {
    pub side: SwapSide,
    pub from_token_id: u32,
    pub to_token_id: u32,
    pub b_star_from: i64,
    pub b_star_to: i64,
    pub fee: i64,
    /// Randomness of the delta ciphertexts; public so the verifier can re-derive them.
    pub r_star: Scalar,
    pub pk: RistrettoPoint,
    pub receiver_pk: RistrettoPoint,
    /// Current balance of this party.
    pub c: Ciphertext,
    /// Outgoing delta under `pk`.
    pub c_star: Ciphertext,
    /// Counterparty's balance the delta is credited to.
    pub receiver_c: Ciphertext,
    /// Incoming delta under `receiver_pk`.
    pub receiver_c_star: Ciphertext,
    /// Commitment to the remaining balance, `rBar·G + bPrime·H`.
    pub t: RistrettoPoint,
    pub ht1: RistrettoPoint,
    pub ht2: RistrettoPoint,
    pub pt1: RistrettoPoint,
    pub pt2: RistrettoPoint,
    pub t_div_cr_prime: RistrettoPoint,
    pub cl_prime_inv: RistrettoPoint,
}

impl SwapStatement {
    /// Amount debited from this party's balance.
    pub fn delta(&self) -> Option<i64> {
        match self.side {
            SwapSide::First => self.b_star_from.checked_add(self.fee),
            SwapSide::Second => Some(self.b_star_from),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigmaCommitments {
    pub a_pk: RistrettoPoint,
    pub a_t_div_cr_prime: RistrettoPoint,
    pub a_pt1: RistrettoPoint,
    pub a_pt2: RistrettoPoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapResponses {
    pub z_rbar: Scalar,
    pub z_sk: Scalar,
    pub z_sk_inv: Scalar,
}

/// OR proof that `commitment` opens to `0` or `2^i` (with blinding over `G`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitProof {
    pub commitment: RistrettoPoint,
    pub c0: Scalar,
    pub c1: Scalar,
    pub z0: Scalar,
    pub z1: Scalar,
}

/// Bit decomposition of the remaining balance, least significant bit first.
/// Holds exactly [`crate::RANGE_BITS`] entries once decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeProof {
    pub bits: Vec<BitProof>,
}

impl RangeProof {
    /// `Σ Com_i`, which must equal `T`.
    pub fn aggregate(&self) -> RistrettoPoint {
        self.bits.iter().map(|b| b.commitment).sum()
    }
}

/// Everything one party publishes before the shared challenge exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapCommitment {
    pub statement: SwapStatement,
    pub commitments: SigmaCommitments,
    pub range_proof: RangeProof,
}

/// The transmittable half of one party's proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapProofPart {
    pub commitment: SwapCommitment,
    pub responses: SwapResponses,
}

/// Both legs of one swap under one Fiat–Shamir challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapProof {
    pub first: SwapProofPart,
    pub second: SwapProofPart,
    pub challenge: Scalar,
}
