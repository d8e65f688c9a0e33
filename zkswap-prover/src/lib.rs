//! # zkswap-prover: Confidential Swap Proof Generation
//!
//! Client-side proving for a two-party confidential swap. Each party holds a
//! twisted-ElGamal balance per token; the swap moves `b_star_from` of the first
//! token from A to B and `b_star_to` of the second token from B to A, and the
//! two legs are bound under one Fiat–Shamir challenge so neither leg verifies
//! on its own.
//!
//! ## Session
//!
//! **Step 1 - Initiator commits:**
//! - [`SwapRelationPart::first`] validates A's balance and builds its statement
//! - [`commit_first`] produces a [`FirstLegSession`]; A publishes [`FirstLegSession::offer`]
//!
//! **Step 2 - Counterparty responds:**
//! - [`SwapRelationPart::second`] validates B's balance against A's offer
//! - [`respond_second`] computes the shared challenge and B's complete part
//!
//! **Step 3 - Initiator finalizes:**
//! - [`FirstLegSession::finalize`] checks B's part, answers the same challenge
//!   and returns the [`SwapProof`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zkswap_prover::*;
//!
//! let mut rng = rand::rng();
//! let relation_a = SwapRelationPart::first(&input_a, &mut rng)?;
//! let session = commit_first(relation_a, network_id, &mut rng)?;
//!
//! // ... offer travels to B ...
//! let relation_b = SwapRelationPart::second(&input_b, session.offer(), &mut rng)?;
//! let part_b = respond_second(relation_b, session.offer(), network_id, &mut rng)?;
//!
//! // ... part_b travels back to A ...
//! let proof = session.finalize(part_b)?;
//! ```
//!
//! ## Security Notes
//!
//! - All scalars are sampled with 512-bit wide reduction from a `CryptoRng`
//! - Witnesses and sigma nonces are zeroized on drop
//! - A failed precondition returns an error and no partial proof object

pub mod bench_vectors;
mod range;
mod relation;
mod session;

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use rand::{CryptoRng, RngCore};
use thiserror::Error;

pub use range::prove_range;
pub use relation::{FirstLegInput, SecondLegInput, SwapRelationPart};
pub use session::{commit_first, respond_second, FirstLegSession};
pub use zkswap_primitives::{
    Ciphertext, SwapCommitment, SwapProof, SwapProofPart, SwapSide, SwapStatement, G,
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProverError {
    /// Malformed or policy-violating input, caught before any cryptographic work.
    #[error("invalid parameters")]
    InvalidParams,
    #[error("transferred amount must be positive")]
    PositiveBStarRequired,
    #[error("public key does not match secret key")]
    InconsistentPublicKey,
    #[error("claimed balance does not match the balance ciphertext")]
    IncorrectBalance,
    #[error("peer swap proof does not match this swap")]
    InvalidSwapProof,
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("remaining balance does not fit the range proof")]
    OutOfRange,
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}

/// Generate a random scalar with full 512-bit wide reduction.
pub(crate) fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    let mut bytes = [0u8; 64];
    rng.fill_bytes(&mut bytes);
    Scalar::from_bytes_mod_order_wide(&bytes)
}

/// Fresh ElGamal keypair `(sk, sk·G)`.
pub fn generate_keypair<R: RngCore + CryptoRng>(rng: &mut R) -> (Scalar, RistrettoPoint) {
    let sk = random_scalar(rng);
    (sk, sk * G)
}
