//! no_std verifier for two-party confidential swap proofs.
//!
//! Verification is accept/reject. The reason for a rejection is logged at
//! `debug` under the `zkswap` target and never returned, so callers cannot be
//! used as an oracle for which check failed.
//!
//! Checks run cheapest first:
//! 1. structure (sides, range proof length)
//! 2. agreement between the two legs
//! 3. the embedded challenge against the recomputed one
//! 4. per-leg re-derivation of every public value
//! 5. sigma equations
//! 6. range proofs

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
mod tests;

use core::{fmt, marker::PhantomData};

use curve25519_dalek::{ristretto::RistrettoPoint, traits::IsIdentity};

use zkswap_primitives::{
    elgamal::{cl_prime_inv, t_div_cr_prime},
    sigma, swap_challenge, token_generator, verify_bit_proofs, Ciphertext, Error,
    NetworkIdProvider, RangeProof, RangeProofVerifier, SwapProof, SwapProofVerifier, SwapSide,
    SwapStatement, RANGE_BITS,
};

/// Swap verifier bound to the network id supplied by `N`.
pub struct ZkSwapVerifier<N>(PhantomData<N>);

impl<N: NetworkIdProvider> SwapProofVerifier for ZkSwapVerifier<N> {
    fn verify_swap(proof: &SwapProof) -> bool {
        verify_swap(&N::network_id(), proof)
    }
}

/// Range verifier for the bit-decomposition proof.
pub struct BitRangeVerifier;

impl RangeProofVerifier for BitRangeVerifier {
    fn verify_range_proof(commitment: &RistrettoPoint, proof: &RangeProof) -> Result<(), Error> {
        verify_bit_proofs(commitment, proof)
    }
}

/// Why a proof was rejected. Logged only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Structure(&'static str),
    Mismatch(&'static str),
    Challenge,
    Statement(SwapSide, &'static str),
    Sigma(SwapSide, &'static str),
    Range(SwapSide),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Structure(what) => write!(f, "malformed proof: {what}"),
            Rejection::Mismatch(what) => write!(f, "legs disagree on {what}"),
            Rejection::Challenge => write!(f, "challenge mismatch"),
            Rejection::Statement(side, what) => write!(f, "{side:?} leg statement: {what}"),
            Rejection::Sigma(side, eq) => write!(f, "{side:?} leg sigma equation {eq}"),
            Rejection::Range(side) => write!(f, "{side:?} leg range proof"),
        }
    }
}

/// Verify a complete swap proof for `network_id`.
pub fn verify_swap(network_id: &[u8; 32], proof: &SwapProof) -> bool {
    match check(network_id, proof) {
        Ok(()) => true,
        Err(reason) => {
            log::debug!(target: "zkswap", "swap proof rejected: {reason}");
            false
        }
    }
}

fn check(network_id: &[u8; 32], proof: &SwapProof) -> Result<(), Rejection> {
    let first = &proof.first.commitment;
    let second = &proof.second.commitment;

    if first.statement.side != SwapSide::First || second.statement.side != SwapSide::Second {
        return Err(Rejection::Structure("sides"));
    }
    if first.range_proof.bits.len() != RANGE_BITS || second.range_proof.bits.len() != RANGE_BITS
    {
        return Err(Rejection::Structure("range proof length"));
    }

    check_agreement(&first.statement, &second.statement)?;

    if swap_challenge(network_id, first, second) != proof.challenge {
        return Err(Rejection::Challenge);
    }

    for part in [&proof.first, &proof.second] {
        let s = &part.commitment.statement;
        check_statement(s).map_err(|what| Rejection::Statement(s.side, what))?;
    }

    for part in [&proof.first, &proof.second] {
        let c = &part.commitment;
        sigma::check_equations(&c.statement, &c.commitments, &part.responses, &proof.challenge)
            .map_err(|eq| Rejection::Sigma(c.statement.side, eq))?;
    }

    for part in [&proof.first, &proof.second] {
        let c = &part.commitment;
        BitRangeVerifier::verify_range_proof(&c.statement.t, &c.range_proof)
            .map_err(|_| Rejection::Range(c.statement.side))?;
    }

    Ok(())
}

fn check_agreement(a: &SwapStatement, b: &SwapStatement) -> Result<(), Rejection> {
    if a.from_token_id != b.from_token_id || a.to_token_id != b.to_token_id {
        return Err(Rejection::Mismatch("token ids"));
    }
    if a.ht1 != b.ht1 || a.ht2 != b.ht2 {
        return Err(Rejection::Mismatch("token generators"));
    }
    if a.pk != b.receiver_pk || a.receiver_pk != b.pk {
        return Err(Rejection::Mismatch("public keys"));
    }
    if a.b_star_to != b.b_star_from || a.b_star_from != b.b_star_to {
        return Err(Rejection::Mismatch("amounts"));
    }
    if a.fee != b.fee {
        return Err(Rejection::Mismatch("fee"));
    }
    Ok(())
}

/// Re-derive every public value of one leg from its primary fields.
fn check_statement(s: &SwapStatement) -> Result<(), &'static str> {
    if s.from_token_id == 0 || s.to_token_id == 0 || s.from_token_id == s.to_token_id {
        return Err("token ids");
    }
    if s.b_star_from <= 0 || s.b_star_to <= 0 || s.fee < 0 {
        return Err("amounts");
    }
    if s.ht1 != token_generator(s.from_token_id) || s.ht2 != token_generator(s.to_token_id) {
        return Err("token generators");
    }
    if s.pk.is_identity() || s.receiver_pk.is_identity() {
        return Err("public keys");
    }
    let delta = s.delta().ok_or("amount overflow")?;
    if s.c_star != Ciphertext::encrypt(-delta, &s.r_star, &s.pk) {
        return Err("debit ciphertext");
    }
    if s.receiver_c_star != Ciphertext::encrypt(delta, &s.r_star, &s.receiver_pk) {
        return Err("credit ciphertext");
    }
    if s.t_div_cr_prime != t_div_cr_prime(&s.t, &s.c, &s.c_star) {
        return Err("TDivCRprime");
    }
    if s.cl_prime_inv != cl_prime_inv(&s.c, &s.c_star) {
        return Err("CLprimeInv");
    }
    Ok(())
}
