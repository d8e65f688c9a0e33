//! Relation construction for each leg.
//!
//! Preconditions are checked in a fixed order and the first violation is
//! returned. Nothing random is sampled until every check has passed.

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar, traits::IsIdentity};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use zkswap_primitives::{
    elgamal::{cl_prime_inv, t_div_cr_prime},
    pedersen_commit, token_generator, Ciphertext, SwapCommitment, SwapSide, SwapStatement, G,
    RANGE_BITS,
};

use crate::{random_scalar, ProverError};

/// Initiator's view of the swap.
pub struct FirstLegInput {
    /// Own balance of `from_token_id`.
    pub balance_ct: Ciphertext,
    /// Counterparty's balance of `from_token_id`, credited with the outgoing amount.
    pub receiver_balance_ct: Ciphertext,
    pub pk: RistrettoPoint,
    pub receiver_pk: RistrettoPoint,
    /// Plaintext of `balance_ct`.
    pub balance: i64,
    /// Amount sent.
    pub b_star_from: i64,
    /// Amount expected back.
    pub b_star_to: i64,
    pub sk: Scalar,
    pub from_token_id: u32,
    pub to_token_id: u32,
    pub fee: i64,
}

/// Counterparty's view. Amounts and fee come from the initiator's offer.
pub struct SecondLegInput {
    /// Own balance of `to_token_id`.
    pub balance_ct: Ciphertext,
    /// Initiator's balance of `to_token_id`.
    pub receiver_balance_ct: Ciphertext,
    pub pk: RistrettoPoint,
    pub receiver_pk: RistrettoPoint,
    pub balance: i64,
    pub sk: Scalar,
    /// Same order as the initiator used.
    pub from_token_id: u32,
    pub to_token_id: u32,
}

#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct SwapWitness {
    pub(crate) sk: Scalar,
    pub(crate) b_prime: u64,
    pub(crate) r_bar: Scalar,
    pub(crate) rs: [Scalar; RANGE_BITS],
}

/// Public statement plus private witness for one leg. Single use.
pub struct SwapRelationPart {
    pub(crate) statement: SwapStatement,
    pub(crate) witness: SwapWitness,
}

/// Inputs shared by both legs once the side-specific checks have passed.
struct Validated<'a> {
    side: SwapSide,
    balance_ct: &'a Ciphertext,
    receiver_balance_ct: &'a Ciphertext,
    pk: &'a RistrettoPoint,
    receiver_pk: &'a RistrettoPoint,
    sk: &'a Scalar,
    from_token_id: u32,
    to_token_id: u32,
    b_star_from: i64,
    b_star_to: i64,
    fee: i64,
    delta: i64,
    b_prime: u64,
}

fn check_token_pair(from_token_id: u32, to_token_id: u32) -> Result<(), ProverError> {
    if from_token_id == 0 || to_token_id == 0 || from_token_id == to_token_id {
        return Err(ProverError::InvalidParams);
    }
    Ok(())
}

fn check_keys(pk: &RistrettoPoint, receiver_pk: &RistrettoPoint) -> Result<(), ProverError> {
    if pk.is_identity() || receiver_pk.is_identity() {
        return Err(ProverError::InvalidParams);
    }
    Ok(())
}

fn check_keypair(pk: &RistrettoPoint, sk: &Scalar) -> Result<(), ProverError> {
    if sk * G != *pk {
        return Err(ProverError::InconsistentPublicKey);
    }
    Ok(())
}

/// `IncorrectBalance` → `InsufficientBalance` (b ≤ 0) → `PositiveBStarRequired`
/// → `InsufficientBalance` (b' < 0) → `OutOfRange`.
fn remaining_balance(
    balance_ct: &Ciphertext,
    balance: i64,
    sk: &Scalar,
    b_star_from: i64,
    delta: Option<i64>,
) -> Result<(u64, i64), ProverError> {
    if !balance_ct.opens_to(balance, sk) {
        return Err(ProverError::IncorrectBalance);
    }
    if balance <= 0 {
        return Err(ProverError::InsufficientBalance);
    }
    if b_star_from <= 0 {
        return Err(ProverError::PositiveBStarRequired);
    }
    let delta = delta.ok_or(ProverError::Overflow("outgoing amount + fee"))?;
    // b - delta only overflows far below zero
    let b_prime = balance
        .checked_sub(delta)
        .ok_or(ProverError::InsufficientBalance)?;
    if b_prime < 0 {
        return Err(ProverError::InsufficientBalance);
    }
    let b_prime = b_prime as u64;
    if b_prime >> RANGE_BITS != 0 {
        return Err(ProverError::OutOfRange);
    }
    Ok((b_prime, delta))
}

impl SwapRelationPart {
    /// Build the initiator's relation. The fee is debited on this leg.
    pub fn first<R: RngCore + CryptoRng>(
        inp: &FirstLegInput,
        rng: &mut R,
    ) -> Result<Self, ProverError> {
        check_keys(&inp.pk, &inp.receiver_pk)?;
        check_token_pair(inp.from_token_id, inp.to_token_id)?;
        if inp.fee < 0 {
            return Err(ProverError::InvalidParams);
        }
        check_keypair(&inp.pk, &inp.sk).inspect_err(|_| {
            log::debug!(target: "zkswap", "first leg: public key does not match secret key");
        })?;

        let (b_prime, delta) = remaining_balance(
            &inp.balance_ct,
            inp.balance,
            &inp.sk,
            inp.b_star_from,
            inp.b_star_from.checked_add(inp.fee),
        )
        .inspect_err(|e| log::debug!(target: "zkswap", "first leg rejected: {e}"))?;

        Ok(Self::assemble(
            Validated {
                side: SwapSide::First,
                balance_ct: &inp.balance_ct,
                receiver_balance_ct: &inp.receiver_balance_ct,
                pk: &inp.pk,
                receiver_pk: &inp.receiver_pk,
                sk: &inp.sk,
                from_token_id: inp.from_token_id,
                to_token_id: inp.to_token_id,
                b_star_from: inp.b_star_from,
                b_star_to: inp.b_star_to,
                fee: inp.fee,
                delta,
                b_prime,
            },
            rng,
        ))
    }

    /// Build the counterparty's relation against the initiator's published offer.
    ///
    /// This party sends what the initiator expects back (`offer.b_star_to`) and
    /// pays no fee.
    pub fn second<R: RngCore + CryptoRng>(
        inp: &SecondLegInput,
        offer: &SwapCommitment,
        rng: &mut R,
    ) -> Result<Self, ProverError> {
        let peer = &offer.statement;
        check_keys(&inp.pk, &inp.receiver_pk)?;
        check_token_pair(inp.from_token_id, inp.to_token_id)?;
        if peer.side != SwapSide::First
            || peer.b_star_from <= 0
            || peer.b_star_to <= 0
            || peer.fee < 0
        {
            return Err(ProverError::InvalidParams);
        }
        check_keypair(&inp.pk, &inp.sk)?;

        let ht1 = token_generator(inp.from_token_id);
        let ht2 = token_generator(inp.to_token_id);
        if ht1 != peer.ht1 || ht2 != peer.ht2 {
            log::debug!(target: "zkswap", "second leg: offer is for a different token pair");
            return Err(ProverError::InvalidSwapProof);
        }
        if peer.receiver_pk != inp.pk || peer.pk != inp.receiver_pk {
            log::debug!(target: "zkswap", "second leg: offer names a different counterparty");
            return Err(ProverError::InvalidSwapProof);
        }

        let b_star_from = peer.b_star_to;
        let (b_prime, delta) = remaining_balance(
            &inp.balance_ct,
            inp.balance,
            &inp.sk,
            b_star_from,
            Some(b_star_from),
        )
        .inspect_err(|e| log::debug!(target: "zkswap", "second leg rejected: {e}"))?;

        Ok(Self::assemble(
            Validated {
                side: SwapSide::Second,
                balance_ct: &inp.balance_ct,
                receiver_balance_ct: &inp.receiver_balance_ct,
                pk: &inp.pk,
                receiver_pk: &inp.receiver_pk,
                sk: &inp.sk,
                from_token_id: inp.from_token_id,
                to_token_id: inp.to_token_id,
                b_star_from,
                b_star_to: peer.b_star_from,
                fee: peer.fee,
                delta,
                b_prime,
            },
            rng,
        ))
    }

    /// Initiator relation with the range check skipped, for forging out-of-range proofs.
    #[cfg(test)]
    pub(crate) fn first_unchecked_range<R: RngCore + CryptoRng>(
        inp: &FirstLegInput,
        rng: &mut R,
    ) -> Self {
        let delta = inp.b_star_from + inp.fee;
        Self::assemble(
            Validated {
                side: SwapSide::First,
                balance_ct: &inp.balance_ct,
                receiver_balance_ct: &inp.receiver_balance_ct,
                pk: &inp.pk,
                receiver_pk: &inp.receiver_pk,
                sk: &inp.sk,
                from_token_id: inp.from_token_id,
                to_token_id: inp.to_token_id,
                b_star_from: inp.b_star_from,
                b_star_to: inp.b_star_to,
                fee: inp.fee,
                delta,
                b_prime: (inp.balance - delta) as u64,
            },
            rng,
        )
    }

    fn assemble<R: RngCore + CryptoRng>(v: Validated<'_>, rng: &mut R) -> Self {
        let r_star = random_scalar(rng);
        let c_star = Ciphertext::encrypt(-v.delta, &r_star, v.pk);
        let receiver_c_star = Ciphertext::encrypt(v.delta, &r_star, v.receiver_pk);

        let mut rs = [Scalar::ZERO; RANGE_BITS];
        for r in rs.iter_mut() {
            *r = random_scalar(rng);
        }
        let r_bar: Scalar = rs.iter().sum();
        let t = pedersen_commit(&r_bar, &Scalar::from(v.b_prime));

        let ht1 = token_generator(v.from_token_id);
        let ht2 = token_generator(v.to_token_id);

        let statement = SwapStatement {
            side: v.side,
            from_token_id: v.from_token_id,
            to_token_id: v.to_token_id,
            b_star_from: v.b_star_from,
            b_star_to: v.b_star_to,
            fee: v.fee,
            r_star,
            pk: *v.pk,
            receiver_pk: *v.receiver_pk,
            c: *v.balance_ct,
            c_star,
            receiver_c: *v.receiver_balance_ct,
            receiver_c_star,
            t,
            ht1,
            ht2,
            pt1: v.sk * ht1,
            pt2: v.sk * ht2,
            t_div_cr_prime: t_div_cr_prime(&t, v.balance_ct, &c_star),
            cl_prime_inv: cl_prime_inv(v.balance_ct, &c_star),
        };

        Self {
            statement,
            witness: SwapWitness {
                sk: *v.sk,
                b_prime: v.b_prime,
                r_bar,
                rs,
            },
        }
    }

    pub fn statement(&self) -> &SwapStatement {
        &self.statement
    }

    pub fn side(&self) -> SwapSide {
        self.statement.side
    }
}
