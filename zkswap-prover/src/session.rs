//! Three-move proving session.
//!
//! The initiator commits first, the counterparty derives the challenge over both
//! commitments and answers it, then the initiator answers the same challenge.
//! Sigma nonces live only inside a [`FirstLegSession`] or a single call to
//! [`respond_second`] and are wiped on drop.

use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use zkswap_primitives::{
    sigma, swap_challenge, verify_bit_proofs, RangeProof, SigmaCommitments, SwapCommitment,
    SwapProof, SwapProofPart, SwapResponses, SwapSide, SwapStatement, G, RANGE_BITS,
};

use crate::{
    range::prove_range, random_scalar, relation::SwapWitness, ProverError, SwapRelationPart,
};

#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct SigmaNonces {
    pub(crate) k_sk: Scalar,
    pub(crate) k_rbar: Scalar,
    pub(crate) k_sk_inv: Scalar,
}

/// Initiator state between publishing the offer and receiving the reply.
pub struct FirstLegSession {
    witness: SwapWitness,
    nonces: SigmaNonces,
    offer: SwapCommitment,
    network_id: [u8; 32],
}

/// Commit to the initiator's leg.
///
/// # Errors
/// `InvalidParams` if `relation` was not built with [`SwapRelationPart::first`].
pub fn commit_first<R: RngCore + CryptoRng>(
    relation: SwapRelationPart,
    network_id: [u8; 32],
    rng: &mut R,
) -> Result<FirstLegSession, ProverError> {
    if relation.side() != SwapSide::First {
        return Err(ProverError::InvalidParams);
    }
    let SwapRelationPart { statement, witness } = relation;
    let (offer, nonces) = commitment_for(statement, &witness, rng)?;
    log::debug!(target: "zkswap", "first leg committed");
    Ok(FirstLegSession {
        witness,
        nonces,
        offer,
        network_id,
    })
}

/// Build the counterparty's complete part against the initiator's offer.
///
/// # Errors
/// - `InvalidParams` if `relation` is not a second leg or `offer` is not a first leg
/// - `InvalidSwapProof` if `relation` was built against a different offer
pub fn respond_second<R: RngCore + CryptoRng>(
    relation: SwapRelationPart,
    offer: &SwapCommitment,
    network_id: [u8; 32],
    rng: &mut R,
) -> Result<SwapProofPart, ProverError> {
    if relation.side() != SwapSide::Second || offer.statement.side != SwapSide::First {
        return Err(ProverError::InvalidParams);
    }
    legs_agree(&offer.statement, relation.statement()).map_err(|what| {
        log::debug!(target: "zkswap", "second leg does not match offer: {what}");
        ProverError::InvalidSwapProof
    })?;

    let SwapRelationPart { statement, witness } = relation;
    let (commitment, nonces) = commitment_for(statement, &witness, rng)?;
    let challenge = swap_challenge(&network_id, offer, &commitment);
    let responses = responses_for(&witness, &nonces, &challenge)?;
    log::debug!(target: "zkswap", "second leg answered");
    Ok(SwapProofPart {
        commitment,
        responses,
    })
}

impl FirstLegSession {
    /// The commitment to hand to the counterparty.
    pub fn offer(&self) -> &SwapCommitment {
        &self.offer
    }

    /// Check the counterparty's part and answer the shared challenge.
    ///
    /// # Errors
    /// `InvalidSwapProof` if `reply` does not belong to this offer, its sigma
    /// equations fail under the recomputed challenge or its range proof fails.
    pub fn finalize(self, reply: SwapProofPart) -> Result<SwapProof, ProverError> {
        let peer = &reply.commitment;
        let reject = |what: &str| {
            log::debug!(target: "zkswap", "rejecting counterparty part: {what}");
            ProverError::InvalidSwapProof
        };

        if peer.statement.side != SwapSide::Second {
            return Err(reject("side"));
        }
        if peer.range_proof.bits.len() != RANGE_BITS {
            return Err(reject("range proof length"));
        }
        legs_agree(&self.offer.statement, &peer.statement).map_err(reject)?;

        let challenge = swap_challenge(&self.network_id, &self.offer, peer);
        sigma::check_equations(
            &peer.statement,
            &peer.commitments,
            &reply.responses,
            &challenge,
        )
        .map_err(reject)?;
        verify_bit_proofs(&peer.statement.t, &peer.range_proof)
            .map_err(|_| reject("range proof"))?;

        let responses = responses_for(&self.witness, &self.nonces, &challenge)?;
        log::debug!(target: "zkswap", "swap proof assembled");
        Ok(SwapProof {
            first: SwapProofPart {
                commitment: self.offer,
                responses,
            },
            second: reply,
            challenge,
        })
    }
}

/// Public fields the two legs must agree on; returns the first mismatch.
pub(crate) fn legs_agree(
    first: &SwapStatement,
    second: &SwapStatement,
) -> Result<(), &'static str> {
    if first.from_token_id != second.from_token_id || first.to_token_id != second.to_token_id {
        return Err("token ids");
    }
    if first.ht1 != second.ht1 || first.ht2 != second.ht2 {
        return Err("token generators");
    }
    if first.pk != second.receiver_pk || first.receiver_pk != second.pk {
        return Err("public keys");
    }
    if first.b_star_to != second.b_star_from || first.b_star_from != second.b_star_to {
        return Err("amounts");
    }
    if first.fee != second.fee {
        return Err("fee");
    }
    Ok(())
}

/// Range proof plus sigma announcements for one leg.
pub(crate) fn commitment_for<R: RngCore + CryptoRng>(
    statement: SwapStatement,
    witness: &SwapWitness,
    rng: &mut R,
) -> Result<(SwapCommitment, SigmaNonces), ProverError> {
    let range_proof = prove_range(&statement.t, witness.b_prime, &witness.rs, rng)?;
    Ok(announce(statement, range_proof, rng))
}

/// Sigma announcements over an already proven range.
pub(crate) fn announce<R: RngCore + CryptoRng>(
    statement: SwapStatement,
    range_proof: RangeProof,
    rng: &mut R,
) -> (SwapCommitment, SigmaNonces) {
    let nonces = SigmaNonces {
        k_sk: random_scalar(rng),
        k_rbar: random_scalar(rng),
        k_sk_inv: random_scalar(rng),
    };
    let commitments = SigmaCommitments {
        a_pk: nonces.k_sk * G,
        a_t_div_cr_prime: nonces.k_rbar * G + nonces.k_sk_inv * statement.cl_prime_inv,
        a_pt1: nonces.k_sk * statement.ht1,
        a_pt2: nonces.k_sk * statement.ht2,
    };

    (
        SwapCommitment {
            statement,
            commitments,
            range_proof,
        },
        nonces,
    )
}

pub(crate) fn responses_for(
    witness: &SwapWitness,
    nonces: &SigmaNonces,
    challenge: &Scalar,
) -> Result<SwapResponses, ProverError> {
    // sk = 0 is already excluded by the identity-key check
    if witness.sk == Scalar::ZERO {
        return Err(ProverError::InvalidParams);
    }
    let mut sk_inv = witness.sk.invert();
    let responses = SwapResponses {
        z_rbar: nonces.k_rbar + challenge * witness.r_bar,
        z_sk: nonces.k_sk + challenge * witness.sk,
        z_sk_inv: nonces.k_sk_inv + challenge * sk_inv,
    };
    sk_inv.zeroize();
    Ok(responses)
}
