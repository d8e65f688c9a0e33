//! Verifier unit tests that need no prover: decoding failures, structural
//! rejections and the bit range proof against a locally built proof.
//! End-to-end acceptance is covered by the prover crate's tests.

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use zkswap_primitives::{
    bit_challenge,
    codec::SWAP_PROOF_LEN,
    elgamal::{cl_prime_inv, t_div_cr_prime},
    pedersen_commit, range_transcript, swap_challenge, token_generator,
    BitProof, Ciphertext, Error, NetworkIdProvider, RangeProof, RangeProofVerifier,
    SigmaCommitments, SwapCommitment, SwapProof, SwapProofPart, SwapProofVerifier,
    SwapResponses, SwapSide, SwapStatement, G, H, RANGE_BITS,
};

use crate::{check, BitRangeVerifier, Rejection, ZkSwapVerifier};

pub struct TestNetworkId;
impl NetworkIdProvider for TestNetworkId {
    fn network_id() -> [u8; 32] {
        [0u8; 32]
    }
}

type TestVerifier = ZkSwapVerifier<TestNetworkId>;

fn scalar<R: RngCore>(rng: &mut R) -> Scalar {
    let mut bytes = [0u8; 64];
    rng.fill_bytes(&mut bytes);
    Scalar::from_bytes_mod_order_wide(&bytes)
}

/// Honest OR proofs for `value` under blindings `rs`; mirrors the prover.
fn range_proof_for(
    value: u64,
    rs: &[Scalar],
    rng: &mut ChaCha20Rng,
) -> (RistrettoPoint, RangeProof) {
    let r_bar: Scalar = rs.iter().sum();
    let t = pedersen_commit(&r_bar, &Scalar::from(value));
    let base = range_transcript(&t);

    let bits = (0..RANGE_BITS)
        .map(|i| {
            let weight = Scalar::from(1u64 << i) * *H;
            let bit = (value >> i) & 1 == 1;
            let com = rs[i] * G + if bit { weight } else { RistrettoPoint::default() };
            let (k, c_sim, z_sim) = (scalar(rng), scalar(rng), scalar(rng));
            if bit {
                let r0 = z_sim * G - c_sim * com;
                let c = bit_challenge(&base, i, &com, &r0, &(k * G));
                let c1 = c - c_sim;
                BitProof {
                    commitment: com,
                    c0: c_sim,
                    c1,
                    z0: z_sim,
                    z1: k + c1 * rs[i],
                }
            } else {
                let r1 = z_sim * G - c_sim * (com - weight);
                let c = bit_challenge(&base, i, &com, &(k * G), &r1);
                let c0 = c - c_sim;
                BitProof {
                    commitment: com,
                    c0,
                    c1: c_sim,
                    z0: k + c0 * rs[i],
                    z1: z_sim,
                }
            }
        })
        .collect();
    (t, RangeProof { bits })
}

/// Legs that agree with each other but carry random sigma data.
fn consistent_proof(rng: &mut ChaCha20Rng) -> SwapProof {
    let (sk_a, sk_b) = (scalar(rng), scalar(rng));
    let (pk_a, pk_b) = (sk_a * G, sk_b * G);

    let mut leg = |side: SwapSide,
                   pk: RistrettoPoint,
                   receiver_pk: RistrettoPoint,
                   b_star_from: i64,
                   b_star_to: i64| {
        let rs: Vec<Scalar> = (0..RANGE_BITS).map(|_| scalar(rng)).collect();
        let (t, range_proof) = range_proof_for(3, &rs, rng);
        let c = Ciphertext::encrypt(10, &scalar(rng), &pk);
        let r_star = scalar(rng);
        let c_star = Ciphertext::encrypt(-b_star_from, &r_star, &pk);
        let statement = SwapStatement {
            side,
            from_token_id: 1,
            to_token_id: 2,
            b_star_from,
            b_star_to,
            fee: 0,
            r_star,
            pk,
            receiver_pk,
            c,
            c_star,
            receiver_c: Ciphertext::encrypt(0, &scalar(rng), &receiver_pk),
            receiver_c_star: Ciphertext::encrypt(b_star_from, &r_star, &receiver_pk),
            t,
            ht1: token_generator(1),
            ht2: token_generator(2),
            pt1: scalar(rng) * G,
            pt2: scalar(rng) * G,
            t_div_cr_prime: t_div_cr_prime(&t, &c, &c_star),
            cl_prime_inv: cl_prime_inv(&c, &c_star),
        };
        SwapProofPart {
            commitment: SwapCommitment {
                statement,
                commitments: SigmaCommitments {
                    a_pk: scalar(rng) * G,
                    a_t_div_cr_prime: scalar(rng) * G,
                    a_pt1: scalar(rng) * G,
                    a_pt2: scalar(rng) * G,
                },
                range_proof,
            },
            responses: SwapResponses {
                z_rbar: scalar(rng),
                z_sk: scalar(rng),
                z_sk_inv: scalar(rng),
            },
        }
    };

    let first = leg(SwapSide::First, pk_a, pk_b, 2, 5);
    let second = leg(SwapSide::Second, pk_b, pk_a, 5, 2);
    let challenge = swap_challenge(
        &TestNetworkId::network_id(),
        &first.commitment,
        &second.commitment,
    );
    SwapProof {
        first,
        second,
        challenge,
    }
}

#[test]
fn malformed_bytes_are_rejected() {
    assert!(!TestVerifier::verify_swap_bytes(&[]));
    assert!(!TestVerifier::verify_swap_bytes(&[0u8; SWAP_PROOF_LEN - 1]));
    assert!(!TestVerifier::verify_swap_bytes(&[0xffu8; SWAP_PROOF_LEN]));
}

#[test]
fn all_zero_proof_decodes_but_fails_structure() {
    // identity points and zero scalars are canonical, both side tags read as First
    let proof = SwapProof::from_bytes(&[0u8; SWAP_PROOF_LEN]).expect("zeros decode");
    assert_eq!(
        check(&[0u8; 32], &proof),
        Err(Rejection::Structure("sides"))
    );
    assert!(!TestVerifier::verify_swap(&proof));
}

#[test]
fn random_sigma_data_fails_at_sigma_equations() {
    let mut rng = ChaCha20Rng::from_seed([21u8; 32]);
    let proof = consistent_proof(&mut rng);
    assert_eq!(
        check(&[0u8; 32], &proof),
        Err(Rejection::Sigma(SwapSide::First, "pk"))
    );
}

#[test]
fn checks_stop_at_cheapest_failure() {
    let mut rng = ChaCha20Rng::from_seed([22u8; 32]);
    let proof = consistent_proof(&mut rng);

    let mut other_net = [0u8; 32];
    other_net[31] = 1;
    assert_eq!(check(&other_net, &proof), Err(Rejection::Challenge));

    let mut swapped_fee = proof.clone();
    swapped_fee.second.commitment.statement.fee = 1;
    assert_eq!(
        check(&[0u8; 32], &swapped_fee),
        Err(Rejection::Mismatch("fee"))
    );

    let mut wrong_debit = proof.clone();
    wrong_debit.first.commitment.statement.r_star += Scalar::ONE;
    wrong_debit.challenge = swap_challenge(
        &[0u8; 32],
        &wrong_debit.first.commitment,
        &wrong_debit.second.commitment,
    );
    assert_eq!(
        check(&[0u8; 32], &wrong_debit),
        Err(Rejection::Statement(SwapSide::First, "debit ciphertext"))
    );

    let mut short = proof;
    short.second.commitment.range_proof.bits.pop();
    assert_eq!(
        check(&[0u8; 32], &short),
        Err(Rejection::Structure("range proof length"))
    );
}

#[test]
fn honest_range_proof_verifies() {
    let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
    let rs: Vec<Scalar> = (0..RANGE_BITS).map(|_| scalar(&mut rng)).collect();
    for value in [0u64, 1, 6, (1 << RANGE_BITS) - 1] {
        let (t, proof) = range_proof_for(value, &rs, &mut rng);
        assert_eq!(BitRangeVerifier::verify_range_proof(&t, &proof), Ok(()));
    }
}

#[test]
fn range_proof_rejects_other_commitment_and_tampering() {
    let mut rng = ChaCha20Rng::from_seed([6u8; 32]);
    let rs: Vec<Scalar> = (0..RANGE_BITS).map(|_| scalar(&mut rng)).collect();
    let (t, proof) = range_proof_for(6, &rs, &mut rng);

    assert_eq!(
        BitRangeVerifier::verify_range_proof(&(t + G), &proof),
        Err(Error::Malformed)
    );

    let mut tampered = proof.clone();
    tampered.bits[2].z1 += Scalar::ONE;
    assert_eq!(
        BitRangeVerifier::verify_range_proof(&t, &tampered),
        Err(Error::Malformed)
    );

    let mut short = proof;
    short.bits.truncate(RANGE_BITS - 1);
    assert_eq!(
        BitRangeVerifier::verify_range_proof(&t, &short),
        Err(Error::Length {
            expected: RANGE_BITS,
            got: RANGE_BITS - 1
        })
    );
}

#[test]
fn non_bit_commitment_cannot_be_proven() {
    // a bit commitment to 2·2^i is neither branch; reusing an honest OR proof fails
    let mut rng = ChaCha20Rng::from_seed([8u8; 32]);
    let rs: Vec<Scalar> = (0..RANGE_BITS).map(|_| scalar(&mut rng)).collect();
    let (t, mut proof) = range_proof_for(1, &rs, &mut rng);
    proof.bits[0].commitment += *H;
    proof.bits[1].commitment -= *H;
    // Σ still equals T, the per-bit challenges no longer hold
    assert_eq!(proof.aggregate(), t);
    assert_eq!(
        BitRangeVerifier::verify_range_proof(&t, &proof),
        Err(Error::Malformed)
    );
}
