use crate::{
    commit_first, respond_second, Ciphertext, FirstLegInput, ProverError, SecondLegInput,
    SwapProof, SwapRelationPart, G,
};
use curve25519_dalek::scalar::Scalar;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use zkswap_primitives::{codec::SWAP_PROOF_LEN, point_to_bytes};

/// Network id the fixtures are bound to.
pub const BENCH_NETWORK_ID: [u8; 32] = [0u8; 32];

pub const TOKEN_A: u32 = 1;
pub const TOKEN_B: u32 = 2;

/// A holds 8 of token 1 and sends 1 for 8 of token 2; B holds 8 of token 2.
/// Fee 0. Deterministic in `seed`.
pub fn sample_swap(seed: [u8; 32]) -> Result<SwapProof, ProverError> {
    let mut rng = ChaCha20Rng::from_seed(seed);

    let sk_a = Scalar::from(5u64);
    let pk_a = sk_a * G;
    let sk_b = Scalar::from(9u64);
    let pk_b = sk_b * G;

    let input_a = FirstLegInput {
        balance_ct: Ciphertext::encrypt(8, &Scalar::from(42u64), &pk_a),
        receiver_balance_ct: Ciphertext::encrypt(0, &Scalar::from(7u64), &pk_b),
        pk: pk_a,
        receiver_pk: pk_b,
        balance: 8,
        b_star_from: 1,
        b_star_to: 8,
        sk: sk_a,
        from_token_id: TOKEN_A,
        to_token_id: TOKEN_B,
        fee: 0,
    };
    let relation_a = SwapRelationPart::first(&input_a, &mut rng)?;
    let session = commit_first(relation_a, BENCH_NETWORK_ID, &mut rng)?;

    let input_b = SecondLegInput {
        balance_ct: Ciphertext::encrypt(8, &Scalar::from(11u64), &pk_b),
        receiver_balance_ct: Ciphertext::encrypt(0, &Scalar::from(13u64), &pk_a),
        pk: pk_b,
        receiver_pk: pk_a,
        balance: 8,
        sk: sk_b,
        from_token_id: TOKEN_A,
        to_token_id: TOKEN_B,
    };
    let relation_b = SwapRelationPart::second(&input_b, session.offer(), &mut rng)?;
    let part_b = respond_second(relation_b, session.offer(), BENCH_NETWORK_ID, &mut rng)?;

    session.finalize(part_b)
}

/// Rust source for the fixture module consumed by benches and downstream tests.
pub fn swap_fixture_source() -> Result<String, ProverError> {
    let mut seed = [0u8; 32];
    seed[0] = 7;
    let proof = sample_swap(seed)?;
    let first = &proof.first.commitment.statement;
    let second = &proof.second.commitment.statement;

    Ok(format!(
        r#"
// Auto-generated by gen_vectors.
// Deterministic swap proof: A sends {from} of token {ta} for {to} of token {tb}.

pub const NETWORK_ID: [u8; 32] = {net:?};
pub const PK_A32: [u8; 32] = {pk_a:?};
pub const PK_B32: [u8; 32] = {pk_b:?};

// ----- balances before the swap -----
pub const A_FROM_BALANCE_CT_64: [u8; 64] = {a_ct:?};
pub const B_TO_BALANCE_CT_64:   [u8; 64] = {b_ct:?};

// ----- proof -----
pub const SWAP_PROOF_LEN: usize = {len};
pub const SWAP_PROOF_HEX: &str = "{hex}";
"#,
        from = first.b_star_from,
        to = first.b_star_to,
        ta = TOKEN_A,
        tb = TOKEN_B,
        net = BENCH_NETWORK_ID,
        pk_a = point_to_bytes(&first.pk),
        pk_b = point_to_bytes(&second.pk),
        a_ct = first.c.to_bytes(),
        b_ct = second.c.to_bytes(),
        len = SWAP_PROOF_LEN,
        hex = hex::encode(proof.to_bytes()),
    ))
}
