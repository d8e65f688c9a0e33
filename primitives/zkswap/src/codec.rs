//! Fixed byte layouts. Every length is a compile-time constant; nothing is
//! length-prefixed. The challenge is computed over these exact bytes, so any
//! change here is a protocol change (bump [`crate::SDK_VERSION`]).
//!
//! ```text
//! statement   = side(1) || from_token_id(4) || to_token_id(4) || b_star_from(8)
//!               || b_star_to(8) || fee(8) || r_star(32) || pk(32) || receiver_pk(32)
//!               || c(64) || c_star(64) || receiver_c(64) || receiver_c_star(64)
//!               || t(32) || ht1(32) || ht2(32) || pt1(32) || pt2(32)
//!               || t_div_cr_prime(32) || cl_prime_inv(32)
//! commitments = a_pk || a_t_div_cr_prime || a_pt1 || a_pt2
//! bit         = com || c0 || c1 || z0 || z1
//! commitment  = statement || commitments || bit * RANGE_BITS
//! part        = commitment || z_rbar || z_sk || z_sk_inv
//! swap proof  = part(first) || part(second) || challenge
//! ```
//!
//! Integers and scalars are big-endian, points compressed Ristretto.

use alloc::vec::Vec;

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use parity_scale_codec::{Decode, Encode, EncodeLike, Input, MaxEncodedLen, Output};
use scale_info::{build::Fields, Path, Type, TypeInfo};

use crate::{
    point_from_bytes, scalar_from_be_bytes, scalar_to_be_bytes, types::*, Ciphertext, Error,
    RANGE_BITS,
};

pub const POINT_LEN: usize = 32;
pub const SCALAR_LEN: usize = 32;
pub const CIPHERTEXT_LEN: usize = 2 * POINT_LEN;

pub const STATEMENT_LEN: usize =
    1 + 4 + 4 + 8 + 8 + 8 + SCALAR_LEN + 2 * POINT_LEN + 4 * CIPHERTEXT_LEN + 7 * POINT_LEN;
pub const SIGMA_COMMITMENTS_LEN: usize = 4 * POINT_LEN;
pub const BIT_PROOF_LEN: usize = POINT_LEN + 4 * SCALAR_LEN;
pub const RANGE_PROOF_LEN: usize = RANGE_BITS * BIT_PROOF_LEN;
pub const COMMITMENT_LEN: usize = STATEMENT_LEN + SIGMA_COMMITMENTS_LEN + RANGE_PROOF_LEN;
pub const RESPONSES_LEN: usize = 3 * SCALAR_LEN;
pub const PART_LEN: usize = COMMITMENT_LEN + RESPONSES_LEN;
pub const SWAP_PROOF_LEN: usize = 2 * PART_LEN + SCALAR_LEN;

/// Cursor over a fixed layout.
struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        if self.bytes.len() < N {
            return Err(Error::Malformed);
        }
        let (head, rest) = self.bytes.split_at(N);
        self.bytes = rest;
        let mut out = [0u8; N];
        out.copy_from_slice(head);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, Error> {
        Ok(self.take::<1>()?[0])
    }

    fn u32(&mut self) -> Result<u32, Error> {
        Ok(u32::from_be_bytes(self.take()?))
    }

    fn i64(&mut self) -> Result<i64, Error> {
        Ok(i64::from_be_bytes(self.take()?))
    }

    fn point(&mut self) -> Result<RistrettoPoint, Error> {
        point_from_bytes(&self.take()?)
    }

    fn scalar(&mut self) -> Result<Scalar, Error> {
        scalar_from_be_bytes(&self.take()?)
    }

    fn ciphertext(&mut self) -> Result<Ciphertext, Error> {
        Ciphertext::from_bytes(&self.take::<CIPHERTEXT_LEN>()?)
    }
}

fn put_point(out: &mut Vec<u8>, p: &RistrettoPoint) {
    out.extend_from_slice(p.compress().as_bytes());
}

fn put_scalar(out: &mut Vec<u8>, s: &Scalar) {
    out.extend_from_slice(&scalar_to_be_bytes(s));
}

fn exact_len(bytes: &[u8], expected: usize) -> Result<(), Error> {
    if bytes.len() != expected {
        return Err(Error::Length {
            expected,
            got: bytes.len(),
        });
    }
    Ok(())
}

impl SwapStatement {
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.side.to_byte());
        out.extend_from_slice(&self.from_token_id.to_be_bytes());
        out.extend_from_slice(&self.to_token_id.to_be_bytes());
        out.extend_from_slice(&self.b_star_from.to_be_bytes());
        out.extend_from_slice(&self.b_star_to.to_be_bytes());
        out.extend_from_slice(&self.fee.to_be_bytes());
        put_scalar(out, &self.r_star);
        put_point(out, &self.pk);
        put_point(out, &self.receiver_pk);
        for ct in [&self.c, &self.c_star, &self.receiver_c, &self.receiver_c_star] {
            out.extend_from_slice(&ct.to_bytes());
        }
        for p in [
            &self.t,
            &self.ht1,
            &self.ht2,
            &self.pt1,
            &self.pt2,
            &self.t_div_cr_prime,
            &self.cl_prime_inv,
        ] {
            put_point(out, p);
        }
    }

    fn decode_from(r: &mut Reader<'_>) -> Result<Self, Error> {
        let side = SwapSide::from_byte(r.u8()?).ok_or(Error::Malformed)?;
        Ok(Self {
            side,
            from_token_id: r.u32()?,
            to_token_id: r.u32()?,
            b_star_from: r.i64()?,
            b_star_to: r.i64()?,
            fee: r.i64()?,
            r_star: r.scalar()?,
            pk: r.point()?,
            receiver_pk: r.point()?,
            c: r.ciphertext()?,
            c_star: r.ciphertext()?,
            receiver_c: r.ciphertext()?,
            receiver_c_star: r.ciphertext()?,
            t: r.point()?,
            ht1: r.point()?,
            ht2: r.point()?,
            pt1: r.point()?,
            pt2: r.point()?,
            t_div_cr_prime: r.point()?,
            cl_prime_inv: r.point()?,
        })
    }
}

impl SwapCommitment {
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        self.statement.encode_into(out);
        let a = &self.commitments;
        for p in [&a.a_pk, &a.a_t_div_cr_prime, &a.a_pt1, &a.a_pt2] {
            put_point(out, p);
        }
        for bit in &self.range_proof.bits {
            put_point(out, &bit.commitment);
            for s in [&bit.c0, &bit.c1, &bit.z0, &bit.z1] {
                put_scalar(out, s);
            }
        }
    }

    /// Canonical bytes; this is what the shared challenge absorbs.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(COMMITMENT_LEN);
        self.encode_into(&mut out);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        exact_len(bytes, COMMITMENT_LEN)?;
        Self::decode_from(&mut Reader { bytes })
    }

    fn decode_from(r: &mut Reader<'_>) -> Result<Self, Error> {
        let statement = SwapStatement::decode_from(r)?;
        let commitments = SigmaCommitments {
            a_pk: r.point()?,
            a_t_div_cr_prime: r.point()?,
            a_pt1: r.point()?,
            a_pt2: r.point()?,
        };
        let mut bits = Vec::with_capacity(RANGE_BITS);
        for _ in 0..RANGE_BITS {
            bits.push(BitProof {
                commitment: r.point()?,
                c0: r.scalar()?,
                c1: r.scalar()?,
                z0: r.scalar()?,
                z1: r.scalar()?,
            });
        }
        Ok(Self {
            statement,
            commitments,
            range_proof: RangeProof { bits },
        })
    }
}

impl SwapProofPart {
    fn encode_into(&self, out: &mut Vec<u8>) {
        self.commitment.encode_into(out);
        put_scalar(out, &self.responses.z_rbar);
        put_scalar(out, &self.responses.z_sk);
        put_scalar(out, &self.responses.z_sk_inv);
    }

    fn decode_from(r: &mut Reader<'_>) -> Result<Self, Error> {
        Ok(Self {
            commitment: SwapCommitment::decode_from(r)?,
            responses: SwapResponses {
                z_rbar: r.scalar()?,
                z_sk: r.scalar()?,
                z_sk_inv: r.scalar()?,
            },
        })
    }
}

impl SwapProof {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SWAP_PROOF_LEN);
        self.first.encode_into(&mut out);
        self.second.encode_into(&mut out);
        put_scalar(&mut out, &self.challenge);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        exact_len(bytes, SWAP_PROOF_LEN)?;
        let mut r = Reader { bytes };
        Ok(Self {
            first: SwapProofPart::decode_from(&mut r)?,
            second: SwapProofPart::decode_from(&mut r)?,
            challenge: r.scalar()?,
        })
    }
}

// ----- SCALE: an opaque fixed-size blob inside transaction envelopes -----

impl Encode for SwapProof {
    fn size_hint(&self) -> usize {
        SWAP_PROOF_LEN
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.write(&self.to_bytes());
    }
}

impl EncodeLike for SwapProof {}

impl Decode for SwapProof {
    fn decode<I: Input>(input: &mut I) -> Result<Self, parity_scale_codec::Error> {
        let mut buf = alloc::vec![0u8; SWAP_PROOF_LEN];
        input.read(&mut buf)?;
        SwapProof::from_bytes(&buf).map_err(|_| "invalid swap proof encoding".into())
    }
}

impl MaxEncodedLen for SwapProof {
    fn max_encoded_len() -> usize {
        SWAP_PROOF_LEN
    }
}

impl TypeInfo for SwapProof {
    type Identity = Self;

    fn type_info() -> Type {
        Type::builder()
            .path(Path::new("SwapProof", module_path!()))
            .composite(Fields::unnamed().field(|f| {
                f.ty::<[u8; SWAP_PROOF_LEN]>()
                    .type_name("[u8; SWAP_PROOF_LEN]")
            }))
    }
}

// ----- serde for off-chain code: hex when human readable, raw bytes otherwise -----
#[cfg(feature = "std")]
pub(crate) mod serde_impls {
    use super::*;
    use core::fmt;
    use serde::{
        de::{Error as _, SeqAccess, Visitor},
        Deserialize, Deserializer, Serialize, Serializer,
    };

    fn serialize_blob<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.serialize_str(&hex::encode(bytes))
        } else {
            s.serialize_bytes(bytes)
        }
    }

    /// Accepts a hex string or raw bytes, whichever the format hands over.
    pub(crate) struct BlobVisitor;

    impl<'de> Visitor<'de> for BlobVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a hex string or a byte array")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Vec<u8>, E> {
            hex::decode(v.trim_start_matches("0x")).map_err(E::custom)
        }

        fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Vec<u8>, E> {
            Ok(v.to_vec())
        }

        fn visit_byte_buf<E: serde::de::Error>(self, v: Vec<u8>) -> Result<Vec<u8>, E> {
            Ok(v)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<u8>, A::Error> {
            let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(SWAP_PROOF_LEN));
            while let Some(b) = seq.next_element::<u8>()? {
                out.push(b);
            }
            Ok(out)
        }
    }

    pub(crate) fn deserialize_blob<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        if d.is_human_readable() {
            d.deserialize_str(BlobVisitor)
        } else {
            d.deserialize_byte_buf(BlobVisitor)
        }
    }

    impl Serialize for Ciphertext {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            serialize_blob(&self.to_bytes(), s)
        }
    }

    impl<'de> Deserialize<'de> for Ciphertext {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let bytes = deserialize_blob(d)?;
            Ciphertext::from_bytes(&bytes).map_err(D::Error::custom)
        }
    }

    impl Serialize for SwapProof {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            serialize_blob(&self.to_bytes(), s)
        }
    }

    impl<'de> Deserialize<'de> for SwapProof {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let bytes = deserialize_blob(d)?;
            SwapProof::from_bytes(&bytes).map_err(D::Error::custom)
        }
    }
}
