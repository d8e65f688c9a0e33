//! Twisted ElGamal over Ristretto and the Pedersen commitment it shares generators with.
//!
//! A ciphertext of `v` under `pk` with randomness `r` is
//! `CL = r·pk`, `CR = r·G + v·H`. The `CR` half is a Pedersen commitment to `v`,
//! so ciphertexts, range-proof bit commitments and `T` all live in the same
//! `(G, H)` basis and can be summed.

use core::ops::{Add, Neg, Sub};

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};

use crate::{point_from_bytes, Error, G, H};

/// Encrypted amount. The two halves are never handled separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub cl: RistrettoPoint,
    pub cr: RistrettoPoint,
}

impl Ciphertext {
    /// `Enc(value, r, pk) = (r·pk, r·G + value·H)`.
    pub fn encrypt(value: i64, r: &Scalar, pk: &RistrettoPoint) -> Self {
        Self {
            cl: r * pk,
            cr: r * G + scalar_from_i64(value) * *H,
        }
    }

    /// Check that this ciphertext, held under the key `sk`, encrypts `value`:
    /// `value·H == CR - sk⁻¹·CL`.
    ///
    /// This is not decryption; it only confirms a claimed plaintext.
    pub fn opens_to(&self, value: i64, sk: &Scalar) -> bool {
        if *sk == Scalar::ZERO {
            return false;
        }
        let hb = self.cr - sk.invert() * self.cl;
        crate::ct_eq_point(&hb, &(scalar_from_i64(value) * *H))
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[0..32].copy_from_slice(self.cl.compress().as_bytes());
        out[32..64].copy_from_slice(self.cr.compress().as_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 64 {
            return Err(Error::Length {
                expected: 64,
                got: bytes.len(),
            });
        }
        let mut cl = [0u8; 32];
        let mut cr = [0u8; 32];
        cl.copy_from_slice(&bytes[0..32]);
        cr.copy_from_slice(&bytes[32..64]);
        Ok(Self {
            cl: point_from_bytes(&cl)?,
            cr: point_from_bytes(&cr)?,
        })
    }
}

/// Homomorphic addition: `Enc(v1, r1) + Enc(v2, r2) = Enc(v1 + v2, r1 + r2)` under the same key.
impl Add for Ciphertext {
    type Output = Ciphertext;

    fn add(self, rhs: Ciphertext) -> Ciphertext {
        Ciphertext {
            cl: self.cl + rhs.cl,
            cr: self.cr + rhs.cr,
        }
    }
}

impl Sub for Ciphertext {
    type Output = Ciphertext;

    fn sub(self, rhs: Ciphertext) -> Ciphertext {
        self + (-rhs)
    }
}

impl Neg for Ciphertext {
    type Output = Ciphertext;

    fn neg(self) -> Ciphertext {
        Ciphertext {
            cl: -self.cl,
            cr: -self.cr,
        }
    }
}

/// Pedersen commitment `blinding·G + value·H`.
pub fn pedersen_commit(blinding: &Scalar, value: &Scalar) -> RistrettoPoint {
    blinding * G + value * *H
}

/// Generator image of a token id, `id·H`. Binds a proof to one asset pair.
pub fn token_generator(token_id: u32) -> RistrettoPoint {
    Scalar::from(token_id) * *H
}

/// Signed amount as a scalar; negative values map to the additive inverse.
pub fn scalar_from_i64(v: i64) -> Scalar {
    if v >= 0 {
        Scalar::from(v as u64)
    } else {
        -Scalar::from(v.unsigned_abs())
    }
}

/// `TDivCRprime = T - (C.CR + CStar.CR)`.
pub fn t_div_cr_prime(t: &RistrettoPoint, c: &Ciphertext, c_star: &Ciphertext) -> RistrettoPoint {
    t - (c.cr + c_star.cr)
}

/// `CLprimeInv = -(C.CL + CStar.CL)`.
pub fn cl_prime_inv(c: &Ciphertext, c_star: &Ciphertext) -> RistrettoPoint {
    -(c.cl + c_star.cl)
}
