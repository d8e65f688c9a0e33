//! The four sigma equations of one leg.
//!
//! ```text
//! Z_sk·G                          == A_pk          + c·pk
//! Z_sk·Ht1                        == A_Pt1         + c·Pt1
//! Z_sk·Ht2                        == A_Pt2         + c·Pt2
//! Z_rbar·G + Z_skInv·CLprimeInv   == A_TDivCRprime + c·TDivCRprime
//! ```
//!
//! One `Z_sk` across the first three ties the public key and both token-linkage
//! points to the same secret key. The last one is the exponent form of
//! `TDivCRprime = rBar·G + sk⁻¹·CLprimeInv`.

use curve25519_dalek::scalar::Scalar;

use crate::{ct_eq_point, SigmaCommitments, SwapResponses, SwapStatement, G};

/// Returns the name of the first equation that fails.
pub fn check_equations(
    s: &SwapStatement,
    a: &SigmaCommitments,
    z: &SwapResponses,
    c: &Scalar,
) -> Result<(), &'static str> {
    if !ct_eq_point(&(z.z_sk * G), &(a.a_pk + c * s.pk)) {
        return Err("pk");
    }
    if !ct_eq_point(&(z.z_sk * s.ht1), &(a.a_pt1 + c * s.pt1)) {
        return Err("pt1");
    }
    if !ct_eq_point(&(z.z_sk * s.ht2), &(a.a_pt2 + c * s.pt2)) {
        return Err("pt2");
    }
    let lhs = z.z_rbar * G + z.z_sk_inv * s.cl_prime_inv;
    if !ct_eq_point(&lhs, &(a.a_t_div_cr_prime + c * s.t_div_cr_prime)) {
        return Err("t_div_cr_prime");
    }
    Ok(())
}
