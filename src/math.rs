pub mod prime;
use num::{BigInt, BigUint, Integer, One, Zero};
use num::bigint::ToBigInt;
use more_asserts as ma;

/// Square-and-multiply `base^exponent mod modulus`.
///
/// A modulus of one always yields zero.
pub fn modular_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    let mut exponent = exponent.clone();
    if modulus.is_one() {
        BigUint::ZERO
    }
    else {
        let mut result = BigUint::from(1u8);
        let mut base = base % modulus;
        while exponent > BigUint::ZERO {
            if exponent.is_odd() {
                result = result * &base % modulus;
            }
            exponent >>= 1;
            base = &base * &base % modulus;
        }
        result
    }
}

pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Extended Euclid. Returns `(g, x, y)` with `a*x + b*y == g`.
pub fn xgcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let mut a = a.clone();
    let mut b = b.clone();
    let mut x0 = BigInt::from(1u8);
    let mut x1 = BigInt::ZERO;
    let mut y0 = BigInt::ZERO;
    let mut y1 = BigInt::from(1u8);
    while b > BigInt::ZERO {
        let (q, r) = a.div_rem(&b);
        let x0_old = x0;
        x0 = x1.clone();
        x1 = x0_old - &q * x1;
        let y0_old = y0;
        y0 = y1.clone();
        y1 = y0_old - &q * y1;

        a = b;
        b = r;
    }
    (a, x0, y0)
}

/// Inverse of `e` modulo `phi` in `[0, phi)`, or `None` when the two share a
/// factor.
pub fn multiplicative_inverse(e: &BigUint, phi: &BigUint) -> Option<BigUint> {
    let signed_e = e.to_bigint()?;
    let signed_phi = phi.to_bigint()?;
    let (g, x, _) = xgcd(&signed_e, &signed_phi);
    if !g.is_one() {
        return None
    }
    let inverse = x.mod_floor(&signed_phi);
    ma::assert_ge!(inverse, BigInt::ZERO);
    ma::assert_lt!(inverse, signed_phi);
    inverse.to_biguint()
}

/// Reduces a signed value into `[0, modulus)`. A zero modulus gives zero.
pub fn reduce(value: &BigInt, modulus: &BigUint) -> BigUint {
    match modulus.to_bigint() {
        Some(modulus) if !modulus.is_zero() => value
            .mod_floor(&modulus)
            .to_biguint()
            .unwrap_or_default(),
        _ => BigUint::ZERO
    }
}
