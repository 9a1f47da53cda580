use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use crate::crypto_error::CryptoError;

// ---------------------------------------------------------------------------
// Exponentiation modulaire : base^exp mod modulus
//
// BigUint::modpow panique sur un module nul ; on le refuse ici pour que les
// valeurs venant de l'utilisateur ne puissent pas faire tomber le binaire.
// ---------------------------------------------------------------------------
pub fn power(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> Result<BigUint, CryptoError> {
    if modulus.is_zero() {
        return Err(CryptoError::InvalidInput("module nul".to_string()));
    }
    Ok(base.modpow(exp, modulus))
}

// ---------------------------------------------------------------------------
// Inverse modulaire par le petit théorème de Fermat : a^(p-2) mod p
//
// Valide uniquement pour p premier. Le résultat est vérifié (a·inv ≡ 1) :
//   a ≡ 0 (mod p)          -> Err(NoModularInverse)
//   inverse de Fermat faux -> Err(CompositeModulus), p n'est pas premier
// ---------------------------------------------------------------------------
pub fn mod_inverse_prime(a: &BigUint, p: &BigUint) -> Result<BigUint, CryptoError> {
    if p < &BigUint::from(2u32) {
        return Err(CryptoError::InvalidInput(format!("module {p} < 2")));
    }

    let a = a % p;
    if a.is_zero() {
        return Err(CryptoError::NoModularInverse);
    }

    let inv = power(&a, &(p - BigUint::from(2u32)), p)?;
    if (&a * &inv) % p != BigUint::one() {
        return Err(CryptoError::CompositeModulus);
    }
    Ok(inv)
}

/// Algorithme d'Euclide étendu.
///
/// Retourne `(x, y, gcd)` tels que `a*x + b*y = gcd`. Les coefficients sont
/// signés, le pgcd ne l'est pas.
pub fn extended_gcd(a: &BigUint, b: &BigUint) -> (BigInt, BigInt, BigUint) {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let temp_r = r.clone();
        r = old_r - &quotient * &r;
        old_r = temp_r;

        let temp_s = s.clone();
        s = old_s - &quotient * &s;
        old_s = temp_s;

        let temp_t = t.clone();
        t = old_t - &quotient * &t;
        old_t = temp_t;
    }

    // old_r >= 0 : a et b sont positifs
    let gcd_val = old_r.to_biguint().unwrap_or_default();

    (old_s, old_t, gcd_val)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_power_small_values() {
        assert_eq!(power(&big(5), &big(6), &big(23)).unwrap(), big(8));
        assert_eq!(power(&big(7), &big(0), &big(13)).unwrap(), big(1));
        assert_eq!(power(&big(7), &big(3), &big(1)).unwrap(), big(0));
    }

    #[test]
    fn test_power_rejects_zero_modulus() {
        assert!(matches!(
            power(&big(2), &big(3), &big(0)),
            Err(CryptoError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_mod_inverse_prime() {
        // 8 · 3 = 24 ≡ 1 (mod 23)
        assert_eq!(mod_inverse_prime(&big(8), &big(23)).unwrap(), big(3));
        // réduit d'abord modulo p
        assert_eq!(mod_inverse_prime(&big(31), &big(23)).unwrap(), big(3));
    }

    #[test]
    fn test_mod_inverse_prime_zero_has_no_inverse() {
        assert_eq!(
            mod_inverse_prime(&big(46), &big(23)),
            Err(CryptoError::NoModularInverse)
        );
    }

    #[test]
    fn test_mod_inverse_prime_detects_composite_modulus() {
        // 2^(15-2) mod 15 = 2, et 2·2 = 4 != 1 : 15 n'est pas premier
        assert_eq!(
            mod_inverse_prime(&big(2), &big(15)),
            Err(CryptoError::CompositeModulus)
        );
    }

    #[test]
    fn test_extended_gcd_bezout_identity() {
        let (a, b) = (big(240), big(46));
        let (x, y, g) = extended_gcd(&a, &b);
        assert_eq!(g, big(2));
        let lhs = BigInt::from(a) * &x + BigInt::from(b) * &y;
        assert_eq!(lhs, BigInt::from(2));
    }
}
