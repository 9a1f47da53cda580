use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use crate::elgamal::math::extended_gcd;
use crate::crypto_error::CryptoError;

// ---------------------------------------------------------------------------
// Théorème chinois des restes
//
// Entrée : des couples (a_i, m_i) signifiant x ≡ a_i (mod m_i).
// Sortie : l'unique x de [0, P) avec P = Π m_i.
//
// Les modules doivent être deux à deux premiers entre eux. C'est équivalent
// à gcd(P/m_i, m_i) = 1 pour tout i, ce que l'Euclide étendu vérifie au
// passage : un système invalide donne Err(NonCoprimeModuli), jamais un x faux.
// ---------------------------------------------------------------------------
pub fn crt_combine(residues: &[(BigUint, BigUint)]) -> Result<BigUint, CryptoError> {
    if residues.is_empty() {
        return Err(CryptoError::InvalidInput("système CRT vide".to_string()));
    }
    if residues.iter().any(|(_, m)| m.is_zero()) {
        return Err(CryptoError::InvalidInput("module CRT nul".to_string()));
    }

    let product: BigUint = residues.iter().map(|(_, m)| m).product();
    let product_big = BigInt::from(product.clone());

    let mut result = BigInt::zero();
    for (a_i, m_i) in residues {
        let partial = &product / m_i;
        let (inv, _, g) = extended_gcd(&partial, m_i);
        if !g.is_one() {
            return Err(CryptoError::NonCoprimeModuli { modulus: m_i.to_string() });
        }
        result += BigInt::from(a_i % m_i) * BigInt::from(partial) * inv;
    }

    let mut reduced = result % &product_big;
    if reduced < BigInt::zero() {
        reduced += &product_big;
    }
    reduced.to_biguint().ok_or(CryptoError::NegativeConversion)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(pairs: &[(u64, u64)]) -> Vec<(BigUint, BigUint)> {
        pairs.iter().map(|&(a, m)| (BigUint::from(a), BigUint::from(m))).collect()
    }

    #[test]
    fn test_classic_example() {
        let x = crt_combine(&system(&[(2, 3), (3, 5), (2, 7)])).unwrap();
        assert_eq!(x, BigUint::from(23u32));
    }

    #[test]
    fn test_result_matches_every_residue() {
        let sys = system(&[(1, 4), (4, 9), (10, 11), (0, 13), (6, 25)]);
        let x = crt_combine(&sys).unwrap();
        assert!(x < BigUint::from(4u64 * 9 * 11 * 13 * 25));
        for (a, m) in &sys {
            assert_eq!(&x % m, a % m);
        }
    }

    #[test]
    fn test_single_modulus_and_unreduced_residue() {
        let x = crt_combine(&system(&[(17, 5)])).unwrap();
        assert_eq!(x, BigUint::from(2u32));
    }

    #[test]
    fn test_non_coprime_moduli_fail() {
        let res = crt_combine(&system(&[(1, 4), (3, 6)]));
        assert!(matches!(res, Err(CryptoError::NonCoprimeModuli { .. })));
    }

    #[test]
    fn test_empty_or_zero_modulus_fail() {
        assert!(matches!(crt_combine(&[]), Err(CryptoError::InvalidInput(_))));
        assert!(matches!(
            crt_combine(&system(&[(1, 3), (0, 0)])),
            Err(CryptoError::InvalidInput(_))
        ));
    }
}
