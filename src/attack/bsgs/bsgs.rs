use std::collections::HashMap;
use log::debug;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use crate::elgamal::math::{power, mod_inverse_prime};
use crate::crypto_error::CryptoError;

/// Nombre maximal d'entrées de la table des pas de bébé (≈ 2^52 d'ordre couvert).
pub const MAX_BSGS_TABLE: u64 = 1 << 26;

/// Baby-Step Giant-Step : trouve x dans `[0, order)` avec `g^x ≡ y (mod p)`.
///
/// `p` doit être premier (l'inverse de `g` est calculé par Fermat). Coût en
/// temps et en mémoire O(sqrt(order)), borné par [`MAX_BSGS_TABLE`].
pub fn bsgs_solve(
    g: &BigUint,
    y: &BigUint,
    p: &BigUint,
    order: &BigUint,
) -> Result<BigUint, CryptoError> {
    bsgs_solve_bounded(g, y, p, order, MAX_BSGS_TABLE)
}

/// Même chose que [`bsgs_solve`] avec une borne explicite sur la table.
pub fn bsgs_solve_bounded(
    g: &BigUint,
    y: &BigUint,
    p: &BigUint,
    order: &BigUint,
    max_table: u64,
) -> Result<BigUint, CryptoError> {
    if p < &BigUint::from(2u32) {
        return Err(CryptoError::InvalidInput(format!("module p = {p} < 2")));
    }
    if order.is_zero() {
        return Err(CryptoError::InvalidInput("ordre nul".to_string()));
    }

    // m = ceil(sqrt(order))
    let mut m_big = order.sqrt();
    if &m_big * &m_big < *order {
        m_big += 1u32;
    }
    let m = match m_big.to_u64() {
        Some(m) if m <= max_table => m,
        _ => {
            return Err(CryptoError::BsgsTableTooLarge {
                requested: m_big.to_string(),
                maximum:   max_table,
            })
        }
    };

    let g = g % p;
    let y = y % p;

    // Pas de bébé : g^j -> j, la première occurrence est conservée
    let mut baby_steps: HashMap<BigUint, u64> = HashMap::with_capacity(m as usize);
    let mut g_j = BigUint::one() % p;
    for j in 0..m {
        baby_steps.entry(g_j.clone()).or_insert(j);
        g_j = (&g_j * &g) % p;
    }

    // Pas de géant : facteur (g^-1)^m mod p
    let g_inv = mod_inverse_prime(&g, p)?;
    let factor = power(&g_inv, &m_big, p)?;

    let mut gamma = y;
    for i in 0..m {
        if let Some(&j) = baby_steps.get(&gamma) {
            let x = BigUint::from(i) * &m_big + BigUint::from(j);
            if &x < order {
                debug!("BSGS : x = {x} trouvé au pas de géant {i}/{m}");
                return Ok(x);
            }
            break;
        }
        gamma = (&gamma * &factor) % p;
    }

    Err(CryptoError::DiscreteLogNotFound { order: order.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_small_known_log() {
        assert_eq!(bsgs_solve(&big(5), &big(8), &big(23), &big(22)).unwrap(), big(6));
    }

    #[test]
    fn test_every_log_in_small_group() {
        // 5 engendre (Z/23Z)* : chaque x de [0, 22) est retrouvé
        for x in 0..22u64 {
            let y = big(5).modpow(&big(x), &big(23));
            assert_eq!(bsgs_solve(&big(5), &y, &big(23), &big(22)).unwrap(), big(x));
        }
    }

    #[test]
    fn test_larger_prime() {
        let p = big(1_000_000_007);
        let g = big(5);
        let x = big(987_654_321);
        let y = g.modpow(&x, &p);
        let found = bsgs_solve(&g, &y, &p, &(&p - 1u32)).unwrap();
        assert_eq!(g.modpow(&found, &p), y);
        assert_eq!(found, x);
    }

    #[test]
    fn test_not_found_within_bound() {
        // 5^6 = 8 mais on ne cherche que dans [0, 4)
        assert!(matches!(
            bsgs_solve(&big(5), &big(8), &big(23), &big(4)),
            Err(CryptoError::DiscreteLogNotFound { .. })
        ));
        // 2 engendre un sous-groupe d'ordre 11 mod 23 ; 5 n'y est pas
        assert!(matches!(
            bsgs_solve(&big(2), &big(5), &big(23), &big(11)),
            Err(CryptoError::DiscreteLogNotFound { .. })
        ));
    }

    #[test]
    fn test_table_bound_and_invalid_input() {
        assert!(matches!(
            bsgs_solve_bounded(&big(5), &big(8), &big(23), &big(22), 3),
            Err(CryptoError::BsgsTableTooLarge { .. })
        ));
        assert!(matches!(
            bsgs_solve(&big(5), &big(8), &big(23), &big(0)),
            Err(CryptoError::InvalidInput(_))
        ));
        assert!(matches!(
            bsgs_solve(&big(0), &big(8), &big(23), &big(22)),
            Err(CryptoError::NoModularInverse)
        ));
    }
}
