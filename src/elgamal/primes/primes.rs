use log::debug;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use rand::seq::SliceRandom;
use rand_core::RngCore;
use crate::crypto_error::CryptoError;

/// Nombre de tours Miller-Rabin utilisé partout par défaut.
pub const DEFAULT_MR_ROUNDS: u32 = 100;

/// Nombre maximal de tirages avant d'abandonner une recherche de premier.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 1 << 22;

// ---------------------------------------------------------------------------
// Table de petits premiers impairs (crible préliminaire, couvre jusqu'à 997)
// Sert aussi de réservoir de facteurs pour generate_smooth_prime.
// ---------------------------------------------------------------------------
const SMALL_PRIMES: &[u64] = &[
      3,   5,   7,  11,  13,  17,  19,  23,  29,  31,
     37,  41,  43,  47,  53,  59,  61,  67,  71,  73,
     79,  83,  89,  97, 101, 103, 107, 109, 113, 127,
    131, 137, 139, 149, 151, 157, 163, 167, 173, 179,
    181, 191, 193, 197, 199, 211, 223, 227, 229, 233,
    239, 241, 251, 257, 263, 269, 271, 277, 281, 283,
    293, 307, 311, 313, 317, 331, 337, 347, 349, 353,
    359, 367, 373, 379, 383, 389, 397, 401, 409, 419,
    421, 431, 433, 439, 443, 449, 457, 461, 463, 467,
    479, 487, 491, 499, 503, 509, 521, 523, 541, 547,
    557, 563, 569, 571, 577, 587, 593, 599, 601, 607,
    613, 617, 619, 631, 641, 643, 647, 653, 659, 661,
    673, 677, 683, 691, 701, 709, 719, 727, 733, 739,
    743, 751, 757, 761, 769, 773, 787, 797, 809, 811,
    821, 823, 827, 829, 839, 853, 857, 859, 863, 877,
    881, 883, 887, 907, 911, 919, 929, 937, 941, 947,
    953, 967, 971, 977, 983, 991, 997,
];

/// Réglages d'une recherche de premier aléatoire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimeSearch {
    /// Tours de Miller-Rabin par candidat
    pub rounds: u32,
    /// Borne sur le nombre de tirages ; `None` = recherche non bornée
    pub max_attempts: Option<u64>,
}

impl Default for PrimeSearch {
    fn default() -> Self {
        PrimeSearch {
            rounds:       DEFAULT_MR_ROUNDS,
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        }
    }
}

impl PrimeSearch {
    fn check_budget(&self, attempts: u64) -> Result<(), CryptoError> {
        match self.max_attempts {
            Some(max) if attempts >= max => Err(CryptoError::PrimeSearchExhausted { attempts }),
            _ => Ok(()),
        }
    }
}

// n mod sp pour un petit premier sp (le reste tient toujours dans un u64)
fn small_rem(n: &BigUint, sp: u64) -> u64 {
    (n % sp).to_u64().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Test de primalité de Miller-Rabin
//
// Version canonique : une base a est témoin de non-primalité si a^d n'est ni
// 1 ni n-1 et qu'aucune des s-1 mises au carré n'atteint n-1. L'ancien outil
// ne rejetait que lorsque la dernière valeur était paire, ce qui laissait
// passer des composés ; ce test-là n'est volontairement pas reproduit.
//
// Les n sous 997² sont tranchés exactement par le crible.
// ---------------------------------------------------------------------------
pub fn is_probable_prime(n: &BigUint, rounds: u32, rng: &mut impl RngCore) -> bool {
    let two = BigUint::from(2u32);
    if n < &two { return false; }
    if n == &two || n == &BigUint::from(3u32) { return true; }
    if n.is_even() { return false; }

    for &sp in SMALL_PRIMES {
        if n == &BigUint::from(sp) { return true; }
        if small_rem(n, sp) == 0 { return false; }
    }
    let largest = SMALL_PRIMES[SMALL_PRIMES.len() - 1];
    if n < &BigUint::from(largest * largest) { return true; }

    let n_minus_1 = n - BigUint::one();
    let mut d = n_minus_1.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_1 {
            continue 'witness;
        }
        for _ in 0..s.saturating_sub(1) {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

// Entier impair aléatoire d'exactement `bit_size` bits (bit de poids fort forcé)
fn random_odd_candidate(bit_size: u64, rng: &mut impl RngCore) -> BigUint {
    let mut candidate = rng.gen_biguint(bit_size);
    candidate.set_bit(bit_size - 1, true);
    candidate.set_bit(0, true);
    candidate
}

// ---------------------------------------------------------------------------
// Premier aléatoire d'exactement `bit_size` bits
// ---------------------------------------------------------------------------
pub fn generate_prime(
    bit_size: u64,
    search: &PrimeSearch,
    rng: &mut impl RngCore,
) -> Result<BigUint, CryptoError> {
    if bit_size < 2 {
        return Err(CryptoError::KeySizeTooSmall { requested: bit_size, minimum: 2 });
    }

    let mut attempts = 0u64;
    loop {
        search.check_budget(attempts)?;
        attempts += 1;

        let candidate = random_odd_candidate(bit_size, rng);
        if is_probable_prime(&candidate, search.rounds, rng) {
            debug!("premier de {bit_size} bits trouvé après {attempts} tirages");
            return Ok(candidate);
        }
    }
}

// ---------------------------------------------------------------------------
// Safe prime p de `bit_size` bits : p premier et (p-1)/2 premier
//
// Le groupe multiplicatif mod p est alors d'ordre 2·p', ses seuls
// sous-groupes non triviaux sont d'ordre 2 et p' : Pohlig-Hellman n'a
// rien à décomposer.
// ---------------------------------------------------------------------------
pub fn generate_safe_prime(
    bit_size: u64,
    search: &PrimeSearch,
    rng: &mut impl RngCore,
) -> Result<BigUint, CryptoError> {
    if bit_size < 3 {
        return Err(CryptoError::KeySizeTooSmall { requested: bit_size, minimum: 3 });
    }

    let two = BigUint::from(2u32);
    let mut drawn = 0u64;
    loop {
        search.check_budget(drawn)?;
        drawn += 1;

        let p = generate_prime(bit_size, search, rng)?;
        let sophie_germain: BigUint = (&p - BigUint::one()) >> 1u32;

        // p ≡ 1 (mod 4) : (p-1)/2 est pair, inutile de lancer Miller-Rabin
        if sophie_germain.is_even() && sophie_germain != two {
            continue;
        }

        if is_probable_prime(&sophie_germain, search.rounds, rng) {
            debug!("safe prime de {bit_size} bits trouvé après {drawn} premiers");
            return Ok(p);
        }
    }
}

// ---------------------------------------------------------------------------
// Premier faible p avec p-1 = 2 · (produit de petits premiers impairs distincts)
//
// Retourne p (au moins `bit_size` bits) et la liste complète des facteurs
// premiers de p-1, triée, 2 compris. C'est exactement le module que
// Pohlig-Hellman sait casser.
// ---------------------------------------------------------------------------
pub fn generate_smooth_prime(
    bit_size: u64,
    search: &PrimeSearch,
    rng: &mut impl RngCore,
) -> Result<(BigUint, Vec<BigUint>), CryptoError> {
    if bit_size < 3 {
        return Err(CryptoError::KeySizeTooSmall { requested: bit_size, minimum: 3 });
    }

    let mut pool: Vec<u64> = SMALL_PRIMES.to_vec();
    let mut attempts = 0u64;
    loop {
        search.check_budget(attempts)?;
        attempts += 1;

        pool.shuffle(rng);

        let mut product = BigUint::from(2u32);
        let mut factors = vec![2u64];
        for &sp in pool.iter() {
            if product.bits() >= bit_size {
                break;
            }
            product *= sp;
            factors.push(sp);
        }
        if product.bits() < bit_size {
            return Err(CryptoError::InvalidInput(format!(
                "{bit_size} bits dépassent ce que les petits premiers de la table peuvent couvrir"
            )));
        }

        // product est pair, +1 ne change pas le nombre de bits
        let p = product + BigUint::one();
        if is_probable_prime(&p, search.rounds, rng) {
            factors.sort_unstable();
            debug!(
                "premier friable de {} bits trouvé après {attempts} essais ({} facteurs)",
                p.bits(),
                factors.len()
            );
            return Ok((p, factors.into_iter().map(BigUint::from).collect()));
        }
    }
}
