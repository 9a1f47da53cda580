use log::{info, warn};
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand_core::RngCore;
use zeroize::Zeroize;
use crate::elgamal::math::power;
use crate::elgamal::primes::{generate_safe_prime, generate_smooth_prime, PrimeSearch};
use crate::crypto_error::CryptoError;

// En dessous de cette taille, le logarithme discret reste à portée de BSGS
pub const RECOMMENDED_KEY_BITS: u64 = 128;

// ============================================================================
// Clé publique ElGamal — (q, g, h), pas de données secrètes
// ============================================================================
#[derive(Clone, Debug, PartialEq)]
pub struct PublicKey {
    pub q: BigUint,
    pub g: BigUint,
    pub h: BigUint,
}

// ============================================================================
// Helper : efface les octets internes d'un BigUint
// ============================================================================
fn zeroize_biguint(n: &mut BigUint) {
    let bits = n.bits() as usize;
    if bits > 0 {
        *n = BigUint::from_bytes_be(&vec![0u8; (bits + 7) / 8]);
    }
    *n = BigUint::default();
}

// ============================================================================
// Clé secrète ElGamal — l'exposant x est ZEROISÉ À LA DESTRUCTION
//
// q est public, il est recopié ici pour que le déchiffrement n'ait besoin que
// de la clé secrète.
// ============================================================================
#[derive(Clone, Debug)]
pub struct SecretKey {
    pub q: BigUint,
    pub x: BigUint,
}

impl SecretKey {
    pub fn new(q: BigUint, x: BigUint) -> Self {
        SecretKey { q, x }
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        zeroize_biguint(&mut self.x);
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

// ============================================================================
// Paire de clés — immuable une fois construite, h toujours dérivé de (g, x)
// ============================================================================
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub secret_key: SecretKey,
}

impl KeyPair {
    /// Construit une paire à partir de valeurs connues et calcule `h = g^x mod q`.
    ///
    /// Aucun test de primalité n'est fait sur `q` : c'est à l'appelant de
    /// fournir un premier (vecteurs de test, modules faibles de démonstration).
    pub fn from_parts(q: BigUint, g: BigUint, x: BigUint) -> Result<Self, CryptoError> {
        if q < BigUint::from(3u32) {
            return Err(CryptoError::InvalidInput(format!("module q = {q} < 3")));
        }
        if g.is_zero() || g >= q {
            return Err(CryptoError::InvalidInput("g doit être dans [1, q-1]".to_string()));
        }
        if x >= q {
            return Err(CryptoError::InvalidInput("x doit être dans [0, q-1]".to_string()));
        }

        let h = power(&g, &x, &q)?;
        Ok(KeyPair {
            public_key: PublicKey { q: q.clone(), g, h },
            secret_key: SecretKey { q, x },
        })
    }
}

// Tire g dans [1, q-1] et x dans [0, q-1] au-dessus d'un module déjà choisi
fn keypair_over(q: BigUint, rng: &mut impl RngCore) -> Result<KeyPair, CryptoError> {
    let g = rng.gen_biguint_range(&BigUint::one(), &q);
    let x = rng.gen_biguint_below(&q);
    KeyPair::from_parts(q, g, x)
}

// ============================================================================
// Génération de clés ElGamal sur un safe prime
//
// Avec q = 2q'+1, l'ordre de g divise 2q' : la seule décomposition possible
// pour Pohlig-Hellman est {2, q'}, et q' est aussi gros que q.
// ============================================================================
pub fn eg_keygen(
    bit_size: u64,
    search: &PrimeSearch,
    rng: &mut impl RngCore,
) -> Result<KeyPair, CryptoError> {
    if bit_size < RECOMMENDED_KEY_BITS {
        warn!("module de {bit_size} bits : logarithme discret calculable, clé de test uniquement");
    }

    let q = generate_safe_prime(bit_size, search, rng)?;
    let kp = keypair_over(q, rng)?;
    info!("clé ElGamal générée : q de {} bits", kp.public_key.q.bits());
    Ok(kp)
}

// ============================================================================
// Génération volontairement FAIBLE : q-1 n'a que des petits facteurs
//
// Retourne aussi la factorisation de q-1, qui est tout ce dont
// Pohlig-Hellman a besoin pour retrouver x.
// ============================================================================
pub fn eg_keygen_weak(
    bit_size: u64,
    search: &PrimeSearch,
    rng: &mut impl RngCore,
) -> Result<(KeyPair, Vec<BigUint>), CryptoError> {
    warn!("génération d'une clé sur un module friable : cassable par Pohlig-Hellman");

    let (q, factors) = generate_smooth_prime(bit_size, search, rng)?;
    let kp = keypair_over(q, rng)?;
    info!(
        "clé ElGamal faible générée : q de {} bits, {} facteurs pour q-1",
        kp.public_key.q.bits(),
        factors.len()
    );
    Ok((kp, factors))
}
