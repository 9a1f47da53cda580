use log::warn;
use num_bigint::{BigUint, RandBigInt};
use rand_core::RngCore;
use crate::elgamal::math::power;
use crate::elgamal::eg_keygen::PublicKey;
use crate::crypto_error::CryptoError;

/// Chiffré ElGamal `(c1, c2)`, tous deux dans `[0, q)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub c1: BigUint,
    pub c2: BigUint,
}

// ---------------------------------------------------------------------------
// Chiffrement ElGamal : c1 = g^r mod q, c2 = m · h^r mod q
//
// Un r neuf est tiré dans [0, q-1] à chaque appel.
//
// CONTRAINTE : m doit être dans [0, q). Un m >= q est réduit modulo q avant
// chiffrement (comme l'outil d'origine) ; le déchiffrement rendra alors
// m mod q et non m. Cette perte est signalée par un warn!, pas corrigée.
// ---------------------------------------------------------------------------
pub fn eg_encrypt(
    m: &BigUint,
    pk: &PublicKey,
    rng: &mut impl RngCore,
) -> Result<Ciphertext, CryptoError> {
    check_modulus(pk)?;
    let r = rng.gen_biguint_below(&pk.q);
    eg_encrypt_with_ephemeral(m, &r, pk)
}

/// Chiffrement avec un exposant éphémère imposé.
///
/// Réservé aux vecteurs de test : réutiliser `r` pour deux messages révèle
/// leur quotient.
pub fn eg_encrypt_with_ephemeral(
    m: &BigUint,
    r: &BigUint,
    pk: &PublicKey,
) -> Result<Ciphertext, CryptoError> {
    check_modulus(pk)?;

    if m >= &pk.q {
        warn!("message >= q : réduit modulo q, le déchiffrement rendra m mod q");
    }

    let c1 = power(&pk.g, r, &pk.q)?;
    let h_r = power(&pk.h, r, &pk.q)?;
    let c2 = ((m % &pk.q) * h_r) % &pk.q;

    Ok(Ciphertext { c1, c2 })
}

fn check_modulus(pk: &PublicKey) -> Result<(), CryptoError> {
    if pk.q < BigUint::from(2u32) {
        return Err(CryptoError::InvalidInput(format!("module q = {} < 2", pk.q)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elgamal::eg_keygen::KeyPair;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toy_key() -> KeyPair {
        KeyPair::from_parts(BigUint::from(23u32), BigUint::from(5u32), BigUint::from(6u32)).unwrap()
    }

    #[test]
    fn test_known_vector() {
        let kp = toy_key();
        let ct = eg_encrypt_with_ephemeral(&BigUint::from(3u32), &BigUint::from(2u32), &kp.public_key)
            .unwrap();
        assert_eq!(ct, Ciphertext { c1: BigUint::from(2u32), c2: BigUint::from(8u32) });
    }

    #[test]
    fn test_message_is_reduced_mod_q() {
        let kp = toy_key();
        let r = BigUint::from(2u32);
        let reduced = eg_encrypt_with_ephemeral(&BigUint::from(3u32), &r, &kp.public_key).unwrap();
        let wrapped = eg_encrypt_with_ephemeral(&BigUint::from(26u32), &r, &kp.public_key).unwrap();
        assert_eq!(reduced, wrapped);
    }

    #[test]
    fn test_fresh_ephemeral_per_call() {
        let mut rng = StdRng::seed_from_u64(3);
        let kp = KeyPair::from_parts(
            BigUint::from(1_000_000_007u64),
            BigUint::from(5u32),
            BigUint::from(123_456u32),
        )
        .unwrap();
        let m = BigUint::from(42u32);
        let a = eg_encrypt(&m, &kp.public_key, &mut rng).unwrap();
        let b = eg_encrypt(&m, &kp.public_key, &mut rng).unwrap();
        assert_ne!(a, b);
        assert!(a.c1 < kp.public_key.q && a.c2 < kp.public_key.q);
    }

    #[test]
    fn test_rejects_degenerate_modulus() {
        let pk = PublicKey { q: BigUint::from(0u32), g: BigUint::from(1u32), h: BigUint::from(1u32) };
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            eg_encrypt(&BigUint::from(1u32), &pk, &mut rng),
            Err(CryptoError::InvalidInput(_))
        ));
    }
}
