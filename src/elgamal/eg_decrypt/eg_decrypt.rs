use num_bigint::BigUint;
use crate::elgamal::math::{power, mod_inverse_prime};
use crate::elgamal::eg_keygen::SecretKey;
use crate::elgamal::eg_encrypt::Ciphertext;
use crate::crypto_error::CryptoError;

// ---------------------------------------------------------------------------
// Déchiffrement ElGamal : m = c2 · (c1^x)^-1 mod q
//
// L'inverse est celui de Fermat, (c1^x)^(q-2) = c1^(x·(q-2)) mod q, valable
// seulement pour q premier et c1 non nul : mod_inverse_prime le vérifie et
// renvoie une erreur plutôt qu'un message plausible mais faux.
// ---------------------------------------------------------------------------
pub fn eg_decrypt(ct: &Ciphertext, sk: &SecretKey) -> Result<BigUint, CryptoError> {
    if sk.q < BigUint::from(2u32) {
        return Err(CryptoError::InvalidInput(format!("module q = {} < 2", sk.q)));
    }
    if ct.c1 >= sk.q || ct.c2 >= sk.q {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    let shared = power(&ct.c1, &sk.x, &sk.q)?;
    let shared_inv = mod_inverse_prime(&shared, &sk.q)?;

    Ok((&ct.c2 * shared_inv) % &sk.q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elgamal::eg_encrypt::eg_encrypt;
    use crate::elgamal::eg_keygen::eg_keygen;
    use crate::elgamal::primes::PrimeSearch;
    use num_bigint::RandBigInt;
    use num_traits::One;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_known_vector() {
        let sk = SecretKey::new(big(23), big(6));
        let ct = Ciphertext { c1: big(2), c2: big(8) };
        assert_eq!(eg_decrypt(&ct, &sk).unwrap(), big(3));
    }

    #[test]
    fn test_round_trip_with_generated_key() {
        let mut rng = StdRng::seed_from_u64(21);
        let kp = eg_keygen(64, &PrimeSearch::default(), &mut rng).unwrap();
        let q = &kp.public_key.q;

        let mut messages = vec![big(0), big(1), q - BigUint::one()];
        for _ in 0..5 {
            messages.push(rng.gen_biguint_below(q));
        }

        for m in messages {
            let ct = eg_encrypt(&m, &kp.public_key, &mut rng).unwrap();
            assert_eq!(eg_decrypt(&ct, &kp.secret_key).unwrap(), m);
        }
    }

    #[test]
    fn test_rejects_out_of_range_ciphertext() {
        let sk = SecretKey::new(big(23), big(6));
        let ct = Ciphertext { c1: big(23), c2: big(8) };
        assert_eq!(eg_decrypt(&ct, &sk), Err(CryptoError::CiphertextOutOfRange));
    }

    #[test]
    fn test_zero_c1_has_no_inverse() {
        let sk = SecretKey::new(big(23), big(6));
        let ct = Ciphertext { c1: big(0), c2: big(8) };
        assert_eq!(eg_decrypt(&ct, &sk), Err(CryptoError::NoModularInverse));
    }

    #[test]
    fn test_composite_modulus_is_reported() {
        let sk = SecretKey::new(big(15), big(1));
        let ct = Ciphertext { c1: big(2), c2: big(4) };
        assert_eq!(eg_decrypt(&ct, &sk), Err(CryptoError::CompositeModulus));
    }
}
