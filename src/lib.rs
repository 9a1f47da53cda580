// Déclaration des modules
pub mod crypto_error;
pub mod elgamal;
pub mod attack;
pub mod key_management;

pub use crate::elgamal::math;
pub use crate::elgamal::primes;
pub use crate::elgamal::eg_keygen;
pub use crate::elgamal::eg_encrypt;
pub use crate::elgamal::eg_decrypt;

// Fonctions mathématiques principales
pub use crate::elgamal::math::{power, mod_inverse_prime, extended_gcd};
pub use crate::elgamal::primes::{is_probable_prime, generate_prime, generate_safe_prime, PrimeSearch};

// Types depuis keygen / encrypt
pub use eg_keygen::{PublicKey, SecretKey, KeyPair};
pub use eg_encrypt::Ciphertext;

// Cryptanalyse
pub use crate::attack::crt::crt_combine;
pub use crate::attack::bsgs::bsgs_solve;
pub use crate::attack::pohlig_hellman::{pohlig_hellman, pohlig_hellman_with_order, recover_plaintext};

// Erreur centralisée
pub use crypto_error::CryptoError;
