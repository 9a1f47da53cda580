// ElGamal sur le groupe multiplicatif d'un premier :
// arithmétique modulaire, premiers, clés, chiffrement, déchiffrement

pub mod math;
pub mod primes;
pub mod eg_keygen;
pub mod eg_encrypt;
pub mod eg_decrypt;
