pub mod eg_keygen;

pub use eg_keygen::{PublicKey, SecretKey, KeyPair, RECOMMENDED_KEY_BITS, eg_keygen, eg_keygen_weak};
