pub mod eg_encrypt;

pub use eg_encrypt::{Ciphertext, eg_encrypt, eg_encrypt_with_ephemeral};
