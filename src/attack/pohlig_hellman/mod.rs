pub mod pohlig_hellman;

pub use pohlig_hellman::{pohlig_hellman, pohlig_hellman_with_order, recover_plaintext};
