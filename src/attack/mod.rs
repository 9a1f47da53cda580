// Cryptanalyse : logarithme discret quand l'ordre du groupe est friable

pub mod crt;
pub mod bsgs;
pub mod pohlig_hellman;
