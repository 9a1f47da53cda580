// Réexporte toutes les fonctions d'arithmétique modulaire

mod math;

pub use math::{power, mod_inverse_prime, extended_gcd};
