// Test de primalité et générateurs de premiers (aléatoires, sûrs, friables)

mod primes;

pub use primes::{
    PrimeSearch, DEFAULT_MR_ROUNDS, DEFAULT_MAX_ATTEMPTS,
    is_probable_prime, generate_prime, generate_safe_prime, generate_smooth_prime,
};
