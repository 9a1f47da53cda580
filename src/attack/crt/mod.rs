pub mod crt;

pub use crt::crt_combine;
