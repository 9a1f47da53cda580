pub mod bsgs;

pub use bsgs::{bsgs_solve, bsgs_solve_bounded, MAX_BSGS_TABLE};
