//!
//! Heuristics that construct superpermutations of `{0, ..., n-1}`, together
//! with an analysis of how a solution moves between permutations.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod analysis;
mod greedy;
mod overlap;

pub use analysis::*;
pub use greedy::*;
pub use overlap::*;
