//! Utility types and functions related to reading and writing symbol strings,
//! and reporting progress of long running computations.
//!
//! This crate does not use unsafe code.
#![forbid(unsafe_code)]

mod progress;
mod symbols;

pub use progress::*;
pub use symbols::*;
