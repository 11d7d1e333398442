//! Utility types and functions shared by the superpermutation crates.
//!
//! This crate does not use unsafe code.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod tagged_index;
mod timing;
mod vecset;

pub use error::*;
pub use random_test::*;
pub use tagged_index::*;
pub use timing::*;
pub use vecset::*;
