//!
//! Command line flags that are shared by the tools of this workspace.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

pub mod verbosity;
mod version;

pub use version::*;
