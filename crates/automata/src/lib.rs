//!
//! A crate that recognises superpermutations, strings over `{0, ..., n-1}` that
//! contain every permutation of the alphabet as a contiguous substring, by
//! constructing a nondeterministic automaton with one chain per permutation and
//! determinizing it with an acceptance condition that requires all chains to
//! have completed.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod determinize;
mod dfa;
mod error;
mod io_aut;
mod nfa;
mod permutation;
mod state_subset;

pub use determinize::*;
pub use dfa::*;
pub use error::*;
pub use io_aut::*;
pub use nfa::*;
pub use permutation::*;
pub use state_subset::*;
