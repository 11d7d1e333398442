use std::fmt;

use bitvec::bitvec;
use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use itertools::Itertools;
use superperm_utilities::VecSet;

use crate::Nfa;
use crate::NfaStateIndex;
use crate::Symbol;

/// A set of states of a nondeterministic automaton, represented by a bitset
/// with one bit per state. Two subsets containing the same states are equal
/// and hash the same, regardless of the order in which states were added.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StateSubset {
    bits: BitVec<usize, Lsb0>,
}

impl StateSubset {
    /// Returns the empty subset of an automaton with the given number of states.
    pub fn empty(num_of_states: usize) -> Self {
        Self {
            bits: bitvec![usize, Lsb0; 0; num_of_states],
        }
    }

    /// Returns the subset containing only the given state.
    pub fn singleton(num_of_states: usize, state_index: NfaStateIndex) -> Self {
        let mut subset = Self::empty(num_of_states);
        subset.insert(state_index);
        subset
    }

    /// Inserts the given state, returns true iff it was not yet present.
    pub fn insert(&mut self, state_index: NfaStateIndex) -> bool {
        !self.bits.replace(*state_index, true)
    }

    /// Returns true iff the given state is in the subset.
    pub fn contains(&self, state_index: NfaStateIndex) -> bool {
        self.bits.get(*state_index).is_some_and(|bit| *bit)
    }

    /// Returns true iff every given state is in the subset.
    pub fn is_superset(&self, states: &VecSet<NfaStateIndex>) -> bool {
        states.iter().all(|&state_index| self.contains(state_index))
    }

    /// Returns true iff the subset contains no states.
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Returns the number of states in the subset.
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate over the states in the subset in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = NfaStateIndex> + '_ {
        self.bits.iter_ones().map(NfaStateIndex::new)
    }

    /// Returns the states reachable from any state in this subset by a
    /// transition on the given symbol.
    pub fn successor(&self, nfa: &Nfa, symbol: Symbol) -> StateSubset {
        let mut result = StateSubset::empty(nfa.num_of_states());

        for state_index in self.iter() {
            for &to in nfa.successors(state_index, symbol) {
                result.insert(to);
            }
        }

        result
    }
}

impl fmt::Debug for StateSubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().format(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;
    use rustc_hash::FxHashSet;
    use superperm_utilities::random_test;

    #[test]
    fn test_subset_equality_ignores_insertion_order() {
        random_test(100, |rng| {
            let num_of_states = rng.random_range(1..200);
            let mut states: Vec<NfaStateIndex> = (0..rng.random_range(0..20))
                .map(|_| NfaStateIndex::new(rng.random_range(0..num_of_states)))
                .collect();

            let mut forward = StateSubset::empty(num_of_states);
            for &state in &states {
                forward.insert(state);
            }

            states.reverse();
            let mut backward = StateSubset::empty(num_of_states);
            for &state in &states {
                backward.insert(state);
            }

            let mut registry = FxHashSet::default();
            registry.insert(forward.clone());
            assert!(registry.contains(&backward));
            assert_eq!(forward, backward);
            assert_eq!(forward.len(), states.iter().collect::<FxHashSet<_>>().len());
        });
    }

    #[test]
    fn test_subset_successor() {
        let nfa = Nfa::superpermutation(2).unwrap();
        let initial = StateSubset::singleton(nfa.num_of_states(), nfa.initial_state_index());

        let after_zero = initial.successor(&nfa, 0);
        assert_eq!(after_zero.iter().map(|state| *state).collect::<Vec<_>>(), vec![0, 1]);

        let after_zero_one = after_zero.successor(&nfa, 1);
        assert_eq!(after_zero_one.iter().map(|state| *state).collect::<Vec<_>>(), vec![0, 2, 3]);
        assert!(!after_zero_one.is_superset(nfa.accept_states()));

        let after_zero_one_zero = after_zero_one.successor(&nfa, 0);
        assert_eq!(after_zero_one_zero.iter().map(|state| *state).collect::<Vec<_>>(), vec![0, 1, 2, 4]);
        assert!(after_zero_one_zero.is_superset(nfa.accept_states()));
        assert_eq!(format!("{after_zero_one_zero:?}"), "{0, 1, 2, 4}");
    }
}
