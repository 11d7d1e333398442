use std::collections::VecDeque;
use std::fmt;

use superperm_utilities::TagIndex;

use crate::AutomatonError;
use crate::StateSubset;
use crate::Symbol;

/// A unique type for the states of a deterministic automaton.
pub struct DfaStateTag;

/// The index for a state of a deterministic automaton.
pub type DfaStateIndex = TagIndex<usize, DfaStateTag>;

/// A deterministic finite automaton obtained by subset construction. Every
/// state remembers the subset of nondeterministic states it represents, the
/// state with index zero is the initial state.
#[derive(Clone, PartialEq, Eq)]
pub struct Dfa {
    /// The target of every (state, symbol) pair, stored at `state * num_of_symbols + symbol`.
    transitions: Vec<Option<DfaStateIndex>>,
    num_of_symbols: usize,

    accepting: Vec<bool>,
    subsets: Vec<StateSubset>,
}

impl Dfa {
    /// Creates a deterministic automaton from its parts, all vectors must be
    /// indexed by the same states.
    pub(crate) fn new(
        transitions: Vec<Option<DfaStateIndex>>,
        num_of_symbols: usize,
        accepting: Vec<bool>,
        subsets: Vec<StateSubset>,
    ) -> Dfa {
        debug_assert_eq!(accepting.len(), subsets.len());
        debug_assert_eq!(transitions.len(), subsets.len() * num_of_symbols);

        Dfa {
            transitions,
            num_of_symbols,
            accepting,
            subsets,
        }
    }

    /// Returns the index of the initial state.
    pub fn initial_state_index(&self) -> DfaStateIndex {
        DfaStateIndex::new(0)
    }

    /// Returns the target of the given state on the given symbol, or `None`
    /// when the transition is undefined.
    pub fn successor(&self, state_index: DfaStateIndex, symbol: Symbol) -> Option<DfaStateIndex> {
        debug_assert!(symbol < self.num_of_symbols, "Symbol {symbol} is out of range");
        self.transitions[*state_index * self.num_of_symbols + symbol]
    }

    /// Returns true iff the given state is accepting.
    pub fn is_accepting(&self, state_index: DfaStateIndex) -> bool {
        self.accepting[*state_index]
    }

    /// Iterate over the accepting states.
    pub fn accepting_states(&self) -> impl Iterator<Item = DfaStateIndex> + '_ {
        self.iter_states().filter(|&state_index| self.is_accepting(state_index))
    }

    /// Returns the subset of nondeterministic states that the given state represents.
    pub fn subset(&self, state_index: DfaStateIndex) -> &StateSubset {
        &self.subsets[*state_index]
    }

    /// Returns true iff every state has a transition for every symbol.
    pub fn is_total(&self) -> bool {
        self.transitions.iter().all(Option::is_some)
    }

    /// Iterate over all state indices of the automaton.
    pub fn iter_states(&self) -> impl Iterator<Item = DfaStateIndex> + use<> {
        (0..self.num_of_states()).map(DfaStateIndex::new)
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.accepting.len()
    }

    /// Returns the number of symbols in the alphabet.
    pub fn num_of_symbols(&self) -> usize {
        self.num_of_symbols
    }

    /// Returns the number of defined transitions.
    pub fn num_of_transitions(&self) -> usize {
        self.transitions.iter().filter(|to| to.is_some()).count()
    }

    /// Runs the automaton on the input and returns for every prefix length `k`,
    /// from zero up to and including the input length, whether the prefix of
    /// length `k` is accepted.
    ///
    /// After an undefined transition no further prefix is accepted.
    pub fn run(&self, input: &[Symbol]) -> Result<Vec<bool>, AutomatonError> {
        self.validate(input)?;
        Ok(self.states(input).map(|state| self.accepts_state(state)).collect())
    }

    /// Returns the length of the shortest accepted prefix of the input, or
    /// `None` when no prefix is accepted.
    ///
    /// For the superpermutation automaton this is the shortest prefix that
    /// contains every permutation, and by monotonicity every longer prefix is
    /// accepted as well.
    pub fn first_accepting_prefix_length(&self, input: &[Symbol]) -> Result<Option<usize>, AutomatonError> {
        self.validate(input)?;
        Ok(self.states(input).position(|state| self.accepts_state(state)))
    }

    /// Returns true iff the whole input is accepted.
    pub fn accepts(&self, input: &[Symbol]) -> Result<bool, AutomatonError> {
        self.validate(input)?;
        Ok(self.accepts_state(self.states(input).last().flatten()))
    }

    /// Returns true iff both automata are equal up to a renaming of the states,
    /// i.e., there is a bijection between the states that preserves the
    /// initial state, acceptance and the transitions.
    ///
    /// Assumes that every state is reachable from the initial state, which is
    /// the case for automata obtained by subset construction.
    pub fn is_isomorphic(&self, other: &Dfa) -> bool {
        if self.num_of_symbols != other.num_of_symbols || self.num_of_states() != other.num_of_states() {
            return false;
        }

        let mut mapping: Vec<Option<DfaStateIndex>> = vec![None; self.num_of_states()];
        let mut inverse: Vec<Option<DfaStateIndex>> = vec![None; other.num_of_states()];

        let mut queue = VecDeque::new();
        mapping[*self.initial_state_index()] = Some(other.initial_state_index());
        inverse[*other.initial_state_index()] = Some(self.initial_state_index());
        queue.push_back((self.initial_state_index(), other.initial_state_index()));

        while let Some((left, right)) = queue.pop_front() {
            if self.is_accepting(left) != other.is_accepting(right) {
                return false;
            }

            for symbol in 0..self.num_of_symbols {
                match (self.successor(left, symbol), other.successor(right, symbol)) {
                    (None, None) => {}
                    (Some(left_to), Some(right_to)) => match (mapping[*left_to], inverse[*right_to]) {
                        (None, None) => {
                            mapping[*left_to] = Some(right_to);
                            inverse[*right_to] = Some(left_to);
                            queue.push_back((left_to, right_to));
                        }
                        (Some(mapped), Some(_)) if mapped == right_to => {}
                        _ => return false,
                    },
                    _ => return false,
                }
            }
        }

        true
    }

    /// Checks that every symbol of the input is in the alphabet.
    fn validate(&self, input: &[Symbol]) -> Result<(), AutomatonError> {
        match input.iter().position(|&symbol| symbol >= self.num_of_symbols) {
            Some(position) => Err(AutomatonError::InvalidSymbol {
                symbol: input[position],
                position,
                num_of_symbols: self.num_of_symbols,
            }),
            None => Ok(()),
        }
    }

    /// Yields the state reached after every prefix of the input, starting with
    /// the empty prefix. Yields `None` once an undefined transition was taken.
    fn states<'a>(&'a self, input: &'a [Symbol]) -> impl Iterator<Item = Option<DfaStateIndex>> + 'a {
        let initial = Some(self.initial_state_index());

        std::iter::once(initial).chain(input.iter().scan(initial, move |current, &symbol| {
            *current = current.and_then(|state_index| self.successor(state_index, symbol));
            Some(*current)
        }))
    }

    fn accepts_state(&self, state: Option<DfaStateIndex>) -> bool {
        state.is_some_and(|state_index| self.is_accepting(state_index))
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.num_of_states())?;
        writeln!(f, "Number of accepting states: {}", self.accepting_states().count())?;
        writeln!(f, "Number of symbols: {}", self.num_of_symbols)?;
        write!(f, "Number of transitions: {}", self.num_of_transitions())
    }
}

impl fmt::Debug for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;

        for state_index in self.iter_states() {
            let marker = if self.is_accepting(state_index) { " (accepting)" } else { "" };
            writeln!(f, "State {state_index} {:?}{marker}", self.subset(state_index))?;

            for symbol in 0..self.num_of_symbols {
                if let Some(to) = self.successor(state_index, symbol) {
                    writeln!(f, "{state_index} --[{symbol}]-> {to}")?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use superperm_utilities::Timing;
    use test_log::test;

    use crate::ExplorationStrategy;
    use crate::Nfa;
    use crate::build_automaton;
    use crate::determinize;

    #[test]
    fn test_two_symbol_scenario() {
        let dfa = build_automaton(2, None, &mut Timing::new()).unwrap();

        assert_eq!(dfa.run(&[0, 1, 0]).unwrap(), vec![false, false, false, true]);
        assert_eq!(dfa.first_accepting_prefix_length(&[0, 1, 0]).unwrap(), Some(3));
        assert_eq!(dfa.run(&[0, 1, 0, 1]).unwrap(), vec![false, false, false, true, true]);
        assert_eq!(dfa.first_accepting_prefix_length(&[0]).unwrap(), None);
        assert_eq!(dfa.first_accepting_prefix_length(&[0, 0]).unwrap(), None);
        assert!(!dfa.accepts(&[]).unwrap());
        assert!(dfa.accepts(&[1, 0, 1]).unwrap());
    }

    #[test]
    fn test_invalid_symbol() {
        let dfa = build_automaton(2, None, &mut Timing::new()).unwrap();

        assert_eq!(
            dfa.run(&[0, 1, 0, 2]),
            Err(AutomatonError::InvalidSymbol {
                symbol: 2,
                position: 3,
                num_of_symbols: 2
            })
        );
        assert!(dfa.first_accepting_prefix_length(&[5]).is_err());
        assert!(dfa.accepts(&[0, 7]).is_err());
    }

    #[test]
    fn test_isomorphic_to_itself_not_to_other() {
        let mut timing = Timing::new();
        let two = build_automaton(2, None, &mut timing).unwrap();
        let three = build_automaton(3, None, &mut timing).unwrap();

        assert!(two.is_isomorphic(&two.clone()));
        assert!(!two.is_isomorphic(&three));
    }

    #[test]
    fn test_isomorphism_respects_acceptance() {
        let mut timing = Timing::new();
        let nfa = Nfa::superpermutation(2).unwrap();
        let dfa = determinize(&nfa, ExplorationStrategy::BreadthFirst, None, &mut timing).unwrap();

        // Flipping the acceptance of a single state keeps the structure but changes the language.
        let mut accepting = dfa.accepting.clone();
        accepting[0] = !accepting[0];
        let modified = Dfa::new(dfa.transitions.clone(), dfa.num_of_symbols, accepting, dfa.subsets.clone());

        assert!(!dfa.is_isomorphic(&modified));
    }
}
