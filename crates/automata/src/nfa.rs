use std::fmt;

use log::debug;
use superperm_utilities::TagIndex;
use superperm_utilities::VecSet;

use crate::AutomatonError;
use crate::factorial;
use crate::permutations;

/// A symbol of the alphabet `{0, ..., n-1}`.
pub type Symbol = usize;

/// A unique type for the states of a nondeterministic automaton.
pub struct NfaStateTag;

/// The index for a state of a nondeterministic automaton.
pub type NfaStateIndex = TagIndex<usize, NfaStateTag>;

/// A nondeterministic finite automaton without epsilon transitions. The state
/// with index zero is the initial state.
#[derive(Clone, PartialEq, Eq)]
pub struct Nfa {
    /// The targets of every (state, symbol) pair, stored at `state * num_of_symbols + symbol`.
    successors: Vec<VecSet<NfaStateIndex>>,
    num_of_symbols: usize,

    /// The states in which a match has been completed.
    accept_states: VecSet<NfaStateIndex>,
}

impl Nfa {
    /// Creates an automaton from the target sets of every state, where
    /// `transitions[state][symbol]` are the targets of `state` on `symbol`.
    ///
    /// Fails when there are no symbols or states, when a state does not have a
    /// target set for every symbol, or when a state index is out of range.
    pub fn new(
        num_of_symbols: usize,
        transitions: Vec<Vec<VecSet<NfaStateIndex>>>,
        accept_states: VecSet<NfaStateIndex>,
    ) -> Result<Nfa, AutomatonError> {
        if num_of_symbols == 0 {
            return Err(AutomatonError::InvalidAlphabetSize(num_of_symbols));
        }

        if transitions.is_empty() {
            return Err(AutomatonError::InvalidNfa("there must be at least one state".to_string()));
        }

        let num_of_states = transitions.len();
        let in_range = |state: &NfaStateIndex| state.value() < num_of_states;

        let mut successors = Vec::with_capacity(num_of_states * num_of_symbols);
        for (state, targets) in transitions.into_iter().enumerate() {
            if targets.len() != num_of_symbols {
                return Err(AutomatonError::InvalidNfa(format!(
                    "state {state} has transitions for {} symbols instead of {num_of_symbols}",
                    targets.len()
                )));
            }

            for (symbol, target_set) in targets.iter().enumerate() {
                if let Some(target) = target_set.iter().find(|target| !in_range(target)) {
                    return Err(AutomatonError::InvalidNfa(format!(
                        "transition {state} --[{symbol}]-> {target} leaves the {num_of_states} states"
                    )));
                }
            }

            successors.extend(targets);
        }

        if let Some(state) = accept_states.iter().find(|state| !in_range(state)) {
            return Err(AutomatonError::InvalidNfa(format!(
                "accept state {state} is not one of the {num_of_states} states"
            )));
        }

        Ok(Nfa {
            successors,
            num_of_symbols,
            accept_states,
        })
    }

    /// Constructs the automaton over the alphabet `{0, ..., n-1}` that accepts
    /// all strings containing at least one permutation of the alphabet.
    ///
    /// The initial state loops on every symbol and starts one linear chain of
    /// `n` states per permutation, enumerated in lexicographic order. The last
    /// state of every chain is an accept state that loops on every symbol, so
    /// the result has `1 + n!·n` states of which `n!` are accepting.
    pub fn superpermutation(n: usize) -> Result<Nfa, AutomatonError> {
        if n < 1 {
            return Err(AutomatonError::InvalidAlphabetSize(n));
        }

        let num_of_permutations = factorial(n)?;
        let num_of_states = num_of_permutations
            .checked_mul(n)
            .and_then(|chain_states| chain_states.checked_add(1))
            .ok_or(AutomatonError::Overflow("number of states"))?;
        num_of_states
            .checked_mul(n)
            .ok_or(AutomatonError::Overflow("number of transitions"))?;

        let mut builder = NfaBuilder::with_capacity(n, num_of_states)?;
        let initial_state = builder.add_state();
        builder.add_self_loops(initial_state);

        let mut accept_states = Vec::new();
        accept_states
            .try_reserve_exact(num_of_permutations)
            .map_err(|_| AutomatonError::OutOfMemory("accept states"))?;
        for permutation in permutations(n) {
            let mut current = builder.add_state();
            builder.add_transition(initial_state, permutation[0], current);

            for &symbol in &permutation[1..] {
                let next = builder.add_state();
                builder.add_transition(current, symbol, next);
                current = next;
            }

            builder.add_self_loops(current);
            accept_states.push(current);
        }

        debug_assert_eq!(builder.num_of_states(), num_of_states);
        debug!(
            "Constructed automaton with {} states and {} accept states for n = {n}",
            num_of_states,
            accept_states.len()
        );

        Ok(builder.finish(accept_states.into_iter().collect()))
    }

    /// Returns the index of the initial state.
    pub fn initial_state_index(&self) -> NfaStateIndex {
        NfaStateIndex::new(0)
    }

    /// Returns the targets of the given state on the given symbol.
    pub fn successors(&self, state_index: NfaStateIndex, symbol: Symbol) -> &VecSet<NfaStateIndex> {
        debug_assert!(symbol < self.num_of_symbols, "Symbol {symbol} is out of range");
        &self.successors[*state_index * self.num_of_symbols + symbol]
    }

    /// Iterate over all state indices of the automaton.
    pub fn iter_states(&self) -> impl Iterator<Item = NfaStateIndex> + use<> {
        (0..self.num_of_states()).map(NfaStateIndex::new)
    }

    /// Returns the set of accept states.
    pub fn accept_states(&self) -> &VecSet<NfaStateIndex> {
        &self.accept_states
    }

    /// Returns true iff the given state is an accept state.
    pub fn is_accepting(&self, state_index: NfaStateIndex) -> bool {
        self.accept_states.contains(&state_index)
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.successors.len() / self.num_of_symbols
    }

    /// Returns the number of symbols in the alphabet.
    pub fn num_of_symbols(&self) -> usize {
        self.num_of_symbols
    }

    /// Returns the number of transitions, counting every target separately.
    pub fn num_of_transitions(&self) -> usize {
        self.successors.iter().map(|targets| targets.len()).sum()
    }
}

/// Allocates states densely and collects their transitions.
struct NfaBuilder {
    successors: Vec<VecSet<NfaStateIndex>>,
    num_of_symbols: usize,
}

impl NfaBuilder {
    /// Reserves room for all transitions up front, failing instead of aborting when that is too much.
    fn with_capacity(num_of_symbols: usize, num_of_states: usize) -> Result<Self, AutomatonError> {
        let mut successors = Vec::new();
        num_of_states
            .checked_mul(num_of_symbols)
            .ok_or(AutomatonError::Overflow("number of transitions"))
            .and_then(|capacity| {
                successors
                    .try_reserve_exact(capacity)
                    .map_err(|_| AutomatonError::OutOfMemory("transition table"))
            })?;

        Ok(Self {
            successors,
            num_of_symbols,
        })
    }

    /// Adds a state without outgoing transitions and returns its index.
    fn add_state(&mut self) -> NfaStateIndex {
        let index = NfaStateIndex::new(self.num_of_states());
        self.successors
            .extend((0..self.num_of_symbols).map(|_| VecSet::new()));
        index
    }

    fn add_transition(&mut self, from: NfaStateIndex, symbol: Symbol, to: NfaStateIndex) {
        self.successors[*from * self.num_of_symbols + symbol].insert(to);
    }

    /// Adds a transition from the state to itself for every symbol.
    fn add_self_loops(&mut self, state: NfaStateIndex) {
        for symbol in 0..self.num_of_symbols {
            self.add_transition(state, symbol, state);
        }
    }

    fn num_of_states(&self) -> usize {
        self.successors.len() / self.num_of_symbols
    }

    fn finish(self, accept_states: VecSet<NfaStateIndex>) -> Nfa {
        Nfa {
            successors: self.successors,
            num_of_symbols: self.num_of_symbols,
            accept_states,
        }
    }
}

/// Constructs the automaton recognising strings that contain a permutation of
/// `{0, ..., n-1}`, see [`Nfa::superpermutation`].
pub fn build_nfa(n: usize) -> Result<Nfa, AutomatonError> {
    Nfa::superpermutation(n)
}

impl fmt::Debug for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.num_of_states())?;
        writeln!(f, "Number of symbols: {}", self.num_of_symbols)?;
        writeln!(f, "Accept states: {:?}", self.accept_states)?;

        for state_index in self.iter_states() {
            for symbol in 0..self.num_of_symbols {
                for to in self.successors(state_index, symbol) {
                    writeln!(f, "{state_index} --[{symbol}]-> {to}")?;
                }
            }
        }

        Ok(())
    }
}
