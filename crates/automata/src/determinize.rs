use std::collections::VecDeque;

use log::debug;
use log::info;
use log::trace;
use rustc_hash::FxHashMap;
use superperm_io::TimeProgress;
use superperm_utilities::Timing;
use superperm_utilities::VecSet;

use crate::AutomatonError;
use crate::Dfa;
use crate::DfaStateIndex;
use crate::Nfa;
use crate::NfaStateIndex;
use crate::StateSubset;
use crate::factorial;

/// Sets the order in which discovered subsets are explored. The order only
/// influences the numbering of the resulting states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ExplorationStrategy {
    #[default]
    BreadthFirst,
    DepthFirst,
}

/// Converts the nondeterministic automaton into a deterministic one using
/// subset construction, starting from the subset containing only the initial
/// state.
///
/// Contrary to the usual construction, a subset is accepting iff it contains
/// *all* accept states of the given automaton. For the automaton of
/// [`Nfa::superpermutation`] this means that every permutation has been seen.
///
/// When `max_states` is given the construction fails with
/// [`AutomatonError::ResourceExceeded`] instead of discovering more subsets.
pub fn determinize(
    nfa: &Nfa,
    strategy: ExplorationStrategy,
    max_states: Option<usize>,
    timing: &mut Timing,
) -> Result<Dfa, AutomatonError> {
    let mut timer = timing.start("determinize");
    let result = subset_construction(nfa, strategy, max_states);
    timer.finish();

    let dfa = result?;
    info!(
        "Determinized {} nondeterministic states into {} states, {} accepting",
        nfa.num_of_states(),
        dfa.num_of_states(),
        dfa.accepting_states().count()
    );

    Ok(dfa)
}

/// Constructs the deterministic automaton that accepts exactly the strings
/// with a prefix that contains every permutation of `{0, ..., n-1}`.
///
/// The limit is checked with [`check_state_limit`] before anything is constructed.
pub fn build_automaton(n: usize, max_states: Option<usize>, timing: &mut Timing) -> Result<Dfa, AutomatonError> {
    check_state_limit(n, max_states)?;

    let mut timer = timing.start("construct nfa");
    let nfa = Nfa::superpermutation(n);
    timer.finish();

    determinize(&nfa?, ExplorationStrategy::BreadthFirst, max_states, timing)
}

/// Fails with [`AutomatonError::ResourceExceeded`] when `max_states` is below
/// `n! + 1`, the least number of states of the automaton for `n` symbols. Every
/// symbol completes at most one new permutation, so there is a distinct state for
/// every number of permutations seen so far.
pub fn check_state_limit(n: usize, max_states: Option<usize>) -> Result<(), AutomatonError> {
    match max_states {
        Some(limit) if n >= 1 && !factorial(n).is_ok_and(|count| count < limit) => {
            Err(AutomatonError::ResourceExceeded { limit })
        }
        _ => Ok(()),
    }
}

fn subset_construction(
    nfa: &Nfa,
    strategy: ExplorationStrategy,
    max_states: Option<usize>,
) -> Result<Dfa, AutomatonError> {
    let mut registry = SubsetRegistry::new(nfa.num_of_symbols(), nfa.accept_states(), max_states);
    let mut working = VecDeque::new();

    let initial = StateSubset::singleton(nfa.num_of_states(), nfa.initial_state_index());
    let (initial_index, _) = registry.insert(initial)?;
    working.push_back(initial_index);

    let mut progress = TimeProgress::new(
        |(discovered, remaining): (usize, usize)| {
            info!("Discovered {discovered} subsets, {remaining} remaining...");
        },
        1,
    );

    while let Some(state_index) = match strategy {
        ExplorationStrategy::BreadthFirst => working.pop_front(),
        ExplorationStrategy::DepthFirst => working.pop_back(),
    } {
        for symbol in 0..nfa.num_of_symbols() {
            let target = registry.subset(state_index).successor(nfa, symbol);

            // Cannot happen when the initial state is absorbing, but a given automaton need not have one.
            if target.is_empty() {
                trace!("No transition from {state_index} on {symbol}");
                continue;
            }

            let (target_index, inserted) = registry.insert(target)?;
            if inserted {
                trace!("Discovered {target_index} = {:?}", registry.subset(target_index));
                working.push_back(target_index);
            }

            registry.set_transition(state_index, symbol, target_index);
        }

        progress.print((registry.len(), working.len()));
    }

    debug!("Subset construction discovered {} subsets", registry.len());
    Ok(registry.finish())
}

/// Assigns consecutive indices to the subsets in order of discovery, and keeps
/// track of their acceptance and outgoing transitions.
struct SubsetRegistry<'a> {
    indices: FxHashMap<StateSubset, DfaStateIndex>,
    subsets: Vec<StateSubset>,
    accepting: Vec<bool>,
    transitions: Vec<Option<DfaStateIndex>>,

    num_of_symbols: usize,
    accept_states: &'a VecSet<NfaStateIndex>,
    max_states: Option<usize>,
}

impl<'a> SubsetRegistry<'a> {
    fn new(num_of_symbols: usize, accept_states: &'a VecSet<NfaStateIndex>, max_states: Option<usize>) -> Self {
        Self {
            indices: FxHashMap::default(),
            subsets: Vec::new(),
            accepting: Vec::new(),
            transitions: Vec::new(),
            num_of_symbols,
            accept_states,
            max_states,
        }
    }

    /// Returns the index of the given subset and true iff it was newly inserted.
    fn insert(&mut self, subset: StateSubset) -> Result<(DfaStateIndex, bool), AutomatonError> {
        if let Some(&index) = self.indices.get(&subset) {
            return Ok((index, false));
        }

        if let Some(limit) = self.max_states {
            if self.subsets.len() >= limit {
                return Err(AutomatonError::ResourceExceeded { limit });
            }
        }

        let index = DfaStateIndex::new(self.subsets.len());
        self.accepting.push(subset.is_superset(self.accept_states));
        self.transitions.extend((0..self.num_of_symbols).map(|_| None));
        self.indices.insert(subset.clone(), index);
        self.subsets.push(subset);

        Ok((index, true))
    }

    fn subset(&self, index: DfaStateIndex) -> &StateSubset {
        &self.subsets[*index]
    }

    fn set_transition(&mut self, from: DfaStateIndex, symbol: usize, to: DfaStateIndex) {
        self.transitions[*from * self.num_of_symbols + symbol] = Some(to);
    }

    fn len(&self) -> usize {
        self.subsets.len()
    }

    fn finish(self) -> Dfa {
        Dfa::new(self.transitions, self.num_of_symbols, self.accepting, self.subsets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use superperm_utilities::vecset;
    use test_case::test_case;

    #[test_case(1 ; "one symbol")]
    #[test_case(2 ; "two symbols")]
    #[test_case(3 ; "three symbols")]
    fn test_total_and_absorbing(n: usize) {
        let nfa = Nfa::superpermutation(n).unwrap();
        let dfa = determinize(&nfa, ExplorationStrategy::BreadthFirst, None, &mut Timing::new()).unwrap();

        assert!(dfa.is_total());
        assert_eq!(dfa.num_of_transitions(), dfa.num_of_states() * n);
        assert!(
            dfa.iter_states()
                .all(|state| dfa.subset(state).contains(nfa.initial_state_index()))
        );
        assert!(dfa.accepting_states().count() > 0);
    }

    #[test_case(1 ; "one symbol")]
    #[test_case(2 ; "two symbols")]
    #[test_case(3 ; "three symbols")]
    fn test_exploration_order_independent(n: usize) {
        let nfa = Nfa::superpermutation(n).unwrap();
        let mut timing = Timing::new();

        let breadth_first = determinize(&nfa, ExplorationStrategy::BreadthFirst, None, &mut timing).unwrap();
        let depth_first = determinize(&nfa, ExplorationStrategy::DepthFirst, None, &mut timing).unwrap();

        assert!(breadth_first.is_isomorphic(&depth_first));

        // The same subsets are discovered, with the same classification.
        for state in breadth_first.iter_states() {
            let other = depth_first
                .iter_states()
                .find(|&other| depth_first.subset(other) == breadth_first.subset(state))
                .expect("Every subset is discovered by both strategies");

            assert_eq!(breadth_first.is_accepting(state), depth_first.is_accepting(other));
        }
    }

    #[test]
    fn test_one_symbol() {
        let dfa = build_automaton(1, None, &mut Timing::new()).unwrap();

        // The initial subset {0} and the subset {0, 1} that loops forever.
        assert_eq!(dfa.num_of_states(), 2);
        assert_eq!(dfa.run(&[0, 0]).unwrap(), vec![false, true, true]);
    }

    #[test]
    fn test_resource_exceeded() {
        let mut timing = Timing::new();

        assert_eq!(
            build_automaton(3, Some(5), &mut timing),
            Err(AutomatonError::ResourceExceeded { limit: 5 })
        );
        assert_eq!(
            build_automaton(2, Some(0), &mut timing),
            Err(AutomatonError::ResourceExceeded { limit: 0 })
        );

        // The lower bound of n! + 1 states rejects large alphabets before the automata are allocated.
        assert_eq!(
            build_automaton(14, Some(10), &mut timing),
            Err(AutomatonError::ResourceExceeded { limit: 10 })
        );
        assert_eq!(
            build_automaton(30, Some(1000), &mut timing),
            Err(AutomatonError::ResourceExceeded { limit: 1000 })
        );

        let unbounded = build_automaton(2, None, &mut timing).unwrap();
        let exact = build_automaton(2, Some(unbounded.num_of_states()), &mut timing).unwrap();
        assert!(unbounded.is_isomorphic(&exact));
    }

    #[test]
    fn test_check_state_limit() {
        assert_eq!(check_state_limit(3, Some(7)), Ok(()));
        assert_eq!(check_state_limit(3, Some(6)), Err(AutomatonError::ResourceExceeded { limit: 6 }));
        assert_eq!(check_state_limit(25, None), Ok(()));
        assert_eq!(check_state_limit(0, Some(0)), Ok(()));
    }

    #[test]
    fn test_invalid_alphabet_size() {
        assert_eq!(
            build_automaton(0, None, &mut Timing::new()),
            Err(AutomatonError::InvalidAlphabetSize(0))
        );
    }

    #[test]
    fn test_custom_nfa_empty_move() {
        // 0 --[0]-> 1 without any other transitions, so from {1} no symbol leads anywhere.
        let state = NfaStateIndex::new;
        let nfa = Nfa::new(
            2,
            vec![vec![vecset![state(1)], VecSet::new()], vec![VecSet::new(), VecSet::new()]],
            vecset![state(1)],
        )
        .unwrap();

        let dfa = determinize(&nfa, ExplorationStrategy::BreadthFirst, None, &mut Timing::new()).unwrap();

        assert_eq!(dfa.num_of_states(), 2);
        assert!(!dfa.is_total());
        assert_eq!(dfa.successor(dfa.initial_state_index(), 1), None);
        assert_eq!(dfa.run(&[0]).unwrap(), vec![false, true]);
        assert_eq!(dfa.run(&[0, 0]).unwrap(), vec![false, true, false]);
        assert_eq!(dfa.run(&[1, 0]).unwrap(), vec![false, false, false]);
    }
}
