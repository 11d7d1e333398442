use std::fmt;

use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use superperm_automata::AutomatonError;
use superperm_automata::factorial;
use superperm_automata::is_permutation;
use superperm_automata::permutations;

/// A step between two consecutive permutation windows of a solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub start_permutation: Vec<usize>,
    pub start_cycle: usize,
    pub end_permutation: Vec<usize>,
    pub end_cycle: usize,

    /// The number of symbols appended to move from the start to the end permutation.
    pub weight: usize,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (cycle {}) -[{}]-> {} (cycle {})",
            self.start_permutation.iter().format(""),
            self.start_cycle,
            self.weight,
            self.end_permutation.iter().format(""),
            self.end_cycle
        )
    }
}

/// Decomposes a superpermutation candidate into the permutations it visits.
///
/// The permutations of `{0, ..., n-1}` are grouped into `(n-1)!` cycles, each
/// consisting of the `n` rotations of a representative that starts with
/// symbol `0`. Cycles are numbered in lexicographic order of their
/// representatives.
pub struct SolutionAnalysis {
    num_of_symbols: usize,
    cycles: Vec<Vec<Vec<usize>>>,
    transitions: Vec<Transition>,
    num_of_visited: usize,
}

impl SolutionAnalysis {
    pub fn new(solution: &[usize], n: usize) -> Result<SolutionAnalysis, AutomatonError> {
        if n < 1 {
            return Err(AutomatonError::InvalidAlphabetSize(n));
        }

        if let Some((position, &symbol)) = solution.iter().find_position(|&&symbol| symbol >= n) {
            return Err(AutomatonError::InvalidSymbol {
                symbol,
                position,
                num_of_symbols: n,
            });
        }

        factorial(n)?;

        let cycles: Vec<Vec<Vec<usize>>> = permutations(n)
            .take_while(|representative| representative[0] == 0)
            .map(|representative| {
                (0..n)
                    .map(|shift| {
                        let mut rotation = representative.clone();
                        rotation.rotate_left(shift);
                        rotation
                    })
                    .collect()
            })
            .collect();

        let mut cycle_of: FxHashMap<&[usize], usize> = FxHashMap::default();
        for (index, cycle) in cycles.iter().enumerate() {
            for rotation in cycle {
                cycle_of.insert(rotation, index);
            }
        }

        let mut transitions = Vec::new();
        let mut visited: FxHashSet<&[usize]> = FxHashSet::default();
        let mut previous: Option<(usize, &[usize])> = None;
        for (position, window) in solution.windows(n).enumerate() {
            if !is_permutation(window, n) {
                continue;
            }

            if let Some((start, start_permutation)) = previous {
                transitions.push(Transition {
                    start_permutation: start_permutation.to_vec(),
                    start_cycle: cycle_of[start_permutation],
                    end_permutation: window.to_vec(),
                    end_cycle: cycle_of[window],
                    weight: position - start,
                });
            }

            visited.insert(window);
            previous = Some((position, window));
        }

        debug!(
            "Solution of length {} has {} cycles and {} transitions",
            solution.len(),
            cycles.len(),
            transitions.len()
        );

        Ok(SolutionAnalysis {
            num_of_symbols: n,
            cycles,
            transitions,
            num_of_visited: visited.len(),
        })
    }

    /// Returns the cycles, each listing the rotations of its representative.
    pub fn cycles(&self) -> &[Vec<Vec<usize>>] {
        &self.cycles
    }

    /// Returns the transitions in the order in which they occur in the solution.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn num_of_symbols(&self) -> usize {
        self.num_of_symbols
    }

    /// Returns the number of distinct permutations visited by the solution.
    pub fn num_of_visited(&self) -> usize {
        self.num_of_visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_indexed(text: &str) -> Vec<usize> {
        text.bytes().map(|byte| usize::from(byte - b'1')).collect()
    }

    #[test]
    fn test_three_symbol_cycles() {
        let analysis = SolutionAnalysis::new(&[0, 1, 2, 0, 1, 0, 2, 1, 0], 3).unwrap();

        assert_eq!(
            analysis.cycles(),
            &[
                vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]],
                vec![vec![0, 2, 1], vec![2, 1, 0], vec![1, 0, 2]],
            ]
        );
    }

    #[test]
    fn test_three_symbol_transitions() {
        let analysis = SolutionAnalysis::new(&one_indexed("123121321"), 3).unwrap();

        let summary: Vec<(usize, usize, usize)> = analysis
            .transitions()
            .iter()
            .map(|transition| (transition.start_cycle, transition.end_cycle, transition.weight))
            .collect();
        assert_eq!(summary, vec![(0, 0, 1), (0, 0, 1), (0, 1, 2), (1, 1, 1), (1, 1, 1)]);

        let third = &analysis.transitions()[2];
        assert_eq!(third.start_permutation, vec![2, 0, 1]);
        assert_eq!(third.end_permutation, vec![1, 0, 2]);
        assert_eq!(third.to_string(), "201 (cycle 0) -[2]-> 102 (cycle 1)");
        assert_eq!(analysis.num_of_visited(), 6);
    }

    #[test]
    fn test_five_symbol_minimal_solution() {
        let solution = one_indexed(
            "123451324153241352413254132451342513452134512341523412534123541231452314253142351423154213542153421543214532143521432514321542312453124351243152431254312",
        );
        let analysis = SolutionAnalysis::new(&solution, 5).unwrap();

        assert_eq!(analysis.cycles().len(), 24);
        assert_eq!(analysis.num_of_visited(), 120);
        assert_eq!(analysis.transitions().len(), 119);

        let weights = analysis.transitions().iter().counts_by(|transition| transition.weight);
        assert_eq!(weights.get(&1), Some(&92));
        assert_eq!(weights.get(&2), Some(&25));
        assert_eq!(weights.get(&3), Some(&2));

        // Appending a single symbol rotates the permutation, so it stays within its cycle.
        for transition in analysis.transitions().iter().filter(|transition| transition.weight == 1) {
            assert_eq!(transition.start_cycle, transition.end_cycle);
        }
    }

    #[test]
    fn test_single_symbol() {
        let analysis = SolutionAnalysis::new(&[0, 0], 1).unwrap();

        assert_eq!(analysis.cycles(), &[vec![vec![0]]]);
        assert_eq!(analysis.transitions().len(), 1);
        assert_eq!(analysis.num_of_visited(), 1);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            SolutionAnalysis::new(&[0, 1, 3], 3).err(),
            Some(AutomatonError::InvalidSymbol {
                symbol: 3,
                position: 2,
                num_of_symbols: 3
            })
        );
        assert_eq!(
            SolutionAnalysis::new(&[], 0).err(),
            Some(AutomatonError::InvalidAlphabetSize(0))
        );
    }
}
