use log::debug;
use rustc_hash::FxHashSet;

use superperm_automata::AutomatonError;
use superperm_automata::factorials;
use superperm_automata::next_permutation;
use superperm_automata::permutations;

/// Constructs a superpermutation of `{0, ..., n-1}` by greedily appending as
/// few symbols as possible.
///
/// Starting from the identity permutation, the last window of `n` symbols is
/// split into a kept tail of `n - i` symbols and a block of `i` symbols, for
/// increasing `i`. The rearrangements of the block are tried in cyclic
/// lexicographic order starting from the block itself, and the first one that
/// completes an unvisited permutation together with the tail is appended.
///
/// All permutations are kept in memory, which limits this to about ten
/// symbols. Fails with [`AutomatonError::OutOfMemory`] when they cannot even
/// be reserved.
pub fn greedy_superpermutation(n: usize) -> Result<Vec<usize>, AutomatonError> {
    if n < 1 {
        return Err(AutomatonError::InvalidAlphabetSize(n));
    }

    let factorials = factorials(n)?;
    let mut unvisited: FxHashSet<Vec<usize>> = FxHashSet::default();
    unvisited
        .try_reserve(factorials[n] - 1)
        .map_err(|_| AutomatonError::OutOfMemory("unvisited permutations"))?;
    unvisited.extend(permutations(n).skip(1));
    let mut result: Vec<usize> = (0..n).collect();

    while !unvisited.is_empty() {
        let window_start = result.len() - n;

        let block = (1..=n)
            .find_map(|i| {
                let tail = &result[window_start + i..];
                let mut block = result[window_start..window_start + i].to_vec();

                for _ in 0..factorials[i] {
                    let candidate: Vec<usize> = tail.iter().chain(&block).copied().collect();
                    if unvisited.remove(&candidate) {
                        return Some(block);
                    }

                    next_permutation(&mut block);
                }

                None
            })
            .expect("The last window is a permutation, so rearranging all of it reaches every permutation");

        result.extend(block);
    }

    debug!("Greedy superpermutation for n = {n} has length {}", result.len());
    Ok(result)
}
