use crate::AutomatonError;

/// Returns `n!`, or an error when it does not fit in a `usize`.
pub fn factorial(n: usize) -> Result<usize, AutomatonError> {
    (2..=n).try_fold(1usize, |result, i| {
        result.checked_mul(i).ok_or(AutomatonError::Overflow("factorial"))
    })
}

/// Returns the table `[0!, 1!, ..., n!]`, for algorithms that need the
/// factorials of all smaller values repeatedly.
pub fn factorials(n: usize) -> Result<Vec<usize>, AutomatonError> {
    let mut table = Vec::with_capacity(n + 1);
    table.push(1usize);

    for i in 1..=n {
        let previous = table[i - 1];
        table.push(previous.checked_mul(i).ok_or(AutomatonError::Overflow("factorial"))?);
    }

    Ok(table)
}

/// Rearranges the sequence into its lexicographic successor and returns true,
/// or, when the sequence is the largest arrangement, sorts it ascending and
/// returns false.
pub fn next_permutation<T: Ord>(sequence: &mut [T]) -> bool {
    // Find the longest non-increasing suffix, the element before it is the pivot.
    let Some(pivot) = sequence.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        sequence.reverse();
        return false;
    };

    // The rightmost element larger than the pivot, which exists by the choice of pivot.
    let successor = sequence
        .iter()
        .rposition(|element| *element > sequence[pivot])
        .expect("The suffix contains an element larger than the pivot");

    sequence.swap(pivot, successor);
    sequence[pivot + 1..].reverse();
    true
}

/// An iterator over all permutations of `{0, ..., n-1}` in lexicographic order.
pub struct Permutations {
    current: Option<Vec<usize>>,
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current.take()?;

        let mut successor = result.clone();
        if next_permutation(&mut successor) {
            self.current = Some(successor);
        }

        Some(result)
    }
}

/// Returns an iterator over the `n!` permutations of the alphabet `{0, ..., n-1}`,
/// starting with the identity.
pub fn permutations(n: usize) -> Permutations {
    Permutations {
        current: Some((0..n).collect()),
    }
}

/// Returns true iff the given window contains every symbol of `{0, ..., n-1}` exactly once.
pub fn is_permutation(window: &[usize], n: usize) -> bool {
    if window.len() != n {
        return false;
    }

    let mut seen = vec![false; n];
    for &symbol in window {
        if symbol >= n || seen[symbol] {
            return false;
        }
        seen[symbol] = true;
    }

    true
}

/// Returns true iff every permutation of `{0, ..., n-1}` occurs as a
/// contiguous substring of the input, by searching for each of them.
///
/// This takes `n!` passes over the input, so it is only suitable for small `n`
/// or to cross check the automaton.
pub fn covers_all_permutations(input: &[usize], n: usize) -> bool {
    if n == 0 {
        return true;
    }

    permutations(n).all(|permutation| input.windows(n).any(|window| window == permutation.as_slice()))
}
