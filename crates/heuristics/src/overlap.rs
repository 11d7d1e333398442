use log::debug;

use superperm_automata::AutomatonError;
use superperm_automata::factorial;
use superperm_automata::permutations;

/// Merges the permutation into the sequence. When the sequence already
/// contains the permutation it is returned unchanged, otherwise the
/// permutation is appended sharing the longest suffix of the sequence that is
/// also a prefix of the permutation.
pub fn merge_with_overlap(sequence: &[usize], permutation: &[usize]) -> Vec<usize> {
    if permutation.is_empty() || sequence.windows(permutation.len()).any(|window| window == permutation) {
        return sequence.to_vec();
    }

    let overlap = (0..=permutation.len().min(sequence.len()))
        .rev()
        .find(|&length| sequence[sequence.len() - length..] == permutation[..length])
        .unwrap_or_default();

    let mut result = Vec::with_capacity(sequence.len() + permutation.len() - overlap);
    result.extend_from_slice(sequence);
    result.extend_from_slice(&permutation[overlap..]);
    result
}

/// Constructs a superpermutation of `{0, ..., n-1}` by merging all
/// permutations, in lexicographic order, using [`merge_with_overlap`].
pub fn overlap_superpermutation(n: usize) -> Result<Vec<usize>, AutomatonError> {
    if n < 1 {
        return Err(AutomatonError::InvalidAlphabetSize(n));
    }

    // Guards the enumeration below against alphabets whose permutations cannot even be counted.
    factorial(n)?;

    let result = permutations(n).fold(Vec::new(), |sequence, permutation| {
        merge_with_overlap(&sequence, &permutation)
    });

    debug!("Overlap superpermutation for n = {n} has length {}", result.len());
    Ok(result)
}
