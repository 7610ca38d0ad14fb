use super::pairs::pair_iter;
use crate::core::models::base::Base;
use std::collections::HashSet;

fn count_pairs_matching(sequence: &[Base], pairs: &[i32], wanted: (Base, Base)) -> u32 {
    pair_iter(pairs)
        .filter(|&(i, j)| match (sequence.get(i), sequence.get(j)) {
            (Some(&a), Some(&b)) => (a, b) == wanted || (b, a) == wanted,
            _ => false,
        })
        .count() as u32
}

pub fn num_gu_pairs(sequence: &[Base], pairs: &[i32]) -> u32 {
    count_pairs_matching(sequence, pairs, (Base::Guanine, Base::Uracil))
}

pub fn num_gc_pairs(sequence: &[Base], pairs: &[i32]) -> u32 {
    count_pairs_matching(sequence, pairs, (Base::Guanine, Base::Cytosine))
}

pub fn num_au_pairs(sequence: &[Base], pairs: &[i32]) -> u32 {
    count_pairs_matching(sequence, pairs, (Base::Adenine, Base::Uracil))
}

pub fn num_pairs(pairs: &[i32]) -> u32 {
    pair_iter(pairs).count() as u32
}

/// Length, in base pairs, of the longest run of directly stacked pairs
/// `(i, j), (i + 1, j - 1), ...`.
pub fn longest_stack_length(pairs: &[i32]) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<(usize, usize)> = None;

    for (i, j) in pair_iter(pairs) {
        let continues = previous.is_some_and(|(pi, pj)| pi + 1 == i && pj == j + 1);
        current = if continues { current + 1 } else { 1 };
        longest = longest.max(current);
        previous = Some((i, j));
    }
    longest
}

/// Counts motif windows of `motif_length` that already occurred earlier in the sequence.
///
/// The final window is not examined, matching the scores stored in existing records.
pub fn sequence_repetition(sequence: &str, motif_length: usize) -> u32 {
    if motif_length == 0 {
        return 0;
    }
    let bytes = sequence.as_bytes();
    let windows = bytes.len().saturating_sub(motif_length);
    let mut seen: HashSet<&[u8]> = HashSet::new();
    let mut repeats = 0;
    for start in 0..windows {
        if !seen.insert(&bytes[start..start + motif_length]) {
            repeats += 1;
        }
    }
    repeats
}
