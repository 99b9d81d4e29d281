//! Edit distance calculation for misspelling lookup.

use std::cmp::min;

/// Calculate the Levenshtein distance between two strings.
/// This is the minimum number of single-character edits (insertions, deletions, or substitutions)
/// required to change one word into another.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s2_chars: Vec<char> = s2.chars().collect();
    let mut prev_row: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut curr_row = vec![0; s2_chars.len() + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let cost = usize::from(c1 != *c2);
            curr_row[j + 1] = min(
                min(
                    prev_row[j + 1] + 1, // deletion
                    curr_row[j] + 1,     // insertion
                ),
                prev_row[j] + cost, // substitution
            );
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[s2_chars.len()]
}

/// Calculate Levenshtein distance with a maximum threshold for early termination.
/// Returns None if the distance exceeds the threshold.
pub fn levenshtein_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    // Early termination if length difference exceeds threshold
    if s1_chars.len().abs_diff(s2_chars.len()) > threshold {
        return None;
    }

    let mut prev_row: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut curr_row = vec![0; s2_chars.len() + 1];

    for (i, c1) in s1_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut min_in_row = curr_row[0];

        for (j, c2) in s2_chars.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            curr_row[j + 1] = min(
                min(prev_row[j + 1] + 1, curr_row[j] + 1),
                prev_row[j] + cost,
            );
            min_in_row = min(min_in_row, curr_row[j + 1]);
        }

        // No cell of later rows can go below this row's minimum
        if min_in_row > threshold {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[s2_chars.len()];
    (distance <= threshold).then_some(distance)
}

/// Maximum edit distance tolerated for a word of `len` characters.
///
/// Short words get a tight bound so that every short word in the corpus is
/// not reported as a variant of every other.
pub fn distance_bound(len: usize, max_distance: usize) -> usize {
    let bound = match len {
        0..=4 => 1,
        5..=8 => 2,
        _ => 3,
    };
    bound.min(max_distance)
}
