//! Naive substring matching over sequence symbols.
//!
//! This is the scan shared by alignment search and replacement. It attempts
//! a character-by-character match at each position and, on a mismatch,
//! restarts one position past the start of the failed attempt: a plain
//! O(n * m) scan, deliberately not Knuth-Morris-Pratt. Replacement resumes
//! at the end of each rewritten region, so occurrences never overlap a
//! region that was just replaced. Downstream search and scoring scenarios
//! depend on the exact match positions this scan chooses; see the note on
//! `find_from` before swapping in a cleverer algorithm.

use crate::model::{AlignmentError, AlignmentResult};

/// Returns the start position of the first occurrence of `pattern` in
/// `haystack` at or after `start`, or `None` when no full occurrence
/// remains.
///
/// An attempt that mismatches restarts shifted forward by one from where it
/// began, never further, even when the matched prefix would allow a larger
/// skip. How this scan recovers from a partial match determines which of
/// two overlapping occurrences is reported, and replacement positions are
/// derived from it.
pub fn find_from(haystack: &[u8], pattern: &[u8], start: usize) -> Option<usize> {
    let n = haystack.len();
    let m = pattern.len();
    if m == 0 || n < m {
        return None;
    }

    let mut i = start;
    // Stop once fewer than m symbols remain unexamined.
    while i + m <= n {
        let mut j = 0;
        while j < m && haystack[i + j] == pattern[j] {
            j += 1;
        }
        if j == m {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Returns true if `pattern` occurs anywhere in `haystack`.
///
/// The first full match is sufficient; the scan stops there.
pub fn contains(haystack: &[u8], pattern: &[u8]) -> bool {
    find_from(haystack, pattern, 0).is_some()
}

/// Replaces every non-overlapping occurrence of `pattern` in `symbols` with
/// `replacement`, scanning left to right, and returns the number of
/// occurrences rewritten.
///
/// The replacement must have the same length as the pattern; the symbols
/// are untouched otherwise. After a match the scan resumes at the end of
/// the rewritten region, so a new occurrence may start no earlier than
/// that point.
pub fn replace_in_place(
    symbols: &mut [u8],
    pattern: &[u8],
    replacement: &[u8],
) -> AlignmentResult<usize> {
    if replacement.len() != pattern.len() {
        return Err(AlignmentError::LengthMismatch {
            expected: pattern.len(),
            actual: replacement.len(),
        });
    }
    if pattern.is_empty() {
        return Ok(0);
    }

    let mut replaced = 0;
    let mut i = 0;
    while let Some(position) = find_from(symbols, pattern, i) {
        symbols[position..position + pattern.len()].copy_from_slice(replacement);
        i = position + pattern.len();
        replaced += 1;
    }
    Ok(replaced)
}
