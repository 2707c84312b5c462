//! String similarity scores on a 0–100 scale.
//!
//! `ratio` is the normalized Indel similarity (based on the longest common
//! subsequence). `partial_ratio` slides the shorter string over the longer
//! one, including the partially overlapping windows at both ends, and keeps
//! the best `ratio`. Both operate on Unicode scalar values.

/// Similarity of two whole strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best similarity of the shorter string against any alignment in the longer one.
///
/// An exact containment scores 100. Equal-length inputs are scored in both
/// directions, so the result does not depend on argument order.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let score = best_alignment(short, long);
    if score < 100.0 && short.len() == long.len() {
        score.max(best_alignment(long, short))
    } else {
        score
    }
}

fn best_alignment(needle: &[char], haystack: &[char]) -> f64 {
    let len1 = needle.len();
    let len2 = haystack.len();

    if haystack.windows(len1).any(|w| w == needle) {
        return 100.0;
    }

    // A window whose edge character never occurs in the needle cannot
    // improve on the neighbouring window without it.
    let in_needle = |c: &char| needle.contains(c);
    let mut best = 0.0_f64;

    // Windows entering from the left edge.
    for end in 1..len1 {
        let window = &haystack[..end];
        if in_needle(&window[end - 1]) {
            best = best.max(ratio_chars(needle, window));
            if best == 100.0 {
                return best;
            }
        }
    }

    // Full-width windows.
    for start in 0..len2 - len1 {
        let window = &haystack[start..start + len1];
        if in_needle(&window[len1 - 1]) {
            best = best.max(ratio_chars(needle, window));
            if best == 100.0 {
                return best;
            }
        }
    }

    // Windows leaving through the right edge.
    for start in len2 - len1..len2 {
        let window = &haystack[start..];
        if in_needle(&window[0]) {
            best = best.max(ratio_chars(needle, window));
            if best == 100.0 {
                return best;
            }
        }
    }

    best
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * (2 * lcs_len(a, b)) as f64 / total as f64
}

/// Length of the longest common subsequence, single-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for ca in a {
        let mut diag = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}
