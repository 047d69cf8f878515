//! Text normalization and similarity ratio
//!
//! The ratio is the indel-normalized edit similarity
//! `(len(a) + len(b) - distance) / (len(a) + len(b))` where `distance`
//! counts insertions and deletions only (a substitution costs two). That
//! reduces to `2 * lcs(a, b) / (len(a) + len(b))`, scaled to 0-100 and
//! rounded half-to-even.

/// Collapse every whitespace run (newlines included) to one space and
/// lower-case the result
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
                in_whitespace = true;
            }
        } else {
            in_whitespace = false;
            out.extend(ch.to_lowercase());
        }
    }

    out
}

/// Similarity ratio on a 0-100 scale
///
/// Returns 0 when either string is empty, two empty strings included.
/// This differs from fuzzywuzzy's `fuzz.ratio`, which scores any two equal
/// strings 100 before looking at their length. Blank cells never reach the
/// grader, so the difference only shows when calling this directly.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total = a.len() + b.len();
    let matched = 2 * longest_common_subsequence(&a, &b);

    round_half_even(100 * matched, total) as u8
}

/// Length of the longest common subsequence, two-row dynamic programming
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for &x in long {
        for (j, &y) in short.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// `numerator / denominator` rounded to the nearest integer, ties to even
fn round_half_even(numerator: usize, denominator: usize) -> usize {
    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);

    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}
