//! String similarity metrics
//!
//! All metrics return a score in `[0, 100]`. They operate on grapheme
//! clusters so that accented names compare the way they read. Any comparison
//! involving an empty string scores 0.

use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Normalize text for matching
/// - Unicode NFKC (compatibility composition)
/// - lowercase
/// - trimmed, with internal whitespace runs collapsed to one space
pub fn normalize(text: &str) -> String {
    let folded = text.nfkc().collect::<String>().to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn graphemes(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Length of the longest common subsequence of two grapheme sequences
fn lcs_len(a: &[&str], b: &[&str]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ga in a {
        for (j, gb) in b.iter().enumerate() {
            curr[j + 1] = if ga == gb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn ratio_graphemes(a: &[&str], b: &[&str]) -> f64 {
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    100.0 * (2 * lcs_len(a, b)) as f64 / total as f64
}

/// Indel similarity: `100 * 2 * LCS / (len(a) + len(b))`
pub fn ratio(a: &str, b: &str) -> f64 {
    ratio_graphemes(&graphemes(a), &graphemes(b))
}

/// Best similarity of the shorter string against every same-length window
/// of the longer one.
///
/// Rewards the query being a contiguous fragment of the name, so `"bid"`
/// inside `"joe biden"` scores 100.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a = graphemes(a);
    let b = graphemes(b);
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return 0.0;
    }
    if short.len() == long.len() {
        return ratio_graphemes(&short, &long);
    }

    let mut best = 0.0f64;
    for window in long.windows(short.len()) {
        let score = ratio_graphemes(&short, window);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

/// Word-order-insensitive similarity over whitespace-delimited tokens.
///
/// Shared tokens are compared together with the sorted remainder of each
/// side, so `"biden joe"` and `"joe biden"` score 100. When every token of
/// one side appears in the other the score is 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let sect = intersection.join(" ");
    let combined_a = join_nonempty(&sect, &only_a.join(" "));
    let combined_b = join_nonempty(&sect, &only_b.join(" "));

    ratio(&sect, &combined_a)
        .max(ratio(&sect, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{} {}", head, tail),
    }
}

/// True if `needle` occurs inside any single whitespace-delimited token of
/// `haystack`
pub fn word_match(haystack: &str, needle: &str) -> bool {
    haystack.split_whitespace().any(|word| word.contains(needle))
}
