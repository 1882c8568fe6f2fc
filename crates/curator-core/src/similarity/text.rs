//! Lexical similarity primitives shared by all scored fields.

use std::collections::HashSet;

/// Similarity between two strings in [0.0, 1.0].
///
/// Normalizes by trim + case-fold, then:
/// - identical strings score 1.0;
/// - one containing the other as a substring scores 0.9;
/// - otherwise the max of a normalized edit-distance score and a
///   token-level Jaccard score over whitespace-split words.
///
/// Empty or missing strings score 0.0.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return 0.9;
    }

    let max_len = a.chars().count().max(b.chars().count());
    // max_len > 0 here: both strings are non-empty
    let edit_score = 1.0 - (levenshtein(&a, &b) as f64) / (max_len as f64);

    edit_score.max(token_jaccard(&a, &b))
}

/// Levenshtein edit distance over Unicode scalar values.
///
/// Two-row dynamic programming, O(|a| x |b|) time, O(min) extra space.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Jaccard similarity of whitespace-split word sets.
///
/// Inputs are expected to be normalized already (this is an internal
/// helper of `string_similarity`).
fn token_jaccard(a: &str, b: &str) -> f64 {
    let set_a: HashSet<&str> = a.split_whitespace().collect();
    let set_b: HashSet<&str> = b.split_whitespace().collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

/// Jaccard similarity of two string arrays, case-folded and treated as
/// sets. Empty on either side scores 0.0.
pub fn array_similarity(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<String> = a.iter().map(|s| s.trim().to_lowercase()).collect();
    let set_b: HashSet<String> = b.iter().map(|s| s.trim().to_lowercase()).collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}
