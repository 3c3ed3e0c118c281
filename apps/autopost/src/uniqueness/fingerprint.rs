//! Canonical text form, content fingerprint, and fuzzy similarity.
//!
//! Every comparison in the uniqueness engine runs on the canonical form, so two
//! quotes that differ only in case, punctuation, or spacing share a fingerprint
//! and score 1.0 against each other.

use sha2::{Digest, Sha256};

/// Lowercases, drops everything that is not alphanumeric or whitespace, and
/// collapses whitespace runs to single spaces.
pub fn canonicalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// SHA-256 of the canonical form, hex encoded. This is the dedup key stored on every post.
pub fn fingerprint(text: &str) -> String {
    let canonical = canonicalize(text);
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// Normalized Levenshtein ratio between the canonical forms of `a` and `b`.
///
/// `1 - distance / max(len_a, len_b)`, measured in chars. Symmetric, bounded
/// in [0, 1], and 1.0 when the canonical forms are equal (including both empty).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = canonicalize(a).chars().collect();
    let b: Vec<char> = canonicalize(b).chars().collect();

    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    let distance = levenshtein(&a, &b);
    1.0 - distance as f64 / longest as f64
}

/// Two-row edit distance (insert / delete / substitute, all cost 1).
fn levenshtein(a: &[char], b: &[char]) -> usize {
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
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
