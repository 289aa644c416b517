//! Free-text canonicalization for query building and fuzzy matching
//!
//! Both the resolver's query construction and its candidate comparison go
//! through the same normal form, so a title that matches itself after
//! normalization always satisfies the containment rule.

/// Canonicalize a title or artist string for comparison.
///
/// Lowercases, strips every character outside `[a-z0-9]` and whitespace,
/// and trims. Total: never fails, and `normalize("") == ""`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}
