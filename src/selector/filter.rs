//! Text filtering for the selector list.
//!
//! A plain case-insensitive substring match. No scoring, no reordering:
//! candidates keep the order they were supplied in, so the displayed indices
//! stay predictable while typing.

/// Anything with a display label that can be matched against a query.
pub trait Labeled {
    fn label(&self) -> &str;
}

impl Labeled for &str {
    fn label(&self) -> &str {
        self
    }
}

impl Labeled for String {
    fn label(&self) -> &str {
        self
    }
}

/// Whether a label matches a query (empty query matches everything).
pub fn matches(label: &str, query: &str) -> bool {
    query.is_empty() || label.to_lowercase().contains(&query.to_lowercase())
}

/// Indices of candidates whose labels contain the query, in input order.
///
/// An empty query keeps every candidate.
pub fn filter<T: Labeled>(candidates: &[T], query: &str) -> Vec<usize> {
    let query_lower = query.to_lowercase();
    candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| {
            query_lower.is_empty() || candidate.label().to_lowercase().contains(&query_lower)
        })
        .map(|(i, _)| i)
        .collect()
}
