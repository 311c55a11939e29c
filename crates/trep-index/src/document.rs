//! Index documents: one per `(LocationRecord, language)` pair.

use std::sync::Arc;

use trep_core::LocationKey;

/// Opaque identifier of an indexed document, stable for the lifetime of the
/// index it belongs to. Assigned in insertion order starting at 0.
pub type DocumentId = u64;

/// One indexed document: a language-specific view of a [`LocationRecord`],
/// together with the token sequences ("phrases") that can be matched
/// against it.
///
/// [`LocationRecord`]: trep_core::LocationRecord
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub key: LocationKey,
    pub language: String,
    pub record: Arc<trep_core::LocationRecord>,
    /// Token sequences registered for adjacency (phrase) search, e.g.
    /// `["nice", "cote", "d'azur"]` or `["nce"]`.
    pub phrases: Vec<Vec<String>>,
}

impl StoredDocument {
    pub fn contains_phrase_match(&self, query_tokens: &[String]) -> Option<f64> {
        if query_tokens.is_empty() {
            return None;
        }
        self.phrases
            .iter()
            .filter_map(|phrase| phrase_match_percent(phrase, query_tokens))
            .fold(None, |best: Option<f64>, percent| match best {
                Some(b) if b >= percent => Some(b),
                _ => Some(percent),
            })
    }
}

/// Percentage a `query` token sequence matches a stored `phrase`: 100.0 if
/// the two are identical, otherwise `100.0 * query.len() / phrase.len()`
/// when `query` occurs as a contiguous (in-order) subsequence of `phrase`,
/// `None` if it does not occur at all.
fn phrase_match_percent(phrase: &[String], query: &[String]) -> Option<f64> {
    if query.len() > phrase.len() {
        return None;
    }
    let found = phrase
        .windows(query.len())
        .any(|window| window == query);
    if !found {
        return None;
    }
    Some(100.0 * query.len() as f64 / phrase.len() as f64)
}
