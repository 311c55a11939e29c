//! The read-side [`InvertedIndex`] trait and its result types.

use std::sync::Arc;

use trep_core::{LocationKey, LocationRecord};

use crate::document::DocumentId;

/// One document returned by [`InvertedIndex::phrase_search`], with the
/// percentage that document's best-matching phrase scored against the
/// query.
#[derive(Debug, Clone)]
pub struct MatchedDocument {
    pub document_id: DocumentId,
    pub key: LocationKey,
    pub language: String,
    pub record: Arc<LocationRecord>,
    pub percent: f64,
}

/// Ranked result of a [`InvertedIndex::phrase_search`] call: highest
/// percentage first, ties broken by ascending document id (insertion
/// order), matching the tie-break documented for
/// `extractBestMatchingDocumentFromMSet` in the original matcher.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    pub documents: Vec<MatchedDocument>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn best(&self) -> Option<&MatchedDocument> {
        self.documents.first()
    }
}

/// Read path over a built inverted index. Implementations are expected to
/// be safe for concurrent reads (the index is opened once and shared
/// across requests; see the concurrency model).
pub trait InvertedIndex {
    /// Exact/adjacent in-order phrase search, returning at most `top_k`
    /// documents ranked by match percentage.
    fn phrase_search(&self, query: &str, top_k: usize) -> MatchSet;

    /// Suggest a correction for `query` among the phrases registered in the
    /// spelling dictionary, preferring the highest-frequency candidate
    /// within `max_distance` Levenshtein edits. Returns `None` if no
    /// candidate qualifies, or if the only candidate equals `query`.
    fn spelling_suggestion(&self, query: &str, max_distance: usize) -> Option<String>;

    /// Fetch a document's full record by id.
    fn document(&self, id: DocumentId) -> Option<Arc<LocationRecord>>;

    /// Number of documents in the index.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
