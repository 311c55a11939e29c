//! In-memory [`InvertedIndex`] implementation and its offline builder.
//!
//! Grounded on the teacher's `uls-db::repository::Database` split between a
//! write-side loader and a read-side query surface, but backing an
//! in-process term index instead of a SQLite file: the write path is
//! exclusive and offline (`begin_build`/`add_document`/`commit`), the read
//! path (`InMemoryIndex`) is immutable and safe to share across concurrent
//! requests.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use trep_core::{LocationKey, LocationRecord};

use crate::document::{DocumentId, StoredDocument};
use crate::levenshtein::levenshtein;
use crate::lookup::{InvertedIndex, MatchSet, MatchedDocument};

/// Accumulates documents and the spelling dictionary during an offline
/// index build. Call [`commit`](IndexBuilder::commit) to freeze the result
/// into an [`InMemoryIndex`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    documents: Vec<StoredDocument>,
    spelling: HashMap<String, u64>,
    building: bool,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the builder to an empty state, ready to accept documents.
    pub fn begin_build(&mut self) {
        self.documents.clear();
        self.spelling.clear();
        self.building = true;
    }

    /// Register one `(LocationRecord, language)` document.
    ///
    /// - `phrases`: token sequences to register for adjacency (phrase)
    ///   search, e.g. `[["nice", "cote", "d'azur"], ["nce"]]`.
    /// - `spelling_terms`: space-joined phrase strings to register in the
    ///   spelling dictionary (frequency-counted across all documents); per
    ///   the component design these are the same terms used for indexing.
    /// - `stemming_terms`/`synonym_terms`: reserved extension points; if
    ///   non-empty they are folded into `phrases` as single-token entries,
    ///   otherwise ignored.
    #[allow(clippy::too_many_arguments)]
    pub fn add_document(
        &mut self,
        record: Arc<LocationRecord>,
        language: impl Into<String>,
        key: LocationKey,
        phrases: Vec<Vec<String>>,
        spelling_terms: Vec<String>,
        stemming_terms: Vec<String>,
        synonym_terms: Vec<String>,
    ) -> DocumentId {
        let id = self.documents.len() as DocumentId;
        let mut phrases = phrases;
        phrases.extend(stemming_terms.into_iter().map(|t| vec![t]));
        phrases.extend(synonym_terms.into_iter().map(|t| vec![t]));

        for term in &spelling_terms {
            *self.spelling.entry(term.to_lowercase()).or_insert(0) += 1;
        }

        self.documents.push(StoredDocument {
            id,
            key,
            language: language.into(),
            record,
            phrases,
        });
        id
    }

    /// Freeze the builder into a read-only [`InMemoryIndex`]. Fails if
    /// [`begin_build`](Self::begin_build) was never called.
    pub fn commit(self) -> crate::error::Result<InMemoryIndex> {
        if !self.building {
            return Err(crate::error::IndexError::BuildNotStarted);
        }
        debug!(documents = self.documents.len(), terms = self.spelling.len(), "committed index build");
        Ok(InMemoryIndex {
            documents: self.documents,
            spelling: self.spelling,
        })
    }
}

/// Immutable, thread-safe inverted index built by [`IndexBuilder`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryIndex {
    documents: Vec<StoredDocument>,
    spelling: HashMap<String, u64>,
}

impl InMemoryIndex {
    pub fn empty() -> Self {
        Self::default()
    }
}

impl InvertedIndex for InMemoryIndex {
    fn phrase_search(&self, query: &str, top_k: usize) -> MatchSet {
        let query_tokens: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        if query_tokens.is_empty() {
            return MatchSet::default();
        }

        let mut hits: Vec<MatchedDocument> = self
            .documents
            .iter()
            .filter_map(|doc| {
                doc.contains_phrase_match(&query_tokens)
                    .map(|percent| MatchedDocument {
                        document_id: doc.id,
                        key: doc.key.clone(),
                        language: doc.language.clone(),
                        record: Arc::clone(&doc.record),
                        percent,
                    })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.percent
                .partial_cmp(&a.percent)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.document_id.cmp(&b.document_id))
        });
        hits.truncate(top_k);

        MatchSet { documents: hits }
    }

    fn spelling_suggestion(&self, query: &str, max_distance: usize) -> Option<String> {
        let query_lower = query.to_lowercase();

        let mut candidates: Vec<(&String, u64, usize)> = self
            .spelling
            .iter()
            .filter_map(|(phrase, &freq)| {
                let distance = levenshtein(&query_lower, phrase);
                (distance <= max_distance).then_some((phrase, freq, distance))
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.1.cmp(&a.1) // highest frequency first
                .then(a.2.cmp(&b.2)) // then smallest distance
                .then(a.0.cmp(b.0)) // then lexicographic, for determinism
        });

        let (best, _, _) = candidates.into_iter().next()?;
        if *best == query_lower {
            return None;
        }
        Some(best.clone())
    }

    fn document(&self, id: DocumentId) -> Option<Arc<LocationRecord>> {
        self.documents.get(id as usize).map(|d| Arc::clone(&d.record))
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trep_core::codes::IataType;

    fn sample_record() -> Arc<LocationRecord> {
        Arc::new(LocationRecord::new(
            LocationKey::new("NCE", IataType::Airport, 6_299_418),
            "Nice Cote d'Azur",
            "Nice Cote d'Azur",
        ))
    }

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn build_sample() -> InMemoryIndex {
        let mut builder = IndexBuilder::new();
        builder.begin_build();
        let record = sample_record();
        builder.add_document(
            Arc::clone(&record),
            "std",
            record.key.clone(),
            vec![toks("nice cote d'azur"), toks("nce"), toks("lfmn")],
            vec!["nice cote d'azur".to_string(), "nce".to_string(), "lfmn".to_string()],
            Vec::new(),
            Vec::new(),
        );
        builder.commit().unwrap()
    }

    #[test]
    fn test_exact_code_match_is_100_percent() {
        let index = build_sample();
        let hits = index.phrase_search("nce", 10);
        assert_eq!(hits.documents.len(), 1);
        assert_eq!(hits.documents[0].percent, 100.0);
    }

    #[test]
    fn test_no_match_returns_empty_set() {
        let index = build_sample();
        let hits = index.phrase_search("tokyo", 10);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_spelling_suggestion_corrects_typo() {
        let index = build_sample();
        let suggestion = index.spelling_suggestion("nce", 2);
        // "nce" is already indexed exactly, so there is nothing to correct.
        assert_eq!(suggestion, None);

        let suggestion = index.spelling_suggestion("ncee", 2).unwrap();
        assert_eq!(suggestion, "nce");
    }

    #[test]
    fn test_spelling_suggestion_respects_max_distance() {
        let index = build_sample();
        assert_eq!(index.spelling_suggestion("zzzzzzzzzz", 1), None);
    }

    #[test]
    fn test_top_k_is_respected() {
        let index = build_sample();
        let hits = index.phrase_search("nice cote d'azur", 1);
        assert_eq!(hits.documents.len(), 1);
    }
}
