//! Fuzzy matching of a single partition cell against the inverted index.

use trep_index::{levenshtein, InvertedIndex, MatchSet};

use crate::error::{MatchError, Result};
use crate::filter::Filter;

/// Default cap on the number of documents retrieved for one cell, mirroring
/// the original matcher's top-10 match-set retrieval.
const DEFAULT_TOP_K: usize = 10;

/// Outcome of matching one partition cell.
#[derive(Debug, Clone)]
pub struct CellMatch {
    /// What was actually searched: equal to the input cell unless spelling
    /// correction replaced it.
    pub matched_string: String,
    pub documents: MatchSet,
    /// `0` when the cell produced no documents at all.
    pub match_percent: f64,
    pub edit_distance: u32,
    pub allowable_edit_distance: u32,
}

impl CellMatch {
    pub fn none() -> Self {
        Self {
            matched_string: String::new(),
            documents: MatchSet::default(),
            match_percent: 0.0,
            edit_distance: 0,
            allowable_edit_distance: 0,
        }
    }

    pub fn is_match(&self) -> bool {
        !self.documents.is_empty()
    }
}

/// Matches one cell (a space-joined run of query tokens) against an
/// [`InvertedIndex`]: exact phrase search first, then a spelling-correction
/// fallback.
pub struct SubstringMatcher<'a> {
    index: &'a dyn InvertedIndex,
    filter: &'a Filter,
    top_k: usize,
}

impl<'a> SubstringMatcher<'a> {
    pub fn new(index: &'a dyn InvertedIndex, filter: &'a Filter) -> Self {
        Self {
            index,
            filter,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Run the full match algorithm for one cell:
    /// 1. [`Filter::should_keep`] gates trivial/noise cells.
    /// 2. Exact phrase search; a non-empty result wins with distance 0.
    /// 3. Otherwise ask for a spelling suggestion within
    ///    `max(len/4, 2)` edits; none/empty/identical means no match.
    /// 4. Re-run the phrase search on the correction; a still-empty result
    ///    is an [`MatchError::Internal`] invariant violation, since the
    ///    suggestion came from the index's own spelling dictionary.
    pub fn match_cell(&self, cell: &str) -> Result<CellMatch> {
        if !self.filter.should_keep("", cell) {
            return Ok(CellMatch::none());
        }

        let hits = self.index.phrase_search(cell, self.top_k);
        if !hits.is_empty() {
            let percent = hits.best().expect("non-empty match set has a best").percent;
            return Ok(CellMatch {
                matched_string: cell.to_string(),
                documents: hits,
                match_percent: percent,
                edit_distance: 0,
                allowable_edit_distance: 0,
            });
        }

        let allowable = (cell.chars().count() / 4).max(2) as u32;
        let suggestion = self.index.spelling_suggestion(cell, allowable as usize);
        let suggestion = match suggestion {
            Some(s) if !s.is_empty() && s != cell => s,
            _ => return Ok(CellMatch::none()),
        };

        let edit_distance = levenshtein(cell, &suggestion) as u32;

        let hits = self.index.phrase_search(&suggestion, self.top_k);
        if hits.is_empty() {
            return Err(MatchError::Internal(format!(
                "spelling suggestion '{suggestion}' for cell '{cell}' produced no phrase-search hits"
            )));
        }

        let percent = hits.best().expect("non-empty match set has a best").percent;
        Ok(CellMatch {
            matched_string: suggestion,
            documents: hits,
            match_percent: percent,
            edit_distance,
            allowable_edit_distance: allowable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trep_core::codes::IataType;
    use trep_core::{LocationKey, LocationRecord};
    use trep_index::{index_record, IndexBuilder};

    fn nce() -> LocationRecord {
        let mut rec = LocationRecord::new(
            LocationKey::new("NCE", IataType::Airport, 6_299_418),
            "Nice Cote d'Azur",
            "Nice Cote d'Azur",
        );
        rec.latitude = 43.66272;
        rec.longitude = 7.20787;
        rec.country_code = "FR".to_string();
        rec
    }

    fn build_index() -> trep_index::InMemoryIndex {
        let mut builder = IndexBuilder::new();
        builder.begin_build();
        index_record(&mut builder, nce());
        builder.commit().unwrap()
    }

    #[test]
    fn test_exact_match_has_zero_edit_distance() {
        let index = build_index();
        let filter = Filter::new();
        let matcher = SubstringMatcher::new(&index, &filter);
        let result = matcher.match_cell("nce").unwrap();
        assert!(result.is_match());
        assert_eq!(result.edit_distance, 0);
        assert_eq!(result.matched_string, "nce");
    }

    #[test]
    fn test_typo_is_corrected_within_allowable_distance() {
        let index = build_index();
        let filter = Filter::new();
        let matcher = SubstringMatcher::new(&index, &filter);
        let result = matcher.match_cell("ncee").unwrap();
        assert!(result.is_match());
        assert_eq!(result.matched_string, "nce");
        assert_eq!(result.edit_distance, 1);
        assert_eq!(result.allowable_edit_distance, 2);
    }

    #[test]
    fn test_unrelated_text_has_no_match() {
        let index = build_index();
        let filter = Filter::new();
        let matcher = SubstringMatcher::new(&index, &filter);
        let result = matcher.match_cell("zzxxqqyy").unwrap();
        assert!(!result.is_match());
    }

    #[test]
    fn test_filtered_cell_short_circuits_to_no_match() {
        let index = build_index();
        let filter = Filter::new();
        let matcher = SubstringMatcher::new(&index, &filter);
        let result = matcher.match_cell("7").unwrap();
        assert!(!result.is_match());
    }
}
