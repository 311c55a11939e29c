//! Top-level query-to-location pipeline: hygiene, partitioning, evaluation,
//! and partition selection.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument};
use trep_core::name_matrix::STD_LANGUAGE;
use trep_core::{AlternateMatch, Location};
use trep_index::InvertedIndex;

use crate::error::{MatchError, Result};
use crate::evaluator::{PartitionEvaluator, PartitionOutcome};
use crate::filter::Filter;
use crate::hygiene::{normalise, tokenise};
use crate::partitioner::{StringPartitioner, StringSet};
use crate::scorer;
use crate::substring_matcher::SubstringMatcher;

/// Per-call knobs: retrieval breadth and cooperative cancellation.
#[derive(Clone, Default)]
pub struct SearchOptions {
    /// Max documents retrieved per matched cell (default: 10, matching the
    /// original top-10 match-set retrieval).
    pub top_k: Option<usize>,
    /// Checked once per partition evaluated; set to request early exit.
    pub cancel: Option<Arc<AtomicBool>>,
    /// Best-effort: once passed, evaluation stops and the best partition
    /// found so far is returned instead of erroring.
    pub deadline: Option<Instant>,
}

/// Result of a whole-query search: the winning partition's matched cells as
/// [`Location`]s, plus any cells that produced no match at all.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub locations: Vec<Location>,
    pub unmatched_words: Vec<String>,
    /// The winning partition's composite percentage (percent-space
    /// product described in the component design), exposed mainly for
    /// diagnostics/tests.
    pub total_percent: f64,
}

/// Drives a query through hygiene, partitioning, per-cell substring
/// matching, and partition selection.
pub struct MatchOrchestrator<'a> {
    index: &'a dyn InvertedIndex,
    filter: Filter,
}

impl<'a> MatchOrchestrator<'a> {
    pub fn new(index: &'a dyn InvertedIndex) -> Self {
        Self {
            index,
            filter: Filter::new(),
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    #[instrument(skip(self, options), fields(query = raw))]
    pub fn search(&self, raw: &str, options: &SearchOptions) -> Result<SearchOutcome> {
        let normalised = normalise(raw);
        let tokens = tokenise(&normalised);
        let partitions = StringPartitioner::partitions(&tokens);

        let top_k = options.top_k.unwrap_or(10);
        let matcher = SubstringMatcher::new(self.index, &self.filter).with_top_k(top_k);
        let evaluator = PartitionEvaluator::new(&matcher);

        let mut best: Option<(PartitionOutcome, &StringSet)> = None;

        for partition in &partitions {
            if let Some(cancel) = &options.cancel {
                if cancel.load(AtomicOrdering::Relaxed) {
                    return Err(MatchError::Cancelled);
                }
            }
            if let Some(deadline) = options.deadline {
                if Instant::now() >= deadline {
                    debug!("deadline exceeded, returning best partition found so far");
                    break;
                }
            }

            let outcome = evaluator.evaluate(partition)?;
            best = Some(match best {
                None => (outcome, partition),
                Some((best_outcome, best_partition)) => {
                    if is_better(&outcome, partition, &best_outcome, best_partition) {
                        (outcome, partition)
                    } else {
                        (best_outcome, best_partition)
                    }
                }
            });
        }

        let (outcome, partition) = best.ok_or_else(|| {
            MatchError::Internal("partitioner produced no partitions".to_string())
        })?;

        Ok(materialise(outcome, partition))
    }
}

/// Tie-break order: highest total percentage; on an exact tie, fewer
/// cells; on a further tie, the lexicographically smaller cell sequence.
fn is_better(
    outcome: &PartitionOutcome,
    partition: &StringSet,
    best_outcome: &PartitionOutcome,
    best_partition: &StringSet,
) -> bool {
    match outcome
        .total_percent
        .partial_cmp(&best_outcome.total_percent)
        .unwrap_or(Ordering::Equal)
    {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match partition.len().cmp(&best_partition.len()) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => partition.cells < best_partition.cells,
        },
    }
}

fn materialise(outcome: PartitionOutcome, partition: &StringSet) -> SearchOutcome {
    let mut locations = Vec::new();
    let mut unmatched_words = Vec::new();

    for (cell, cell_match) in partition.cells.iter().zip(outcome.cell_matches.iter()) {
        if !cell_match.is_match() {
            unmatched_words.push(cell.clone());
            continue;
        }

        let docs = &cell_match.documents.documents;
        let primary = &docs[0];

        let mut extra_matches = Vec::new();
        let mut alternate_matches = Vec::new();
        for doc in &docs[1..] {
            let hops = if doc.language == STD_LANGUAGE { 0 } else { 1 };
            let doc_score = scorer::score(doc.percent, &doc.record, hops);
            let alt = AlternateMatch {
                record: (*doc.record).clone(),
                score: doc_score,
            };
            if (doc.percent - primary.percent).abs() < f64::EPSILON {
                extra_matches.push(alt);
            } else {
                alternate_matches.push(alt);
            }
        }
        extra_matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        alternate_matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        locations.push(Location {
            record: (*primary.record).clone(),
            matching_percentage: cell_match.match_percent,
            effective_edit_distance: cell_match.edit_distance,
            allowable_edit_distance: cell_match.allowable_edit_distance,
            original_keywords: cell.clone(),
            corrected_keywords: cell_match.matched_string.clone(),
            extra_matches,
            alternate_matches,
        });
    }

    SearchOutcome {
        locations,
        unmatched_words,
        total_percent: outcome.total_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trep_core::codes::IataType;
    use trep_core::{LocationKey, LocationRecord};
    use trep_index::{index_record, IndexBuilder, InMemoryIndex};

    fn build_index() -> InMemoryIndex {
        let mut builder = IndexBuilder::new();
        builder.begin_build();

        let mut nce = LocationRecord::new(
            LocationKey::new("NCE", IataType::Airport, 6_299_418),
            "Nice Cote d'Azur",
            "Nice Cote d'Azur",
        );
        nce.latitude = 43.66272;
        nce.longitude = 7.20787;
        nce.page_rank = 50.0;
        index_record(&mut builder, nce);

        let mut sfo = LocationRecord::new(
            LocationKey::new("SFO", IataType::Airport, 5_391_959),
            "San Francisco",
            "San Francisco",
        );
        sfo.latitude = 37.6213;
        sfo.longitude = -122.3790;
        sfo.page_rank = 80.0;
        index_record(&mut builder, sfo);

        let mut rio = LocationRecord::new(
            LocationKey::new("RIO", IataType::City, 6_320_062),
            "Rio de Janeiro",
            "Rio de Janeiro",
        );
        rio.latitude = -22.9068;
        rio.longitude = -43.1729;
        index_record(&mut builder, rio);

        builder.commit().unwrap()
    }

    #[test]
    fn test_scenario_trivial_exact_match() {
        let index = build_index();
        let orchestrator = MatchOrchestrator::new(&index);
        let outcome = orchestrator.search("nce", &SearchOptions::default()).unwrap();
        assert_eq!(outcome.locations.len(), 1);
        assert_eq!(outcome.locations[0].iata_code(), "NCE");
        assert_eq!(outcome.locations[0].effective_edit_distance, 0);
        assert!(outcome.unmatched_words.is_empty());
    }

    #[test]
    fn test_scenario_single_cell_typo_is_corrected() {
        let index = build_index();
        let orchestrator = MatchOrchestrator::new(&index);
        let outcome = orchestrator.search("ncee", &SearchOptions::default()).unwrap();
        assert_eq!(outcome.locations.len(), 1);
        assert_eq!(outcome.locations[0].iata_code(), "NCE");
        assert_eq!(outcome.locations[0].effective_edit_distance, 1);
    }

    #[test]
    fn test_scenario_multi_place_partition() {
        let index = build_index();
        let orchestrator = MatchOrchestrator::new(&index);
        let outcome = orchestrator
            .search("san francisco rio de janeiro", &SearchOptions::default())
            .unwrap();

        let codes: Vec<&str> = outcome.locations.iter().map(|l| l.iata_code()).collect();
        assert!(codes.contains(&"SFO"));
        assert!(codes.contains(&"RIO"));
    }

    #[test]
    fn test_scenario_no_match_reports_unmatched_words() {
        let index = build_index();
        let orchestrator = MatchOrchestrator::new(&index);
        let outcome = orchestrator
            .search("zzxxqqyy wwuuvvtt", &SearchOptions::default())
            .unwrap();
        assert!(outcome.locations.is_empty());
        assert!(!outcome.unmatched_words.is_empty());
    }

    #[test]
    fn test_scenario_page_rank_breaks_ties_among_alternates() {
        let mut builder = IndexBuilder::new();
        builder.begin_build();
        let mut low = LocationRecord::new(
            LocationKey::new("AAA", IataType::Airport, 1),
            "Sample",
            "Sample",
        );
        low.page_rank = 10.0;
        index_record(&mut builder, low);
        let mut high = LocationRecord::new(
            LocationKey::new("BBB", IataType::Airport, 2),
            "Sample",
            "Sample",
        );
        high.page_rank = 90.0;
        index_record(&mut builder, high);
        let index = builder.commit().unwrap();

        let orchestrator = MatchOrchestrator::new(&index);
        let outcome = orchestrator.search("sample", &SearchOptions::default()).unwrap();
        assert_eq!(outcome.locations.len(), 1);
        // Both documents match at 100%, so the second becomes an extra
        // match; higher PageRank should sort first among extras.
        assert_eq!(outcome.locations[0].extra_matches.len(), 1);
    }

    #[test]
    fn test_cancellation_is_observed() {
        let index = build_index();
        let orchestrator = MatchOrchestrator::new(&index);
        let cancel = Arc::new(AtomicBool::new(true));
        let options = SearchOptions {
            cancel: Some(cancel),
            ..Default::default()
        };
        let err = orchestrator.search("nce", &options).unwrap_err();
        assert!(matches!(err, MatchError::Cancelled));
    }

    #[test]
    fn test_empty_query_yields_empty_outcome() {
        let index = build_index();
        let orchestrator = MatchOrchestrator::new(&index);
        let outcome = orchestrator.search("", &SearchOptions::default()).unwrap();
        assert!(outcome.locations.is_empty());
        assert!(outcome.unmatched_words.is_empty());
    }
}
