//! Scoring of a whole partition from its per-cell matches.

use crate::error::Result;
use crate::partitioner::StringSet;
use crate::substring_matcher::{CellMatch, SubstringMatcher};

/// Multiplier applied for a cell that produced no documents at all, composed
/// the same percent-normalised way as a matched cell's score (divided by
/// 100.0) so a single unmatched cell still collapses the partition's total
/// towards zero without a scale mismatch against matched cells.
pub const UNMATCHED_CELL_PENALTY: f64 = 0.05;

/// A matched percentage indistinguishable from 100.0 is nudged down to this
/// value, so that a query which happens to decompose into more, individually
/// perfect cells (e.g. `{"san", "francisco"}`) scores slightly lower than
/// the single-cell exact match (`{"san francisco"}`), letting the evaluator
/// prefer coarser partitions when both match perfectly.
const EXACT_MATCH_STABILIZER: f64 = 99.999;

/// Outcome of evaluating one [`StringSet`] partition.
#[derive(Debug, Clone)]
pub struct PartitionOutcome {
    pub total_percent: f64,
    pub cell_matches: Vec<CellMatch>,
}

/// Walks a partition's cells through a [`SubstringMatcher`] and composes
/// their percentages multiplicatively.
pub struct PartitionEvaluator<'a> {
    matcher: &'a SubstringMatcher<'a>,
}

impl<'a> PartitionEvaluator<'a> {
    pub fn new(matcher: &'a SubstringMatcher<'a>) -> Self {
        Self { matcher }
    }

    pub fn evaluate(&self, partition: &StringSet) -> Result<PartitionOutcome> {
        let mut total_percent = 100.0;
        let mut cell_matches = Vec::with_capacity(partition.cells.len());

        for cell in &partition.cells {
            let cell_match = self.matcher.match_cell(cell)?;

            if !cell_match.is_match() {
                total_percent *= UNMATCHED_CELL_PENALTY / 100.0;
                cell_matches.push(cell_match);
                continue;
            }

            let percent = if (cell_match.match_percent - 100.0).abs() < f64::EPSILON {
                EXACT_MATCH_STABILIZER
            } else {
                cell_match.match_percent
            };
            total_percent *= percent / 100.0;
            cell_matches.push(cell_match);
        }

        Ok(PartitionOutcome {
            total_percent,
            cell_matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use trep_core::codes::IataType;
    use trep_core::{LocationKey, LocationRecord};
    use trep_index::{index_record, IndexBuilder, InMemoryIndex};

    fn build_index() -> InMemoryIndex {
        let mut builder = IndexBuilder::new();
        builder.begin_build();
        let mut rec = LocationRecord::new(
            LocationKey::new("NCE", IataType::Airport, 6_299_418),
            "Nice",
            "Nice",
        );
        rec.latitude = 43.66272;
        rec.longitude = 7.20787;
        index_record(&mut builder, rec);
        builder.commit().unwrap()
    }

    #[test]
    fn test_single_exact_cell_applies_stabilizer() {
        let index = build_index();
        let filter = Filter::new();
        let matcher = SubstringMatcher::new(&index, &filter);
        let evaluator = PartitionEvaluator::new(&matcher);

        let partition = StringSet {
            cells: vec!["nce".to_string()],
        };
        let outcome = evaluator.evaluate(&partition).unwrap();
        assert!((outcome.total_percent - 99.999).abs() < 1e-9);
    }

    #[test]
    fn test_unmatched_cell_applies_harsh_penalty() {
        let index = build_index();
        let filter = Filter::new();
        let matcher = SubstringMatcher::new(&index, &filter);
        let evaluator = PartitionEvaluator::new(&matcher);

        let partition = StringSet {
            cells: vec!["zzxxqqyy".to_string()],
        };
        let outcome = evaluator.evaluate(&partition).unwrap();
        assert!((outcome.total_percent - (100.0 * UNMATCHED_CELL_PENALTY / 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_single_cell_beats_two_cell_split_of_same_exact_phrase() {
        let mut builder = IndexBuilder::new();
        builder.begin_build();
        let mut rec = LocationRecord::new(
            LocationKey::new("SFO", IataType::Airport, 5_391_959),
            "San Francisco",
            "San Francisco",
        );
        rec.latitude = 37.6213;
        rec.longitude = -122.3790;
        index_record(&mut builder, rec);
        let index = builder.commit().unwrap();

        let filter = Filter::new();
        let matcher = SubstringMatcher::new(&index, &filter);
        let evaluator = PartitionEvaluator::new(&matcher);

        let one_cell = evaluator
            .evaluate(&StringSet {
                cells: vec!["san francisco".to_string()],
            })
            .unwrap();
        let two_cell = evaluator
            .evaluate(&StringSet {
                cells: vec!["san".to_string(), "francisco".to_string()],
            })
            .unwrap();

        assert!(one_cell.total_percent > two_cell.total_percent);
    }
}
