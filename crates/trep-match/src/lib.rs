//! Fuzzy place-of-reference matching engine.
//!
//! Pipeline: [`hygiene::normalise`]/[`hygiene::tokenise`] the raw query,
//! [`partitioner::StringPartitioner`] enumerates the `2^(n-1)` ways to
//! group the tokens into cells, [`substring_matcher::SubstringMatcher`]
//! matches each cell against a [`trep_index::InvertedIndex`] (with
//! spelling-correction fallback), [`evaluator::PartitionEvaluator`]
//! composes the cells' percentages, and
//! [`orchestrator::MatchOrchestrator`] selects the winning partition and
//! materialises [`trep_core::Location`]s.

pub mod error;
pub mod evaluator;
pub mod filter;
pub mod hygiene;
pub mod orchestrator;
pub mod partitioner;
pub mod scorer;
pub mod substring_matcher;

pub use error::{MatchError, Result};
pub use evaluator::{PartitionEvaluator, PartitionOutcome, UNMATCHED_CELL_PENALTY};
pub use filter::Filter;
pub use hygiene::{diacritic_hint, normalise, tokenise};
pub use orchestrator::{MatchOrchestrator, SearchOptions, SearchOutcome};
pub use partitioner::{StringPartitioner, StringSet};
pub use scorer::score;
pub use substring_matcher::{CellMatch, SubstringMatcher};
