//! In-process inverted index over the POR catalog.
//!
//! Offline builders ([`IndexBuilder`]/[`index_record`]) turn
//! [`trep_core::LocationRecord`]s into documents; the resulting
//! [`InMemoryIndex`] is immutable and safe to share across concurrent
//! requests, implementing the [`InvertedIndex`] read path that
//! `trep-match`'s substring matcher consults.

pub mod builder;
pub mod document;
pub mod error;
pub mod levenshtein;
pub mod lookup;
pub mod memory;

pub use builder::{index_record, tokenise_name};
pub use document::{DocumentId, StoredDocument};
pub use error::{IndexError, Result};
pub use levenshtein::levenshtein;
pub use lookup::{InvertedIndex, MatchSet, MatchedDocument};
pub use memory::{IndexBuilder, InMemoryIndex};
