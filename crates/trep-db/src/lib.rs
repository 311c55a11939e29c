//! SQLite-backed reverse lookup over the POR catalog.
//!
//! Complements `trep-index`'s fuzzy [`trep_index::InvertedIndex`] with
//! exact-key lookups (`by_iata`, `by_icao`, `by_faa`, `by_unlocode`,
//! `by_uic_code`, `by_geoname_id`) and PageRank-ordered browsing, backed by
//! a pooled SQLite connection.

pub mod config;
pub mod error;
pub mod repository;
pub mod schema;

pub use config::DbConfig;
pub use error::{DbError, Result};
pub use repository::Database;
pub use schema::Schema;
