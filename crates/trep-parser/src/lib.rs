//! Parser for the OpenTrep POR (point-of-reference) flat-file catalog
//! format.
//!
//! This crate reads the caret (`^`)-delimited flat file described by the
//! catalog format, transparently handling `.bz2`/`.gz`/`.csv` compression,
//! and produces [`trep_core::LocationRecord`] values.

pub mod compression;
pub mod error;
pub mod fields;
pub mod por;

pub use compression::open_por_file;
pub use error::{ParseError, Result};
pub use por::{parse_file, parse_record, PorReader};
