//! Core data types for the OpenTrep point-of-reference (POR) catalog.
//!
//! This crate provides:
//! - The [`LocationRecord`] value type describing one geographical POR
//! - The externally-visible [`Location`] match result
//! - Shared codes/enums (`IataType`, `GeonamesSource`) and error types

pub mod codes;
pub mod error;
pub mod key;
pub mod location;
pub mod name_matrix;
pub mod records;

pub use codes::{GeonamesSource, IataType};
pub use error::{Error, Result};
pub use key::LocationKey;
pub use location::{AlternateMatch, Location};
pub use name_matrix::{NameMatrix, STD_LANGUAGE};
pub use records::{AdminCode, AdminLevel, LocationRecord, ServedCity, ValidityPeriod};
