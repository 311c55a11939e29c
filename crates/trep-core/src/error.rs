//! Error types for core POR data operations.

use thiserror::Error;

/// Core opentrep error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to parse a field value.
    #[error("failed to parse field '{field}': {message}")]
    ParseField {
        field: &'static str,
        message: String,
    },

    /// Invalid date: year out of the [1970, 2099] validity window, or
    /// unparsable.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Invalid enum value.
    #[error("invalid {enum_type} value: {value}")]
    InvalidEnumValue {
        enum_type: &'static str,
        value: String,
    },

    /// Latitude/longitude outside their valid ranges.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// PageRank outside [0, 100].
    #[error("invalid page rank: {0}")]
    InvalidPageRank(f64),

    /// Missing required field.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Result type alias for core opentrep operations.
pub type Result<T> = std::result::Result<T, Error>;
