//! API response envelopes.

use serde::Serialize;
use trep_core::Location;

/// Paginated list response envelope, mirroring the teacher's
/// `ListResponse<T>`.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub count: usize,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

/// Response body for `GET /search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub locations: Vec<Location>,
    pub unmatched_words: Vec<String>,
    pub total_percent: f64,
}
