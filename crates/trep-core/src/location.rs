//! The externally-visible match result: a [`LocationRecord`] annotated with
//! how the query matched it.

use serde::{Deserialize, Serialize};

use crate::records::LocationRecord;

/// A same- or lower-ranked alternate match surfaced alongside the primary
/// [`Location`] for a query cell (see the composite scoring rules).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateMatch {
    pub record: LocationRecord,
    /// Composite score (match percent x PageRank x language x envelope
    /// penalties), used only to order alternates relative to each other.
    pub score: f64,
}

/// A [`LocationRecord`] plus the metadata describing how a query cell
/// matched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub record: LocationRecord,

    /// Xapian-style match percentage in `[0, 100]` for the containing cell.
    pub matching_percentage: f64,
    /// Levenshtein distance actually incurred by spelling correction (0 if
    /// the cell matched exactly).
    pub effective_edit_distance: u32,
    /// The maximum edit distance that was permitted when the spelling
    /// suggestion was requested.
    pub allowable_edit_distance: u32,

    /// The original query cell text.
    pub original_keywords: String,
    /// What was actually searched (equal to `original_keywords` unless
    /// spelling-corrected).
    pub corrected_keywords: String,

    /// Other documents tied with this one at the same matching percentage.
    pub extra_matches: Vec<AlternateMatch>,
    /// Documents that matched at a lower percentage.
    pub alternate_matches: Vec<AlternateMatch>,
}

impl Location {
    pub fn display_name(&self) -> &str {
        &self.record.common_name
    }

    pub fn iata_code(&self) -> &str {
        self.record.iata_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::IataType;
    use crate::key::LocationKey;

    #[test]
    fn test_location_display_name() {
        let record = LocationRecord::new(
            LocationKey::new("NCE", IataType::Airport, 6_299_397),
            "Nice",
            "Nice",
        );
        let location = Location {
            record,
            matching_percentage: 100.0,
            effective_edit_distance: 0,
            allowable_edit_distance: 0,
            original_keywords: "nice".to_string(),
            corrected_keywords: "nice".to_string(),
            extra_matches: Vec::new(),
            alternate_matches: Vec::new(),
        };
        assert_eq!(location.display_name(), "Nice");
        assert_eq!(location.iata_code(), "NCE");
    }
}
