//! Administrative-hierarchy sub-structures of a [`crate::LocationRecord`].

use serde::{Deserialize, Serialize};

/// One level (1 or 2) of the administrative subdivision hierarchy, carrying
/// both a code and its UTF-8/ASCII name spellings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminLevel {
    pub code: Option<String>,
    pub name_utf8: Option<String>,
    pub name_ascii: Option<String>,
}

impl AdminLevel {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.name_utf8.is_none() && self.name_ascii.is_none()
    }
}

/// Levels 3 and 4 carry only a bare code in the source catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminCode {
    pub code: Option<String>,
}

/// A city served by a non-city POR (e.g. an airport's city), as listed in
/// the `city_detail_list` column of the flat file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServedCity {
    pub iata_code: String,
    pub geonames_id: u64,
    pub name_utf8: String,
    pub name_ascii: String,
    pub country_code: String,
    pub state_code: Option<String>,
}
