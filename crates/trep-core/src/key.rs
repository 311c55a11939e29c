//! Primary key of a [`crate::LocationRecord`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codes::IataType;

/// Primary key of a POR: the triple that uniquely identifies one record
/// within the active envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationKey {
    /// 3-letter uppercase IATA code.
    pub iata_code: String,
    /// The kind of place the IATA code designates.
    pub iata_type: IataType,
    /// Geonames identifier (0 when the POR has no geonames entry).
    pub geonames_id: u64,
}

impl LocationKey {
    pub fn new(iata_code: impl Into<String>, iata_type: IataType, geonames_id: u64) -> Self {
        Self {
            iata_code: iata_code.into(),
            iata_type,
            geonames_id,
        }
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.iata_code, self.iata_type, self.geonames_id
        )
    }
}
