//! Code definitions and enumerations for POR data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The kind of point of reference an IATA/ICAO/FAA code designates.
///
/// Mirrors the original catalog's `location_type` column; `Last` is a
/// sentinel used by callers that iterate the full enum range and is never
/// produced by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IataType {
    Airport,
    City,
    RailStation,
    Bus,
    Heliport,
    Port,
    OffLine,
    Group,
    GeneralGroup,
    Last,
}

impl IataType {
    /// The single-letter code used in the POR flat-file `location_type`
    /// column.
    pub fn as_code(&self) -> char {
        match self {
            Self::Airport => 'A',
            Self::City => 'C',
            Self::RailStation => 'R',
            Self::Bus => 'B',
            Self::Heliport => 'H',
            Self::Port => 'P',
            Self::OffLine => 'O',
            Self::Group => 'G',
            Self::GeneralGroup => 'S',
            Self::Last => 'Z',
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Airport => "airport",
            Self::City => "city",
            Self::RailStation => "rail_station",
            Self::Bus => "bus",
            Self::Heliport => "heliport",
            Self::Port => "port",
            Self::OffLine => "offline",
            Self::Group => "group",
            Self::GeneralGroup => "general_group",
            Self::Last => "last",
        }
    }
}

impl fmt::Display for IataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let (Some(code), None) = (chars.next(), chars.next()) else {
            return Err(Error::InvalidEnumValue {
                enum_type: "IataType",
                value: s.to_string(),
            });
        };
        match code.to_ascii_uppercase() {
            'A' => Ok(Self::Airport),
            'C' => Ok(Self::City),
            'R' => Ok(Self::RailStation),
            'B' => Ok(Self::Bus),
            'H' => Ok(Self::Heliport),
            'P' => Ok(Self::Port),
            'O' => Ok(Self::OffLine),
            'G' => Ok(Self::Group),
            'S' => Ok(Self::GeneralGroup),
            'Z' => Ok(Self::Last),
            _ => Err(Error::InvalidEnumValue {
                enum_type: "IataType",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether a POR record is the currently active geonames source, a
/// non-geonames (IATA-only) source, or a legacy ("zero") source.
///
/// Mirrors the `is_geonames` flat-file column (`Y`/`N`/`Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GeonamesSource {
    Yes,
    No,
    Zero,
}

impl fmt::Display for GeonamesSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Yes => "Y",
            Self::No => "N",
            Self::Zero => "Z",
        };
        write!(f, "{s}")
    }
}

impl FromStr for GeonamesSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "Y" => Ok(Self::Yes),
            "N" => Ok(Self::No),
            "Z" => Ok(Self::Zero),
            _ => Err(Error::InvalidEnumValue {
                enum_type: "GeonamesSource",
                value: s.to_string(),
            }),
        }
    }
}
