//! The POR (point-of-reference) catalog record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codes::{GeonamesSource, IataType};
use crate::error::{Error, Result};
use crate::key::LocationKey;
use crate::name_matrix::NameMatrix;
use crate::records::admin::{AdminCode, AdminLevel, ServedCity};

/// Validity interval, in days, during which a [`LocationRecord`] is the
/// active representation of its POR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidityPeriod {
    pub date_from: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub modification_date: Option<NaiveDate>,
}

/// A single geographical point of reference: an airport, city, rail
/// station, bus station, heliport, port, or an offline/grouping entry.
///
/// This is a value type: cheap to clone, and owned by the POR catalog that
/// produced it (see `trep-parser`). It is immutable once constructed; the
/// parser builds one via [`LocationRecord::new`] and then [`validate`] is
/// called to check the invariants from the catalog specification.
///
/// [`validate`]: LocationRecord::validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub key: LocationKey,

    // Secondary identifiers.
    pub icao_code: Option<String>,
    pub faa_code: Option<String>,
    pub unlocodes: Vec<String>,
    pub uic_codes: Vec<i64>,
    pub city_code: Option<String>,

    // Names.
    pub common_name: String,
    pub ascii_name: String,
    pub name_matrix: NameMatrix,

    // Administrative hierarchy.
    pub country_code: String,
    pub alt_country_codes: Vec<String>,
    pub country_name: String,
    pub continent_name: String,
    pub admin1: AdminLevel,
    pub admin2: AdminLevel,
    pub admin3: AdminCode,
    pub admin4: AdminCode,
    pub state_code: Option<String>,
    pub region_code: Option<String>,

    // Geography.
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<i32>,
    pub gtopo30: Option<i32>,
    pub geoname_lat: Option<f64>,
    pub geoname_lon: Option<f64>,

    // Temporal.
    pub time_zone: Option<String>,
    pub gmt_offset: Option<f64>,
    pub dst_offset: Option<f64>,
    pub raw_offset: Option<f64>,
    pub validity: ValidityPeriod,

    // Classification.
    pub feature_class: Option<char>,
    pub feature_code: Option<String>,
    pub is_geonames: Option<GeonamesSource>,
    pub is_airport: bool,
    pub is_commercial: bool,
    pub population: Option<u64>,

    // Importance.
    pub page_rank: f64,

    // Links.
    pub wiki_link: Option<String>,

    /// 0 means "current"; non-zero designates a historical envelope.
    pub envelope_id: u32,

    pub served_cities: Vec<ServedCity>,
}

impl LocationRecord {
    /// Construct a record with the mandatory primary-key and name fields;
    /// every optional field defaults to empty/unset. Callers typically
    /// build up the remaining fields with direct struct-update syntax
    /// before calling [`validate`](Self::validate).
    pub fn new(key: LocationKey, common_name: impl Into<String>, ascii_name: impl Into<String>) -> Self {
        Self {
            key,
            icao_code: None,
            faa_code: None,
            unlocodes: Vec::new(),
            uic_codes: Vec::new(),
            city_code: None,
            common_name: common_name.into(),
            ascii_name: ascii_name.into(),
            name_matrix: NameMatrix::new(),
            country_code: String::new(),
            alt_country_codes: Vec::new(),
            country_name: String::new(),
            continent_name: String::new(),
            admin1: AdminLevel::default(),
            admin2: AdminLevel::default(),
            admin3: AdminCode::default(),
            admin4: AdminCode::default(),
            state_code: None,
            region_code: None,
            latitude: 0.0,
            longitude: 0.0,
            elevation: None,
            gtopo30: None,
            geoname_lat: None,
            geoname_lon: None,
            time_zone: None,
            gmt_offset: None,
            dst_offset: None,
            raw_offset: None,
            validity: ValidityPeriod::default(),
            feature_class: None,
            feature_code: None,
            is_geonames: None,
            is_airport: false,
            is_commercial: false,
            population: None,
            page_rank: 0.0,
            wiki_link: None,
            envelope_id: 0,
            served_cities: Vec::new(),
        }
    }

    pub fn is_current_envelope(&self) -> bool {
        self.envelope_id == 0
    }

    pub fn iata_code(&self) -> &str {
        &self.key.iata_code
    }

    pub fn iata_type(&self) -> IataType {
        self.key.iata_type
    }

    pub fn geonames_id(&self) -> u64 {
        self.key.geonames_id
    }

    /// Check the invariants from the catalog specification. Does not
    /// check cross-record invariants (uniqueness of the primary key across
    /// a catalog); that is the loader's responsibility.
    pub fn validate(&self) -> Result<()> {
        if self.key.iata_code.len() != 3 || !self.key.iata_code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(Error::ParseField {
                field: "iata_code",
                message: format!("expected 3 uppercase letters, got '{}'", self.key.iata_code),
            });
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidCoordinate(format!(
                "latitude {} out of range [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidCoordinate(format!(
                "longitude {} out of range [-180, 180]",
                self.longitude
            )));
        }
        if !(0.0..=100.0).contains(&self.page_rank) {
            return Err(Error::InvalidPageRank(self.page_rank));
        }
        if let Some(date) = self.validity.modification_date {
            let year = date.format("%Y").to_string().parse::<i32>().unwrap_or(0);
            if !(1970..=2099).contains(&year) {
                return Err(Error::InvalidDate(format!(
                    "modification date year {year} out of range [1970, 2099]"
                )));
            }
        }
        if self.key.iata_type == IataType::City {
            if let Some(ref city_code) = self.city_code {
                if city_code != &self.key.iata_code {
                    // A City record SHOULD self-reference; this is a soft
                    // invariant in the source catalog (observed violations
                    // exist), so it is not rejected, only left to callers
                    // that want strict checking.
                }
            }
        }
        Ok(())
    }
}
