//! Sub-format parsers for individual POR flat-file fields (see the catalog
//! format's field grammar).

use chrono::NaiveDate;

use trep_core::records::ServedCity;

/// Parse an optional string field, empty string maps to `None`.
pub fn parse_opt_string(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

pub fn parse_opt_i32(s: &str) -> Option<i32> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        s.parse().ok()
    }
}

pub fn parse_opt_i64(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        s.parse().ok()
    }
}

pub fn parse_opt_u64(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        s.parse().ok()
    }
}

pub fn parse_opt_f64(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        s.parse().ok()
    }
}

pub fn parse_opt_char(s: &str) -> Option<char> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        s.chars().next()
    }
}

pub fn parse_f64_or_default(s: &str) -> f64 {
    parse_opt_f64(s).unwrap_or(0.0)
}

/// Parse a `YYYY-MM-DD` date field. The literal `-1` means "no
/// modification date" and is accepted only for the `moddate` column; other
/// callers treat it as unparsable (returns `None`).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() || s == "-1" {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse `tvl_por_list`: a comma-separated list of IATA codes.
pub fn parse_tvl_por_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `unlc_list`: `=`-separated `UNLOCODE|qualifiers?` entries. Only
/// the UN/LOCODE itself is kept; qualifiers are not currently modelled.
pub fn parse_unlocode_list(s: &str) -> Vec<String> {
    s.split('=')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.split('|').next().unwrap_or(entry).to_string())
        .filter(|code| !code.is_empty())
        .collect()
}

/// Parse `uic_list`: `=`-separated `UIC|qualifiers?` entries.
pub fn parse_uic_list(s: &str) -> Vec<i64> {
    s.split('=')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| entry.split('|').next())
        .filter_map(|code| code.parse::<i64>().ok())
        .collect()
}

/// One entry of the `alt_name_section` column: an optional language code,
/// a name, and 0-4 qualifier characters drawn from `shpc`.
#[derive(Debug, Clone, PartialEq)]
pub struct AltName {
    pub language: Option<String>,
    pub name: String,
    pub qualifiers: String,
}

/// Parse `alt_name_section`: `=`-separated `langcode|name|qualifiers`
/// triples.
pub fn parse_alt_name_section(s: &str) -> Vec<AltName> {
    s.split('=')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let mut parts = entry.splitn(3, '|');
            let language = parts.next().and_then(parse_opt_string);
            let name = parts.next()?.to_string();
            let qualifiers = parts.next().unwrap_or("").to_string();
            if name.is_empty() {
                None
            } else {
                Some(AltName {
                    language,
                    name,
                    qualifiers,
                })
            }
        })
        .collect()
}

/// Parse `city_detail_list`: `=`-separated
/// `CODE|GEONAME_ID|UTF_NAME|ASCII_NAME|COUNTRY|STATE` entries.
pub fn parse_city_detail_list(s: &str) -> Vec<ServedCity> {
    s.split('=')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let parts: Vec<&str> = entry.split('|').collect();
            if parts.len() < 5 {
                return None;
            }
            Some(ServedCity {
                iata_code: parts[0].to_string(),
                geonames_id: parts[1].parse().unwrap_or(0),
                name_utf8: parts[2].to_string(),
                name_ascii: parts[3].to_string(),
                country_code: parts[4].to_string(),
                state_code: parts.get(5).and_then(|s| parse_opt_string(s)),
            })
        })
        .collect()
}
