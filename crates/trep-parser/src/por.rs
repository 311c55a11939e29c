//! Parsing of individual POR flat-file records and the line-oriented
//! reader that streams them.
//!
//! One record per line, `^`-delimited, exactly as laid out in the catalog
//! format's field grammar. The header row (starting with the literal text
//! `iata_code`) is skipped.

use std::io::BufRead;
use std::path::Path;

use trep_core::codes::{GeonamesSource, IataType};
use trep_core::key::LocationKey;
use trep_core::name_matrix::STD_LANGUAGE;
use trep_core::records::{AdminCode, AdminLevel, LocationRecord, ValidityPeriod};

use crate::compression::open_por_file;
use crate::error::{ParseError, Result};
use crate::fields::{
    parse_alt_name_section, parse_city_detail_list, parse_date, parse_opt_char, parse_opt_f64,
    parse_opt_i32, parse_opt_string, parse_opt_u64, parse_tvl_por_list, parse_uic_list,
    parse_unlocode_list,
};

const HEADER_PREFIX: &str = "iata_code";
const FIELD_SEPARATOR: char = '^';

/// Minimum number of `^`-delimited fields a well-formed record must carry
/// (through `geoname_lon`, the last documented column).
const EXPECTED_FIELD_COUNT: usize = 51;

fn field<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).copied().unwrap_or("")
}

/// Parse one `^`-delimited POR line into a [`LocationRecord`].
pub fn parse_record(line: &str, line_number: usize) -> Result<LocationRecord> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < EXPECTED_FIELD_COUNT {
        return Err(ParseError::PorFileParsing {
            line: line_number,
            detail: format!(
                "expected at least {EXPECTED_FIELD_COUNT} fields, got {}",
                fields.len()
            ),
        });
    }

    let iata_code = field(&fields, 0).trim().to_uppercase();
    if iata_code.len() != 3 {
        return Err(ParseError::PorFileParsing {
            line: line_number,
            detail: format!("invalid IATA code '{iata_code}'"),
        });
    }

    let location_type_raw = field(&fields, 41);
    let iata_type: IataType = location_type_raw.parse().map_err(|_| ParseError::PorFileParsing {
        line: line_number,
        detail: format!("invalid location_type '{location_type_raw}'"),
    })?;

    let geonames_id = parse_opt_u64(field(&fields, 4)).unwrap_or(0);
    let key = LocationKey::new(iata_code, iata_type, geonames_id);

    let latitude: f64 = field(&fields, 8).trim().parse().map_err(|_| ParseError::PorFileParsing {
        line: line_number,
        detail: format!("invalid latitude '{}'", field(&fields, 8)),
    })?;
    let longitude: f64 = field(&fields, 9).trim().parse().map_err(|_| ParseError::PorFileParsing {
        line: line_number,
        detail: format!("invalid longitude '{}'", field(&fields, 9)),
    })?;

    let mut record = LocationRecord::new(key, field(&fields, 6), field(&fields, 7));
    record.icao_code = parse_opt_string(field(&fields, 1));
    record.faa_code = parse_opt_string(field(&fields, 2));
    record.is_geonames = parse_opt_string(field(&fields, 3))
        .and_then(|s| s.parse::<GeonamesSource>().ok());
    record.envelope_id = parse_opt_i32(field(&fields, 5)).unwrap_or(0).max(0) as u32;
    record.latitude = latitude;
    record.longitude = longitude;
    record.feature_class = parse_opt_char(field(&fields, 10));
    record.feature_code = parse_opt_string(field(&fields, 11));
    record.page_rank = parse_opt_f64(field(&fields, 12)).unwrap_or(0.0);
    record.validity.date_from = parse_date(field(&fields, 13));
    record.validity.date_end = parse_date(field(&fields, 14));
    // field 15 ("comment") carries no modelled column.
    record.country_code = field(&fields, 16).trim().to_string();
    record.alt_country_codes = field(&fields, 17)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    record.country_name = field(&fields, 18).trim().to_string();
    record.continent_name = field(&fields, 19).trim().to_string();
    record.admin1 = AdminLevel {
        code: parse_opt_string(field(&fields, 20)),
        name_utf8: parse_opt_string(field(&fields, 21)),
        name_ascii: parse_opt_string(field(&fields, 22)),
    };
    record.admin2 = AdminLevel {
        code: parse_opt_string(field(&fields, 23)),
        name_utf8: parse_opt_string(field(&fields, 24)),
        name_ascii: parse_opt_string(field(&fields, 25)),
    };
    record.admin3 = AdminCode {
        code: parse_opt_string(field(&fields, 26)),
    };
    record.admin4 = AdminCode {
        code: parse_opt_string(field(&fields, 27)),
    };
    record.population = parse_opt_u64(field(&fields, 28));
    record.elevation = parse_opt_i32(field(&fields, 29));
    record.gtopo30 = parse_opt_i32(field(&fields, 30));
    record.time_zone = parse_opt_string(field(&fields, 31));
    record.gmt_offset = parse_opt_f64(field(&fields, 32));
    record.dst_offset = parse_opt_f64(field(&fields, 33));
    record.raw_offset = parse_opt_f64(field(&fields, 34));
    record.validity.modification_date = parse_date(field(&fields, 35));

    // field 36/37 (city_code_list / city_name_list) duplicate information
    // present in the richer city_detail_list (field 38); the city code is
    // derived from the first entry of the detail list below.
    record.served_cities = parse_city_detail_list(field(&fields, 38));
    record.city_code = record
        .served_cities
        .first()
        .map(|c| c.iata_code.clone())
        .or_else(|| {
            field(&fields, 36)
                .split(',')
                .next()
                .and_then(parse_opt_string)
        });
    let _travel_related_por = parse_tvl_por_list(field(&fields, 39));

    record.state_code = parse_opt_string(field(&fields, 40));
    record.wiki_link = parse_opt_string(field(&fields, 42));

    for alt in parse_alt_name_section(field(&fields, 43)) {
        let language = alt.language.unwrap_or_else(|| STD_LANGUAGE.to_string());
        let mut names = record
            .name_matrix
            .get(&language)
            .map(|n| n.to_vec())
            .unwrap_or_default();
        names.push(alt.name);
        record.name_matrix.insert(language, names);
    }
    if record.name_matrix.get(STD_LANGUAGE).is_none() && !record.common_name.is_empty() {
        record
            .name_matrix
            .insert(STD_LANGUAGE, vec![record.common_name.clone()]);
    }

    // fields 44/45/46 (wac, wac_name, ccy_code) carry no modelled column.
    record.unlocodes = parse_unlocode_list(field(&fields, 47));
    record.uic_codes = parse_uic_list(field(&fields, 48));
    record.geoname_lat = parse_opt_f64(field(&fields, 49));
    record.geoname_lon = parse_opt_f64(field(&fields, 50));

    record.is_airport = record.key.iata_type == IataType::Airport;
    record.is_commercial = record.page_rank > 0.0;

    record.validate()?;
    Ok(record)
}

/// Streaming reader over a POR catalog file (compressed or plain). Skips
/// the header row and blank lines.
pub struct PorReader {
    reader: Box<dyn BufRead>,
    line_number: usize,
    buffer: String,
}

impl PorReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let reader = open_por_file(path)?;
        Ok(Self::from_reader(reader))
    }

    pub fn from_reader(reader: Box<dyn BufRead>) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_raw_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        let bytes_read = self.reader.read_line(&mut self.buffer)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let line = self.buffer.trim_end_matches(['\r', '\n']).to_string();
        Ok(Some(line))
    }

    /// Read the next record, skipping the header row and blank lines.
    pub fn next_record(&mut self) -> Result<Option<LocationRecord>> {
        loop {
            match self.read_raw_line()? {
                None => return Ok(None),
                Some(line) => {
                    if line.is_empty() || line.starts_with(HEADER_PREFIX) {
                        continue;
                    }
                    return Ok(Some(parse_record(&line, self.line_number)?));
                }
            }
        }
    }
}

impl Iterator for PorReader {
    type Item = Result<LocationRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Convenience function to parse a complete POR file into records.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<LocationRecord>> {
    PorReader::open(path)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nce_line() -> String {
        // 51 caret-delimited fields, in column order.
        let fields = [
            "NCE", "LFMN", "", "Y", "6299418", "0", "Nice Cote d'Azur", "Nice Cote d'Azur",
            "43.66272", "7.20787", "S", "AIRP", "50", "", "", "", "FR", "", "France", "Europe",
            "B8", "Provence-Alpes-Cote d'Azur", "Provence-Alpes-Cote d'Azur", "06", "Alpes-Maritimes",
            "Alpes-Maritimes", "", "", "0", "2", "2", "Europe/Paris", "1", "2", "1", "2013-05-01",
            "NCE", "Nice", "NCE|6299418|Nice|Nice|FR|B8", "", "B8", "A", "", "en|Nice Airport|",
            "", "", "EUR", "", "", "43.66272", "7.20787",
        ];
        fields.join("^")
    }

    #[test]
    fn test_parse_nce_record() {
        let record = parse_record(&nce_line(), 2).unwrap();
        assert_eq!(record.iata_code(), "NCE");
        assert_eq!(record.iata_type(), IataType::Airport);
        assert_eq!(record.geonames_id(), 6_299_418);
        assert_eq!(record.common_name, "Nice Cote d'Azur");
        assert!((record.latitude - 43.66272).abs() < 1e-6);
        assert_eq!(record.country_code, "FR");
        assert_eq!(record.page_rank, 50.0);
        assert_eq!(record.city_code.as_deref(), Some("NCE"));
        assert_eq!(record.served_cities.len(), 1);
        assert_eq!(record.name_matrix.preferred("en"), Some("Nice Airport"));
    }

    #[test]
    fn test_too_few_fields_rejected() {
        let err = parse_record("NCE^LFMN", 1).unwrap_err();
        assert!(matches!(err, ParseError::PorFileParsing { .. }));
    }

    #[test]
    fn test_bad_iata_code_rejected() {
        let mut bad = nce_line();
        bad.replace_range(0..3, "NC");
        let err = parse_record(&bad, 1).unwrap_err();
        assert!(matches!(err, ParseError::PorFileParsing { .. }));
    }

    #[test]
    fn test_reader_skips_header_and_blank_lines() {
        let content = format!("iata_code^...\n\n{}\n", nce_line());
        let reader = crate::compression::plain_reader(std::io::Cursor::new(content.into_bytes()));
        let mut por_reader = PorReader::from_reader(reader);
        let record = por_reader.next_record().unwrap().unwrap();
        assert_eq!(record.iata_code(), "NCE");
        assert!(por_reader.next_record().unwrap().is_none());
    }
}
