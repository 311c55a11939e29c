//! Output formatting for [`LocationRecord`]s and [`Location`]s, grounded on
//! the teacher's `uls-query::output::{OutputFormat, FormatOutput}`.

use trep_core::{Location, LocationRecord};

/// Supported output formats for the CLI's `--format` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    JsonPretty,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "json-pretty" | "jsonpretty" => Ok(Self::JsonPretty),
            _ => Err(()),
        }
    }
}

pub trait FormatOutput {
    fn format(&self, format: OutputFormat) -> String;
}

impl FormatOutput for LocationRecord {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => format_record_table(self),
            OutputFormat::Json => serde_json::to_string(self).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }
}

impl FormatOutput for Vec<LocationRecord> {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self
                .iter()
                .map(format_record_table)
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Json => serde_json::to_string(self).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }
}

impl FormatOutput for Location {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => format_location_table(self),
            OutputFormat::Json => serde_json::to_string(self).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }
}

impl FormatOutput for Vec<Location> {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self
                .iter()
                .map(format_location_table)
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Json => serde_json::to_string(self).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }
}

fn format_record_table(record: &LocationRecord) -> String {
    format!(
        "{:<4} {:<4} {:<8} {:<30} {:>9.4} {:>10.4}  pr={:>5.1}  {}",
        record.key.iata_code,
        record.icao_code.as_deref().unwrap_or("-"),
        record.key.iata_type,
        record.common_name,
        record.latitude,
        record.longitude,
        record.page_rank,
        record.country_code,
    )
}

fn format_location_table(location: &Location) -> String {
    format!(
        "{:<4} {:<30} pct={:>6.2} edit={:<2} '{}' -> '{}'",
        location.iata_code(),
        location.display_name(),
        location.matching_percentage,
        location.effective_edit_distance,
        location.original_keywords,
        location.corrected_keywords,
    )
}
