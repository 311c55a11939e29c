//! Record types making up the POR catalog data model.

pub mod admin;
pub mod location_record;

pub use admin::{AdminCode, AdminLevel, ServedCity};
pub use location_record::{LocationRecord, ValidityPeriod};
