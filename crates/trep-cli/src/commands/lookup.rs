//! `lookup` subcommand: exact reverse lookup by each catalog identifier
//! (`list_by_iata`/`list_by_icao`/... in the REPL's naming).

use anyhow::Result;
use clap::Subcommand;

use crate::format::{FormatOutput, OutputFormat};
use crate::session::Session;

#[derive(Subcommand, Debug)]
pub enum LookupCommand {
    /// Look up by 3-letter IATA code.
    Iata { code: String },
    /// Look up by 4-letter ICAO code.
    Icao { code: String },
    /// Look up by FAA code.
    Faa { code: String },
    /// Look up by UN/LOCODE.
    Unlocode { code: String },
    /// Look up by UIC rail code.
    Uic { code: i64 },
    /// Look up by geonames identifier.
    Geonameid { id: u64 },
}

pub fn execute(session: &Session, command: LookupCommand, format: OutputFormat) -> Result<()> {
    let records = match command {
        LookupCommand::Iata { code } => session.list_by_iata(&code)?,
        LookupCommand::Icao { code } => session.list_by_icao(&code)?,
        LookupCommand::Faa { code } => session.list_by_faa(&code)?,
        LookupCommand::Unlocode { code } => session.list_by_unlocode(&code)?,
        LookupCommand::Uic { code } => session.list_by_uiccode(code)?,
        LookupCommand::Geonameid { id } => session.list_by_geonameid(id)?,
    };

    if records.is_empty() {
        eprintln!("no matching record found");
        std::process::exit(1);
    }
    println!("{}", records.format(format));
    Ok(())
}
