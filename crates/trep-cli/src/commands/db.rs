//! `db` subcommand: schema management and catalog loading, the one-shot
//! analogues of the REPL's `create_tables`/`create_indexes`/
//! `fill_from_por_file` commands.

use anyhow::Result;
use clap::Subcommand;

use crate::session::Session;

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// Create the reverse-lookup schema (tables only).
    CreateTables,
    /// Create the reverse-lookup indexes.
    CreateIndexes,
    /// Stream the configured POR file into the fuzzy index and/or database.
    Fill,
    /// Show catalog/database statistics.
    Stats,
}

pub fn execute(session: &mut Session, command: DbCommand) -> Result<()> {
    match command {
        DbCommand::CreateTables => {
            session.create_tables()?;
            println!("tables created");
        }
        DbCommand::CreateIndexes => {
            session.create_indexes()?;
            println!("indexes created");
        }
        DbCommand::Fill => {
            let report = session.fill_from_por_file()?;
            println!("{report}");
        }
        DbCommand::Stats => {
            println!("fuzzy index documents: {}", session.index_len());
            if session.has_db() {
                println!("reverse-lookup records: {}", session.list_nb()?);
            } else {
                println!("reverse-lookup database: not configured");
            }
        }
    }
    Ok(())
}
