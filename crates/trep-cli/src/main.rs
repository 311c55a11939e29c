//! `opentrep-dbmgr`: command-line shell and one-shot query tool for the
//! OpenTrep point-of-reference catalog.
//!
//! # Quick search
//!
//! ```sh
//! opentrep-dbmgr search "sna francisco rio de jniero"
//! ```
//!
//! With no subcommand, drops into the interactive shell (`§6.2`).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod format;
mod repl;
mod session;

use commands::{DbCommand, LookupCommand};
use config::{Config, SqlDbType};
use format::OutputFormat;
use session::Session;

#[derive(Parser)]
#[command(name = "opentrep-dbmgr")]
#[command(author, version, about = "OpenTrep point-of-reference catalog manager", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format (table, json, json-pretty)
    #[arg(short, long, default_value = "table", global = true)]
    format: String,

    /// Path to the POR catalog flat file (plain, .gz or .bz2)
    #[arg(long, global = true)]
    porfile: Option<PathBuf>,

    /// SQL backend for reverse lookup (nodb, sqlite, mysql)
    #[arg(long, global = true)]
    sqldbtype: Option<String>,

    /// SQL connection string / SQLite file path
    #[arg(long, global = true)]
    sqldbconx: Option<String>,

    /// Do not filter out non-IATA-referenced entries when filling the catalog
    #[arg(long, global = true)]
    no_noniata: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a fuzzy free-text search
    Search {
        /// Free-form place query
        query: String,
    },

    /// Reverse lookup by an exact identifier
    Lookup {
        #[command(subcommand)]
        command: LookupCommand,
    },

    /// Catalog/database management
    Db {
        #[command(subcommand)]
        command: DbCommand,
    },

    /// Drop into the interactive shell explicitly
    Shell,

    /// Start the REST API server over the session's index/database
    Serve {
        /// Listen port
        #[arg(short, long, default_value_t = 3100)]
        port: u16,

        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Allowed CORS origins (repeatable; "*" allows any origin)
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let config = build_config(&cli)?;
    let mut session = Session::new(config)?;

    match cli.command {
        Some(Commands::Search { query }) => commands::search::execute(&session, &query, format),
        Some(Commands::Lookup { command }) => commands::lookup::execute(&session, command, format),
        Some(Commands::Db { command }) => commands::db::execute(&mut session, command),
        Some(Commands::Serve { port, bind, cors_origins }) => {
            commands::serve::execute(&session, port, &bind, cors_origins).await
        }
        Some(Commands::Shell) | None => repl::run(&mut session, format),
    }
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::default();
    if let Some(ref porfile) = cli.porfile {
        config.porfile = porfile.clone();
    }
    if let Some(ref sqldbtype) = cli.sqldbtype {
        config = config.with_sqldbtype(sqldbtype.parse::<SqlDbType>().map_err(anyhow::Error::msg)?);
    }
    if let Some(ref sqldbconx) = cli.sqldbconx {
        config.sqldbconx = sqldbconx.clone();
    }
    if cli.no_noniata {
        config.noniata = false;
    }
    Ok(config)
}
