//! Interactive shell implementing the original catalog manager's command
//! set verbatim (`opentrep-dbmgr`'s REPL), backed by the same [`Session`]
//! the one-shot subcommands use.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::format::{FormatOutput, OutputFormat};
use crate::session::Session;

const TUTORIAL: &str = "\
Type a free-form place name (e.g. 'sna francisco rio de jniero') to run a \
fuzzy search, or one of the catalog-management commands listed by 'help'.";

const HELP: &str = "\
Commands:
  help                            show this message
  info                            show current configuration
  tutorial                        show a short usage tutorial
  quit                            exit the shell
  create_user                     no-op placeholder (SQLite has no users)
  reset_connection_string <str>   reopen the database at a new path
  create_tables                   create the reverse-lookup schema
  create_indexes                  create the reverse-lookup indexes
  toggle_deployment_number        advance the deployment number
  toggle_noniata_indexing_flag    toggle the noniata filter
  toggle_xapian_idexing_flag      toggle fuzzy-index building
  toggle_sqldb_inserting_flag     toggle reverse-lookup inserts
  fill_from_por_file               load the configured POR catalog
  list_by_iata <code>              reverse lookup by IATA code
  list_by_icao <code>              reverse lookup by ICAO code
  list_by_faa <code>               reverse lookup by FAA code
  list_by_unlocode <code>          reverse lookup by UN/LOCODE
  list_by_uiccode <num>            reverse lookup by UIC code
  list_by_geonameid <num>          reverse lookup by geonames id
  list_nb                          count persisted records
  list_all                        list every persisted record
  list_cont                       list the next page of ranked airports
  <anything else>                  run it as a fuzzy search query";

/// Run the interactive shell on stdin/stdout until EOF or `quit`.
pub fn run(session: &mut Session, format: OutputFormat) -> Result<()> {
    println!("opentrep-dbmgr shell. Type 'help' for commands, 'quit' to exit.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("opentrep> ");
        stdout.flush()?;

        let mut line = String::new();
        let bytes_read = stdin.lock().read_line(&mut line)?;
        if bytes_read == 0 {
            println!();
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match dispatch(session, line, format) {
            Ok(Control::Continue) => {}
            Ok(Control::Quit) => break,
            Err(err) => eprintln!("error: {err:#}"),
        }
    }

    Ok(())
}

enum Control {
    Continue,
    Quit,
}

fn dispatch(session: &mut Session, line: &str, format: OutputFormat) -> Result<Control> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or("").to_lowercase();
    let rest = parts.next().unwrap_or("").trim();

    match command.as_str() {
        "help" => println!("{HELP}"),
        "info" => print_info(session),
        "tutorial" => println!("{TUTORIAL}"),
        "quit" | "exit" => return Ok(Control::Quit),
        "create_user" => {
            session.create_user()?;
            println!("ok");
        }
        "reset_connection_string" => {
            session.reset_connection_string(rest)?;
            println!("connection reset to '{rest}'");
        }
        "create_tables" => {
            session.create_tables()?;
            println!("tables created");
        }
        "create_indexes" => {
            session.create_indexes()?;
            println!("indexes created");
        }
        "toggle_deployment_number" => {
            session.config.toggle_deployment_number();
            println!("deploymentnb = {}", session.config.deploymentnb);
        }
        "toggle_noniata_indexing_flag" => {
            session.config.toggle_noniata();
            println!("noniata = {}", session.config.noniata);
        }
        "toggle_xapian_idexing_flag" => {
            session.config.toggle_xapian_indexing();
            println!("xapianindex = {}", session.config.xapianindex);
        }
        "toggle_sqldb_inserting_flag" => {
            session.config.toggle_sqldb_inserting();
            println!("dbadd = {}", session.config.dbadd);
        }
        "fill_from_por_file" => {
            let report = session.fill_from_por_file()?;
            println!("{report}");
        }
        "list_by_iata" => print_records(session.list_by_iata(rest)?, format),
        "list_by_icao" => print_records(session.list_by_icao(rest)?, format),
        "list_by_faa" => print_records(session.list_by_faa(rest)?, format),
        "list_by_unlocode" => print_records(session.list_by_unlocode(rest)?, format),
        "list_by_uiccode" => {
            let code: i64 = rest.parse()?;
            print_records(session.list_by_uiccode(code)?, format);
        }
        "list_by_geonameid" => {
            let id: u64 = rest.parse()?;
            print_records(session.list_by_geonameid(id)?, format);
        }
        "list_nb" => println!("{}", session.list_nb()?),
        "list_all" => print_records(session.list_all()?, format),
        "list_cont" => print_records(session.list_cont(20)?, format),
        _ => run_search(session, line, format)?,
    }

    Ok(Control::Continue)
}

fn print_info(session: &Session) {
    let config = &session.config;
    println!("porfile:      {}", config.porfile.display());
    println!("xapiandb:     {}", config.xapiandb.display());
    println!("sqldbtype:    {}", config.sqldbtype);
    println!("sqldbconx:    {}", config.sqldbconx);
    println!("deploymentnb: {}", config.deploymentnb);
    println!("noniata:      {}", config.noniata);
    println!("xapianindex:  {}", config.xapianindex);
    println!("dbadd:        {}", config.dbadd);
    println!("index size:   {} documents", session.index_len());
}

fn print_records(records: Vec<trep_core::LocationRecord>, format: OutputFormat) {
    if records.is_empty() {
        println!("(no records)");
    } else {
        println!("{}", records.format(format));
    }
}

fn run_search(session: &Session, query: &str, format: OutputFormat) -> Result<()> {
    let outcome = session.search(query)?;
    if outcome.locations.is_empty() {
        println!("no match for '{query}'");
    } else {
        println!("{}", outcome.locations.format(format));
    }
    if !outcome.unmatched_words.is_empty() {
        println!("unmatched words: {}", outcome.unmatched_words.join(", "));
    }
    Ok(())
}
