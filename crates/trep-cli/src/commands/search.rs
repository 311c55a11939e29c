//! `search` subcommand: fuzzy free-text place lookup, the direct
//! invocation analogue of the original query engine.

use anyhow::Result;

use crate::format::{FormatOutput, OutputFormat};
use crate::session::Session;

pub fn execute(session: &Session, query: &str, format: OutputFormat) -> Result<()> {
    let outcome = session.search(query)?;

    if outcome.locations.is_empty() {
        eprintln!("no match for '{query}'");
        if !outcome.unmatched_words.is_empty() {
            eprintln!("unmatched words: {}", outcome.unmatched_words.join(", "));
        }
        std::process::exit(1);
    }

    println!("{}", outcome.locations.format(format));
    if !outcome.unmatched_words.is_empty() {
        eprintln!("unmatched words: {}", outcome.unmatched_words.join(", "));
    }
    Ok(())
}
