//! `serve` subcommand: start the REST API server over the current session's
//! fuzzy index and reverse-lookup database.

use anyhow::{Context, Result};
use trep_api::{ApiState, ServerConfig};

use crate::session::Session;

pub async fn execute(session: &Session, port: u16, bind: &str, cors_origins: Vec<String>) -> Result<()> {
    let (index, db) = session.snapshot();
    let state = ApiState { index, db };

    let config = ServerConfig {
        bind: bind.to_string(),
        port,
        cors_origins,
    };

    eprintln!(
        "trep-api server listening on http://{}:{}",
        config.bind, config.port
    );

    trep_api::run(state, config).await.context("server error")?;
    Ok(())
}
