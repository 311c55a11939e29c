//! Session state shared between the one-shot `clap` subcommands and the
//! interactive shell: the loaded fuzzy index, the optional reverse-lookup
//! database, and the configuration/toggle state from `§6.3`/`§6.2`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use trep_core::codes::GeonamesSource;
use trep_core::LocationRecord;
use trep_db::{DbConfig, Database};
use trep_index::{index_record, IndexBuilder, InMemoryIndex};
use trep_match::{MatchOrchestrator, SearchOptions};

use crate::config::{Config, SqlDbType};

/// Mutable interactive session: configuration, the fuzzy index (rebuilt by
/// `fill_from_por_file`), the reverse-lookup database connection (opened
/// lazily once a SQL backend is configured), and the `list_cont` cursor.
pub struct Session {
    pub config: Config,
    index: InMemoryIndex,
    db: Option<Database>,
    list_cont_offset: u64,
}

impl Session {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let db = Self::open_db(&config)?;
        Ok(Self {
            config,
            index: InMemoryIndex::empty(),
            db,
            list_cont_offset: 0,
        })
    }

    fn open_db(config: &Config) -> Result<Option<Database>> {
        if config.sqldbtype != SqlDbType::Sqlite {
            return Ok(None);
        }
        let path = if config.sqldbconx.is_empty() {
            crate::config::default_db_path()
        } else {
            std::path::PathBuf::from(&config.sqldbconx)
        };
        Ok(Some(Database::with_config(DbConfig::with_path(path))?))
    }

    /// `reset_connection_string <str>`: reopen the reverse-lookup database
    /// against a new SQLite path, switching `sqldbtype` to `sqlite` if it
    /// was previously disabled.
    pub fn reset_connection_string(&mut self, connection_string: &str) -> Result<()> {
        self.config.sqldbconx = connection_string.to_string();
        self.config.sqldbtype = SqlDbType::Sqlite;
        self.db = Some(Database::with_config(DbConfig::with_path(connection_string))?);
        Ok(())
    }

    /// `create_user`: SQLite has no server-side user/role concept, so this
    /// is a no-op that still validates a database is configured, matching
    /// the original command's place in the REPL surface.
    pub fn create_user(&self) -> Result<()> {
        self.require_db()?;
        Ok(())
    }

    pub fn create_tables(&self) -> Result<()> {
        self.require_db()?.initialize()
    }

    pub fn create_indexes(&self) -> Result<()> {
        let db = self.require_db()?;
        let conn = db.conn()?;
        trep_db::Schema::create_indexes(&conn)?;
        Ok(())
    }

    fn require_db(&self) -> Result<&Database> {
        self.db
            .as_ref()
            .context("no SQL database configured; set sqldbtype=sqlite or run reset_connection_string")
    }

    /// `fill_from_por_file`: stream the configured POR catalog, filtering
    /// non-IATA-referenced entries when `noniata` is disabled, and feed
    /// the survivors into the in-memory fuzzy index (`xapianindex`) and/or
    /// the reverse-lookup database (`dbadd`), as configured.
    ///
    /// A POR is treated as "non-IATA-referenced" when its `is_geonames`
    /// flag is `N`: it carries an IATA code but no corroborating geonames
    /// entry, matching the only place the two surfaces (IATA catalog vs.
    /// geonames) can actually diverge in this record model (see
    /// `DESIGN.md`'s resolution of the `noniata` open question).
    pub fn fill_from_por_file(&mut self) -> Result<FillReport> {
        let reader = trep_parser::PorReader::open(&self.config.porfile)
            .with_context(|| format!("opening POR file {}", self.config.porfile.display()))?;

        let mut builder = IndexBuilder::new();
        builder.begin_build();

        let mut report = FillReport::default();
        for record in reader {
            let record = record?;
            report.read += 1;

            if !self.config.noniata && record.is_geonames == Some(GeonamesSource::No) {
                report.skipped_noniata += 1;
                continue;
            }

            if self.config.xapianindex {
                index_record(&mut builder, record.clone());
                report.indexed += 1;
            }
            if self.config.dbadd {
                self.require_db()?.insert_location_record(&record)?;
                report.inserted += 1;
            }
        }

        if self.config.xapianindex {
            self.index = builder.commit()?;
        }
        info!(read = report.read, indexed = report.indexed, inserted = report.inserted, "filled catalog");
        Ok(report)
    }

    pub fn search(&self, query: &str) -> Result<trep_match::SearchOutcome> {
        let orchestrator = MatchOrchestrator::new(&self.index);
        Ok(orchestrator.search(query, &SearchOptions::default())?)
    }

    /// Cooperative cancellation handle for a long-running `search`, per
    /// the concurrency model's "cancellable between partitions" guarantee.
    pub fn search_cancellable(
        &self,
        query: &str,
        cancel: Arc<AtomicBool>,
    ) -> Result<trep_match::SearchOutcome> {
        let orchestrator = MatchOrchestrator::new(&self.index);
        let options = SearchOptions {
            cancel: Some(cancel),
            ..Default::default()
        };
        Ok(orchestrator.search(query, &options)?)
    }

    pub fn list_by_iata(&self, code: &str) -> Result<Vec<LocationRecord>> {
        Ok(self.require_db()?.by_iata(code)?)
    }

    pub fn list_by_icao(&self, code: &str) -> Result<Vec<LocationRecord>> {
        Ok(self.require_db()?.by_icao(code)?)
    }

    pub fn list_by_faa(&self, code: &str) -> Result<Vec<LocationRecord>> {
        Ok(self.require_db()?.by_faa(code)?)
    }

    pub fn list_by_unlocode(&self, code: &str) -> Result<Vec<LocationRecord>> {
        Ok(self.require_db()?.by_unlocode(code)?)
    }

    pub fn list_by_uiccode(&self, code: i64) -> Result<Vec<LocationRecord>> {
        Ok(self.require_db()?.by_uic_code(code)?)
    }

    pub fn list_by_geonameid(&self, id: u64) -> Result<Vec<LocationRecord>> {
        Ok(self.require_db()?.by_geoname_id(id)?)
    }

    pub fn list_nb(&self) -> Result<u64> {
        Ok(self.require_db()?.list_nb()?)
    }

    pub fn list_all(&self) -> Result<Vec<LocationRecord>> {
        Ok(self.require_db()?.list_all()?)
    }

    /// `list_cont`: fetch the next page of PageRank-ordered airports,
    /// advancing the session's cursor so repeated invocations page
    /// forward (the REPL analogue of the original catalog browser).
    pub fn list_cont(&mut self, page_size: u64) -> Result<Vec<LocationRecord>> {
        let page = self.require_db()?.list_pageranked(self.list_cont_offset, page_size)?;
        self.list_cont_offset += page.len() as u64;
        Ok(page)
    }

    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    pub fn has_db(&self) -> bool {
        self.db.is_some()
    }

    /// Snapshot the current fuzzy index and database handle for handing
    /// off to the REST API server (`trep_api::ApiState`), which owns its
    /// state independently of the interactive session.
    pub fn snapshot(&self) -> (InMemoryIndex, Option<Database>) {
        (self.index.clone(), self.db.clone())
    }
}

/// Summary of one `fill_from_por_file` run.
#[derive(Debug, Default, Clone, Copy)]
pub struct FillReport {
    pub read: u64,
    pub skipped_noniata: u64,
    pub indexed: u64,
    pub inserted: u64,
}

impl std::fmt::Display for FillReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "read {} records ({} skipped by noniata filter); indexed {}, inserted {}",
            self.read, self.skipped_noniata, self.indexed, self.inserted
        )
    }
}
