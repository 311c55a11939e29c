//! Shared CLI/shell configuration (`§6.3` of the catalog specification).
//!
//! Mirrors the teacher's `uls-cli::config`: a small struct of defaulted
//! paths and flags, constructible from `clap` globals or environment
//! variables, threaded explicitly through the session rather than read
//! from globals.

use std::path::PathBuf;

/// How the reverse-lookup store is backed. `Mysql` is accepted for
/// configuration-compatibility with the original catalog tooling but is
/// not implemented; selecting it is rejected at startup (see
/// `Config::validate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDbType {
    NoDb,
    Sqlite,
    Mysql,
}

impl std::str::FromStr for SqlDbType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nodb" => Ok(Self::NoDb),
            "sqlite" => Ok(Self::Sqlite),
            "mysql" => Ok(Self::Mysql),
            other => Err(format!("unknown sqldbtype '{other}' (expected nodb, sqlite, mysql)")),
        }
    }
}

impl std::fmt::Display for SqlDbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NoDb => "nodb",
            Self::Sqlite => "sqlite",
            Self::Mysql => "mysql",
        };
        write!(f, "{s}")
    }
}

/// The modulus the deployment-number toggle wraps around (testable
/// property 9: "after N toggles the resulting number equals the initial
/// plus N, modulo `deployment_number_size`").
pub const DEPLOYMENT_NUMBER_SIZE: u32 = 10;

/// Runtime configuration and feature toggles for the shell/CLI session.
#[derive(Debug, Clone)]
pub struct Config {
    pub porfile: PathBuf,
    pub xapiandb: PathBuf,
    pub sqldbtype: SqlDbType,
    pub sqldbconx: String,
    pub deploymentnb: u32,
    pub noniata: bool,
    pub xapianindex: bool,
    pub dbadd: bool,
    pub log: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            porfile: default_porfile_path(),
            xapiandb: PathBuf::from("/tmp/opentrep/xapian_traveldb"),
            sqldbtype: SqlDbType::NoDb,
            sqldbconx: String::new(),
            deploymentnb: 0,
            noniata: true,
            xapianindex: true,
            dbadd: false,
            log: PathBuf::from("opentrep-dbmgr.log"),
        }
    }
}

impl Config {
    /// `dbadd` defaults to whether a SQL backend is configured at all.
    pub fn with_sqldbtype(mut self, sqldbtype: SqlDbType) -> Self {
        self.dbadd = sqldbtype != SqlDbType::NoDb;
        self.sqldbtype = sqldbtype;
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sqldbtype == SqlDbType::Mysql {
            anyhow::bail!(
                "sqldbtype=mysql is accepted for configuration compatibility but not \
                 implemented; use 'sqlite' or 'nodb'"
            );
        }
        Ok(())
    }

    /// Advance the deployment number by one, wrapping at
    /// [`DEPLOYMENT_NUMBER_SIZE`].
    pub fn toggle_deployment_number(&mut self) {
        self.deploymentnb = (self.deploymentnb + 1) % DEPLOYMENT_NUMBER_SIZE;
    }

    pub fn toggle_noniata(&mut self) {
        self.noniata = !self.noniata;
    }

    pub fn toggle_xapian_indexing(&mut self) {
        self.xapianindex = !self.xapianindex;
    }

    pub fn toggle_sqldb_inserting(&mut self) {
        self.dbadd = !self.dbadd;
    }
}

fn default_porfile_path() -> PathBuf {
    if let Ok(path) = std::env::var("TREP_POR_FILE") {
        return PathBuf::from(path);
    }
    PathBuf::from("data/por/optd_por_public.csv")
}

/// Default location of the reverse-lookup SQLite file, matching the
/// teacher's `uls-cli::config::default_db_path` pattern (env override,
/// then the platform data directory).
pub fn default_db_path() -> PathBuf {
    if let Ok(path) = std::env::var("TREP_DB_PATH") {
        return PathBuf::from(path);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("opentrep")
        .join("opentrep.db")
}
