//! Relational schema for the persisted POR catalog.
//!
//! Generalises the teacher's `licenses`/`entities` tables (`WITHOUT ROWID`
//! + `COLLATE NOCASE` on text lookup keys) to the POR domain: one details
//! row per `(iata_code, iata_type, geonames_id)` primary key, one names row
//! per `(key, language, name)` triple, and a pagerank-ordered browsing view
//! over the airport subset.

use rusqlite::Connection;

use crate::error::Result;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Schema creation and migration.
pub struct Schema;

impl Schema {
    /// Create all tables in the database.
    pub fn create_tables(conn: &Connection) -> Result<()> {
        // Smaller pages waste less space on the many short strings this
        // catalog stores; must be set before the first table is created.
        conn.execute_batch("PRAGMA page_size = 1024;")?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS metadata (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            ) WITHOUT ROWID;
            "#,
        )?;

        conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)",
            [&SCHEMA_VERSION.to_string()],
        )?;

        // One row per POR primary key. `unlocodes`/`uic_codes` are stored
        // comma-joined (mirroring the flat file's own `=`-separated lists)
        // and looked up with an anchored LIKE, since a POR rarely carries
        // more than a handful of either.
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS place_details (
                iata_code TEXT NOT NULL COLLATE NOCASE,
                iata_type TEXT NOT NULL,
                geonames_id INTEGER NOT NULL,
                envelope_id INTEGER NOT NULL DEFAULT 0,
                icao_code TEXT COLLATE NOCASE,
                faa_code TEXT COLLATE NOCASE,
                city_code TEXT COLLATE NOCASE,
                state_code TEXT COLLATE NOCASE,
                region_code TEXT,
                country_code TEXT COLLATE NOCASE,
                country_name TEXT,
                continent_name TEXT,
                common_name TEXT COLLATE NOCASE,
                ascii_name TEXT COLLATE NOCASE,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                page_rank REAL NOT NULL DEFAULT 0.0,
                is_airport INTEGER NOT NULL DEFAULT 0,
                is_commercial INTEGER NOT NULL DEFAULT 0,
                population INTEGER,
                time_zone TEXT,
                wiki_link TEXT,
                unlocodes TEXT NOT NULL DEFAULT '',
                uic_codes TEXT NOT NULL DEFAULT '',
                PRIMARY KEY (iata_code, iata_type, geonames_id)
            ) WITHOUT ROWID;
            "#,
        )?;

        // One row per (key, language, name); `is_preferred` flags the first
        // (preferred) name within a language per the source `NameMatrix`.
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS place_names (
                iata_code TEXT NOT NULL COLLATE NOCASE,
                iata_type TEXT NOT NULL,
                geonames_id INTEGER NOT NULL,
                language TEXT NOT NULL COLLATE NOCASE,
                name TEXT NOT NULL COLLATE NOCASE,
                ordinal INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (iata_code, iata_type, geonames_id, language, ordinal),
                FOREIGN KEY (iata_code, iata_type, geonames_id)
                    REFERENCES place_details(iata_code, iata_type, geonames_id)
            ) WITHOUT ROWID;
            "#,
        )?;

        // PageRank-ordered subset of the airport rows, used by the CLI's
        // `list_nb`/`list_cont` ranked-browsing commands.
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS airport_pageranked (
                iata_code TEXT NOT NULL COLLATE NOCASE,
                geonames_id INTEGER NOT NULL,
                page_rank REAL NOT NULL,
                PRIMARY KEY (iata_code, geonames_id)
            ) WITHOUT ROWID;
            "#,
        )?;

        Ok(())
    }

    /// Create indexes for the reverse-lookup alternate keys.
    pub fn create_indexes(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE INDEX IF NOT EXISTS idx_place_details_icao ON place_details(icao_code);
            CREATE INDEX IF NOT EXISTS idx_place_details_faa ON place_details(faa_code);
            CREATE INDEX IF NOT EXISTS idx_place_details_geonames ON place_details(geonames_id);
            CREATE INDEX IF NOT EXISTS idx_place_details_country ON place_details(country_code);
            CREATE INDEX IF NOT EXISTS idx_place_details_unlocodes ON place_details(unlocodes);
            CREATE INDEX IF NOT EXISTS idx_place_details_uic_codes ON place_details(uic_codes);

            CREATE INDEX IF NOT EXISTS idx_place_names_key
                ON place_names(iata_code, iata_type, geonames_id);
            CREATE INDEX IF NOT EXISTS idx_place_names_name ON place_names(name);

            CREATE INDEX IF NOT EXISTS idx_airport_pageranked_rank
                ON airport_pageranked(page_rank DESC);
            "#,
        )?;

        Ok(())
    }

    /// Drop all non-primary indexes (for bulk-import performance).
    pub fn drop_indexes(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            DROP INDEX IF EXISTS idx_place_details_icao;
            DROP INDEX IF EXISTS idx_place_details_faa;
            DROP INDEX IF EXISTS idx_place_details_geonames;
            DROP INDEX IF EXISTS idx_place_details_country;
            DROP INDEX IF EXISTS idx_place_details_unlocodes;
            DROP INDEX IF EXISTS idx_place_details_uic_codes;
            DROP INDEX IF EXISTS idx_place_names_key;
            DROP INDEX IF EXISTS idx_place_names_name;
            DROP INDEX IF EXISTS idx_airport_pageranked_rank;
            "#,
        )?;

        Ok(())
    }

    /// Create tables and indexes in one call.
    pub fn initialize(conn: &Connection) -> Result<()> {
        Self::create_tables(conn)?;
        Self::create_indexes(conn)?;
        Ok(())
    }

    /// Current schema version recorded in the database, if initialized.
    pub fn get_version(conn: &Connection) -> Result<Option<i32>> {
        let result = conn.query_row(
            "SELECT value FROM metadata WHERE key = 'schema_version'",
            [],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(v) => Ok(v.parse().ok()),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(rusqlite::Error::SqliteFailure(_, Some(ref msg)))
                if msg.contains("no such table") =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_metadata(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            [key, value],
        )?;
        Ok(())
    }

    pub fn get_metadata(conn: &Connection, key: &str) -> Result<Option<String>> {
        let result = conn.query_row("SELECT value FROM metadata WHERE key = ?1", [key], |row| {
            row.get(0)
        });

        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_create_schema() {
        let conn = Connection::open_in_memory().unwrap();
        Schema::initialize(&conn).unwrap();

        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='place_details'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);

        let version = Schema::get_version(&conn).unwrap();
        assert_eq!(version, Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_metadata() {
        let conn = Connection::open_in_memory().unwrap();
        Schema::initialize(&conn).unwrap();

        Schema::set_metadata(&conn, "last_rebuild", "2026-01-01").unwrap();
        assert_eq!(
            Schema::get_metadata(&conn, "last_rebuild").unwrap(),
            Some("2026-01-01".to_string())
        );
        assert_eq!(Schema::get_metadata(&conn, "nonexistent").unwrap(), None);
    }

    #[test]
    fn test_drop_and_recreate_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        Schema::initialize(&conn).unwrap();

        let count_before: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(count_before > 0);

        Schema::drop_indexes(&conn).unwrap();
        let count_after_drop: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count_after_drop, 0);

        Schema::create_indexes(&conn).unwrap();
        let count_after_recreate: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count_before, count_after_recreate);
    }
}
