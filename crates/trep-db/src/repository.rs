//! Database repository for reverse-lookup operations over the POR catalog.
//!
//! Persists only the fields the reverse-lookup surface and the ranked
//! browsing commands actually need (key, names, core geo/admin columns,
//! PageRank); the richer administrative-hierarchy and temporal fields on
//! [`LocationRecord`] stay in the offline catalog build and are not
//! round-tripped through SQL, mirroring the teacher's own `licenses` table
//! which likewise projects down to the columns its lookups use.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use r2d2::{CustomizeConnection, Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use trep_core::codes::IataType;
use trep_core::{LocationKey, LocationRecord, NameMatrix};

use crate::config::DbConfig;
use crate::error::Result;
use crate::schema::Schema;

/// Applies per-connection PRAGMA tuning to every connection the pool hands
/// out, not just the first one checked out.
#[derive(Clone)]
struct SqliteConnectionCustomizer {
    cache_size: i32,
    foreign_keys: bool,
}

impl fmt::Debug for SqliteConnectionCustomizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnectionCustomizer")
            .field("cache_size", &self.cache_size)
            .field("foreign_keys", &self.foreign_keys)
            .finish()
    }
}

impl CustomizeConnection<Connection, rusqlite::Error> for SqliteConnectionCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch(&format!("PRAGMA cache_size = {};", self.cache_size))?;
        if self.foreign_keys {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        }
        conn.execute_batch(
            r#"
            PRAGMA busy_timeout = 5000;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            "#,
        )?;
        Ok(())
    }
}

/// A pooled SQLite reverse-lookup store over the POR catalog. Cheap to
/// clone: the underlying connection pool is reference-counted.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
    config: DbConfig,
}

impl Database {
    /// Open (or create) a database at the given path with default tuning.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_config(DbConfig::with_path(path.as_ref()))
    }

    /// Open a database with the given configuration.
    pub fn with_config(config: DbConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() && config.path.to_str() != Some(":memory:") {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(&config.path);
        let customizer = SqliteConnectionCustomizer {
            cache_size: config.cache_size,
            foreign_keys: config.foreign_keys,
        };

        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(0))
            .connection_timeout(config.connection_timeout)
            .connection_customizer(Box::new(customizer))
            .build(manager)?;

        let db = Self { pool, config };

        if db.config.enable_wal {
            let conn = db.conn()?;
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }

        Ok(db)
    }

    pub fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    /// Create the schema (tables + indexes) if not already present.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn()?;
        Schema::initialize(&conn)?;
        info!(
            "trep-db initialized with schema version {}",
            crate::schema::SCHEMA_VERSION
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> Result<bool> {
        let conn = self.conn()?;
        Ok(Schema::get_version(&conn)?.is_some())
    }

    /// Record the timestamp of the last full catalog rebuild (the atomic
    /// rename-swap described alongside the index directory in the
    /// persisted-state layout).
    pub fn set_last_rebuild(&self, timestamp: chrono::DateTime<chrono::Utc>) -> Result<()> {
        let conn = self.conn()?;
        Schema::set_metadata(&conn, "last_rebuild", &timestamp.to_rfc3339())?;
        Ok(())
    }

    /// The timestamp of the last full catalog rebuild, if one has run.
    pub fn get_last_rebuild(&self) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        let conn = self.conn()?;
        let Some(raw) = Schema::get_metadata(&conn, "last_rebuild")? else {
            return Ok(None);
        };
        Ok(chrono::DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|dt| dt.with_timezone(&chrono::Utc)))
    }

    /// Insert or replace one location record and its per-language names.
    pub fn insert_location_record(&self, record: &LocationRecord) -> Result<()> {
        let conn = self.conn()?;
        Self::insert_location_record_conn(&conn, record)
    }

    fn insert_location_record_conn(conn: &Connection, record: &LocationRecord) -> Result<()> {
        let key = &record.key;
        let unlocodes = record.unlocodes.join(",");
        let uic_codes = record
            .uic_codes
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");

        conn.execute(
            r#"
            INSERT OR REPLACE INTO place_details (
                iata_code, iata_type, geonames_id, envelope_id, icao_code, faa_code,
                city_code, state_code, region_code, country_code, country_name,
                continent_name, common_name, ascii_name, latitude, longitude,
                page_rank, is_airport, is_commercial, population, time_zone,
                wiki_link, unlocodes, uic_codes
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24
            )
            "#,
            params![
                key.iata_code,
                key.iata_type.to_string(),
                key.geonames_id as i64,
                record.envelope_id,
                record.icao_code,
                record.faa_code,
                record.city_code,
                record.state_code,
                record.region_code,
                record.country_code,
                record.country_name,
                record.continent_name,
                record.common_name,
                record.ascii_name,
                record.latitude,
                record.longitude,
                record.page_rank,
                record.is_airport,
                record.is_commercial,
                record.population.map(|p| p as i64),
                record.time_zone,
                record.wiki_link,
                unlocodes,
                uic_codes,
            ],
        )?;

        conn.execute(
            "DELETE FROM place_names WHERE iata_code = ?1 AND iata_type = ?2 AND geonames_id = ?3",
            params![key.iata_code, key.iata_type.to_string(), key.geonames_id as i64],
        )?;

        for (language, names) in record.name_matrix.iter() {
            for (ordinal, name) in names.iter().enumerate() {
                conn.execute(
                    r#"
                    INSERT OR REPLACE INTO place_names
                        (iata_code, iata_type, geonames_id, language, name, ordinal)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    "#,
                    params![
                        key.iata_code,
                        key.iata_type.to_string(),
                        key.geonames_id as i64,
                        language,
                        name,
                        ordinal as i64,
                    ],
                )?;
            }
        }

        if record.is_airport {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO airport_pageranked (iata_code, geonames_id, page_rank)
                VALUES (?1, ?2, ?3)
                "#,
                params![key.iata_code, key.geonames_id as i64, record.page_rank],
            )?;
        }

        debug!(iata_code = %key.iata_code, geonames_id = key.geonames_id, "upserted location record");
        Ok(())
    }

    /// Look up every record whose IATA code matches (case-insensitive).
    pub fn by_iata(&self, iata_code: &str) -> Result<Vec<LocationRecord>> {
        self.lookup_keys_by("iata_code = ?1 COLLATE NOCASE", iata_code)
    }

    /// Look up every record whose ICAO code matches.
    pub fn by_icao(&self, icao_code: &str) -> Result<Vec<LocationRecord>> {
        self.lookup_keys_by("icao_code = ?1 COLLATE NOCASE", icao_code)
    }

    /// Look up every record whose FAA code matches.
    pub fn by_faa(&self, faa_code: &str) -> Result<Vec<LocationRecord>> {
        self.lookup_keys_by("faa_code = ?1 COLLATE NOCASE", faa_code)
    }

    /// Look up every record listing the given UN/LOCODE among its
    /// comma-joined `unlocodes` column (exact token match, not substring).
    pub fn by_unlocode(&self, unlocode: &str) -> Result<Vec<LocationRecord>> {
        self.lookup_keys_by_token("unlocodes", unlocode)
    }

    /// Look up every record listing the given UIC code among its
    /// comma-joined `uic_codes` column.
    pub fn by_uic_code(&self, uic_code: i64) -> Result<Vec<LocationRecord>> {
        self.lookup_keys_by_token("uic_codes", &uic_code.to_string())
    }

    /// Look up every record (across envelopes/languages) for a geonames id.
    pub fn by_geoname_id(&self, geonames_id: u64) -> Result<Vec<LocationRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT iata_code, iata_type, geonames_id FROM place_details WHERE geonames_id = ?1",
        )?;
        let keys = stmt
            .query_map(params![geonames_id as i64], Self::read_key_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        drop(stmt);
        keys.into_iter()
            .map(|(iata_code, iata_type, gid)| {
                Self::fetch_record(&conn, &iata_code, iata_type, gid)
            })
            .collect()
    }

    /// Every record currently persisted, in insertion order.
    pub fn list_all(&self) -> Result<Vec<LocationRecord>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT iata_code, iata_type, geonames_id FROM place_details")?;
        let keys = stmt
            .query_map([], Self::read_key_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        drop(stmt);
        keys.into_iter()
            .map(|(iata_code, iata_type, gid)| {
                Self::fetch_record(&conn, &iata_code, iata_type, gid)
            })
            .collect()
    }

    /// Total number of persisted records.
    pub fn list_nb(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM place_details", [], |row| {
            row.get(0)
        })?;
        Ok(count as u64)
    }

    /// A PageRank-ordered page of airport records, for the CLI's
    /// `list_cont`-style incremental browsing (caller tracks the offset).
    pub fn list_pageranked(&self, offset: u64, limit: u64) -> Result<Vec<LocationRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT iata_code, geonames_id FROM airport_pageranked
            ORDER BY page_rank DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )?;
        let keys = stmt
            .query_map(params![limit as i64, offset as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        drop(stmt);
        keys.into_iter()
            .map(|(iata_code, gid)| Self::fetch_record(&conn, &iata_code, IataType::Airport, gid))
            .collect()
    }

    fn lookup_keys_by(&self, predicate: &str, value: &str) -> Result<Vec<LocationRecord>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT iata_code, iata_type, geonames_id FROM place_details WHERE {predicate}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let keys = stmt
            .query_map(params![value], Self::read_key_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        drop(stmt);
        keys.into_iter()
            .map(|(iata_code, iata_type, gid)| {
                Self::fetch_record(&conn, &iata_code, iata_type, gid)
            })
            .collect()
    }

    fn lookup_keys_by_token(&self, column: &str, token: &str) -> Result<Vec<LocationRecord>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT iata_code, iata_type, geonames_id FROM place_details \
             WHERE ','||{column}||',' LIKE '%,'||?1||',%'"
        );
        let mut stmt = conn.prepare(&sql)?;
        let keys = stmt
            .query_map(params![token], Self::read_key_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        drop(stmt);
        keys.into_iter()
            .map(|(iata_code, iata_type, gid)| {
                Self::fetch_record(&conn, &iata_code, iata_type, gid)
            })
            .collect()
    }

    fn read_key_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(String, IataType, u64)> {
        let iata_code: String = row.get(0)?;
        let iata_type_str: String = row.get(1)?;
        let geonames_id: i64 = row.get(2)?;
        let iata_type = IataType::from_str(&iata_type_str).unwrap_or(IataType::Airport);
        Ok((iata_code, iata_type, geonames_id as u64))
    }

    fn fetch_record(
        conn: &Connection,
        iata_code: &str,
        iata_type: IataType,
        geonames_id: u64,
    ) -> Result<LocationRecord> {
        let iata_type_str = iata_type.to_string();

        let row = conn
            .query_row(
                r#"
                SELECT envelope_id, icao_code, faa_code, city_code, state_code, region_code,
                       country_code, country_name, continent_name, common_name, ascii_name,
                       latitude, longitude, page_rank, is_airport, is_commercial, population,
                       time_zone, wiki_link, unlocodes, uic_codes
                FROM place_details
                WHERE iata_code = ?1 AND iata_type = ?2 AND geonames_id = ?3
                "#,
                params![iata_code, iata_type_str, geonames_id as i64],
                |row| {
                    Ok((
                        row.get::<_, u32>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, Option<String>>(4)?,
                        row.get::<_, Option<String>>(5)?,
                        row.get::<_, String>(6)?,
                        row.get::<_, String>(7)?,
                        row.get::<_, String>(8)?,
                        row.get::<_, String>(9)?,
                        row.get::<_, String>(10)?,
                        row.get::<_, f64>(11)?,
                        row.get::<_, f64>(12)?,
                        row.get::<_, f64>(13)?,
                        row.get::<_, bool>(14)?,
                        row.get::<_, bool>(15)?,
                        row.get::<_, Option<i64>>(16)?,
                        row.get::<_, Option<String>>(17)?,
                        row.get::<_, Option<String>>(18)?,
                        row.get::<_, String>(19)?,
                        row.get::<_, String>(20)?,
                    ))
                },
            )
            .optional()?;

        let (
            envelope_id,
            icao_code,
            faa_code,
            city_code,
            state_code,
            region_code,
            country_code,
            country_name,
            continent_name,
            common_name,
            ascii_name,
            latitude,
            longitude,
            page_rank,
            is_airport,
            is_commercial,
            population,
            time_zone,
            wiki_link,
            unlocodes,
            uic_codes,
        ) = row.ok_or_else(|| {
            crate::error::DbError::InvalidData(format!(
                "place_details row vanished for {iata_code}-{iata_type}-{geonames_id}"
            ))
        })?;

        let key = LocationKey::new(iata_code, iata_type, geonames_id);
        let mut record = LocationRecord::new(key, common_name, ascii_name);
        record.envelope_id = envelope_id;
        record.icao_code = icao_code;
        record.faa_code = faa_code;
        record.city_code = city_code;
        record.state_code = state_code;
        record.region_code = region_code;
        record.country_code = country_code;
        record.country_name = country_name;
        record.continent_name = continent_name;
        record.latitude = latitude;
        record.longitude = longitude;
        record.page_rank = page_rank;
        record.is_airport = is_airport;
        record.is_commercial = is_commercial;
        record.population = population.map(|p| p as u64);
        record.time_zone = time_zone;
        record.wiki_link = wiki_link;
        record.unlocodes = split_csv(&unlocodes);
        record.uic_codes = split_csv(&uic_codes)
            .into_iter()
            .filter_map(|s| s.parse::<i64>().ok())
            .collect();

        record.name_matrix = Self::fetch_name_matrix(conn, iata_code, iata_type, geonames_id)?;

        Ok(record)
    }

    fn fetch_name_matrix(
        conn: &Connection,
        iata_code: &str,
        iata_type: IataType,
        geonames_id: u64,
    ) -> Result<NameMatrix> {
        let mut stmt = conn.prepare(
            r#"
            SELECT language, name FROM place_names
            WHERE iata_code = ?1 AND iata_type = ?2 AND geonames_id = ?3
            ORDER BY language, ordinal
            "#,
        )?;
        let rows = stmt
            .query_map(
                params![iata_code, iata_type.to_string(), geonames_id as i64],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut matrix = NameMatrix::new();
        let mut current_language: Option<String> = None;
        let mut current_names: Vec<String> = Vec::new();
        for (language, name) in rows {
            if current_language.as_deref() != Some(language.as_str()) {
                if let Some(lang) = current_language.take() {
                    matrix.insert(lang, std::mem::take(&mut current_names));
                }
                current_language = Some(language);
            }
            current_names.push(name);
        }
        if let Some(lang) = current_language {
            matrix.insert(lang, current_names);
        }

        Ok(matrix)
    }
}

fn split_csv(s: &str) -> Vec<String> {
    if s.is_empty() {
        Vec::new()
    } else {
        s.split(',').map(str::to_string).collect()
    }
}
