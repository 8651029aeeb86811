use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key under which the best score is persisted.
pub const BEST_SCORE_KEY: &str = "clickMashHighScore";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestScoreUpdate {
    pub best: u32,
    pub updated: bool,
}

/// Durable best-score scalar.
///
/// Both operations are total: unreadable data counts as no record, and a failed
/// write keeps the new value in memory for the rest of the process.
pub trait BestScoreStore {
    fn load(&self) -> u32;
    fn record_if_higher(&mut self, candidate: u32) -> BestScoreUpdate;
}

/// Parse a stored textual score; anything but a non-negative integer reads as zero.
/// Integers past `u32::MAX` saturate.
pub fn parse_stored_score(raw: &str) -> u32 {
    raw.trim()
        .parse::<u64>()
        .map(|v| v.min(u64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

/// Process-local store, used by tests and when no database is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryBestScoreStore {
    best: u32,
}

impl MemoryBestScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryBestScoreStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn record_if_higher(&mut self, candidate: u32) -> BestScoreUpdate {
        let updated = candidate > self.best;
        if updated {
            self.best = candidate;
        }
        BestScoreUpdate {
            best: self.best,
            updated,
        }
    }
}

/// Best score kept as text in a SQLite key-value table.
#[derive(Debug)]
pub struct SqliteBestScoreStore {
    conn: Connection,
    best: u32,
}

impl SqliteBestScoreStore {
    /// Open (or create) the database at `path`, creating parent directories as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> rusqlite::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> rusqlite::Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
            [],
        )?;

        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![BEST_SCORE_KEY],
                |row| row.get(0),
            )
            .optional()
            .unwrap_or_else(|e| {
                warn!("unreadable best score row, treating as absent: {e}");
                None
            });
        let best = raw.as_deref().map(parse_stored_score).unwrap_or(0);
        debug!("loaded best score {best}");

        Ok(Self { conn, best })
    }

    fn persist(&self, value: u32) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
            params![BEST_SCORE_KEY, value.to_string()],
        )?;
        Ok(())
    }
}

impl BestScoreStore for SqliteBestScoreStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn record_if_higher(&mut self, candidate: u32) -> BestScoreUpdate {
        if candidate <= self.best {
            return BestScoreUpdate {
                best: self.best,
                updated: false,
            };
        }
        self.best = candidate;
        if let Err(e) = self.persist(candidate) {
            warn!("failed to persist best score {candidate}: {e}");
        }
        BestScoreUpdate {
            best: candidate,
            updated: true,
        }
    }
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn record_if_higher(&mut self, candidate: u32) -> BestScoreUpdate {
        (**self).record_if_higher(candidate)
    }
}
