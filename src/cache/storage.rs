use super::CacheEntry;
use crate::error::{AmendError, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// SQLite-based cache storage implementation
#[derive(Debug)]
pub struct SqliteStorage {
    db_path: PathBuf,
}

impl SqliteStorage {
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path_buf = db_path.as_ref().to_path_buf();
        let is_new_file = !db_path_buf.exists();

        let storage = Self {
            db_path: db_path_buf.clone(),
        };

        let result = tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = Connection::open(&db_path_buf)
                .map_err(|e| AmendError::Other(format!("Failed to open cache database: {e}")))?;

            if is_new_file {
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    let permissions = std::fs::Permissions::from_mode(0o600);
                    std::fs::set_permissions(&db_path_buf, permissions)
                        .map_err(|e| AmendError::Other(format!("Failed to set cache database permissions: {e}")))?;
                }
            }

            Self::initialize_schema(&conn)?;
            Ok(())
        })
        .await
        .map_err(|e| AmendError::Other(format!("Failed to spawn database initialization: {e}")))?;

        result?;
        Ok(storage)
    }

    fn initialize_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                key TEXT PRIMARY KEY,
                data BLOB NOT NULL,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                size INTEGER NOT NULL,
                last_accessed TEXT NOT NULL
            )
            "#,
            [],
        )
        .map_err(|e| AmendError::Other(format!("Failed to initialize cache schema: {e}")))?;

        conn.execute("CREATE INDEX IF NOT EXISTS idx_expires_at ON cache_entries(expires_at)", [])
            .map_err(|e| AmendError::Other(format!("Failed to create expires_at index: {e}")))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_last_accessed ON cache_entries(last_accessed)",
            [],
        )
        .map_err(|e| AmendError::Other(format!("Failed to create last_accessed index: {e}")))?;

        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let db_path = self.db_path.clone();
        let key_owned = key.to_string();

        tokio::task::spawn_blocking(move || -> Result<Option<CacheEntry>> {
            let conn = Connection::open(&db_path)
                .map_err(|e| AmendError::Other(format!("Failed to open cache database: {e}")))?;

            let now = Utc::now().to_rfc3339();
            conn.execute(
                "UPDATE cache_entries SET last_accessed = ?1 WHERE key = ?2",
                params![now, &key_owned],
            )
            .map_err(|e| AmendError::Other(format!("Failed to update last_accessed: {e}")))?;

            let mut stmt = conn
                .prepare("SELECT key, data, created_at, expires_at, size FROM cache_entries WHERE key = ?1")
                .map_err(|e| AmendError::Other(format!("Failed to prepare get statement: {e}")))?;

            let entry = stmt
                .query_row(params![&key_owned], |row| {
                    Ok(CacheEntry {
                        key: row.get(0)?,
                        data: row.get(1)?,
                        created_at: DateTime::parse_from_rfc3339(&row.get::<_, String>(2)?)
                            .map_err(|_| {
                                rusqlite::Error::InvalidColumnType(2, "created_at".to_string(), rusqlite::types::Type::Text)
                            })?
                            .with_timezone(&Utc),
                        expires_at: DateTime::parse_from_rfc3339(&row.get::<_, String>(3)?)
                            .map_err(|_| {
                                rusqlite::Error::InvalidColumnType(3, "expires_at".to_string(), rusqlite::types::Type::Text)
                            })?
                            .with_timezone(&Utc),
                        size: row.get::<_, i64>(4)? as u64,
                    })
                })
                .optional()
                .map_err(|e| AmendError::Other(format!("Failed to get cache entry: {e}")))?;

            Ok(entry)
        })
        .await
        .map_err(|e| AmendError::Other(format!("Failed to spawn get operation: {e}")))?
    }

    pub async fn put(&mut self, entry: CacheEntry) -> Result<()> {
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = Connection::open(&db_path)
                .map_err(|e| AmendError::Other(format!("Failed to open cache database: {e}")))?;

            let now = Utc::now().to_rfc3339();
            conn.execute(
                r#"
                INSERT OR REPLACE INTO cache_entries
                (key, data, created_at, expires_at, size, last_accessed)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    entry.key,
                    entry.data,
                    entry.created_at.to_rfc3339(),
                    entry.expires_at.to_rfc3339(),
                    entry.size as i64,
                    now,
                ],
            )
            .map_err(|e| AmendError::Other(format!("Failed to store cache entry: {e}")))?;

            Ok(())
        })
        .await
        .map_err(|e| AmendError::Other(format!("Failed to spawn put operation: {e}")))?
    }

    pub async fn remove(&mut self, key: &str) -> Result<bool> {
        let db_path = self.db_path.clone();
        let key_owned = key.to_string();

        tokio::task::spawn_blocking(move || -> Result<bool> {
            let conn = Connection::open(&db_path)
                .map_err(|e| AmendError::Other(format!("Failed to open cache database: {e}")))?;

            let affected = conn
                .execute("DELETE FROM cache_entries WHERE key = ?1", params![key_owned])
                .map_err(|e| AmendError::Other(format!("Failed to remove cache entry: {e}")))?;

            Ok(affected > 0)
        })
        .await
        .map_err(|e| AmendError::Other(format!("Failed to spawn remove operation: {e}")))?
    }

    pub async fn clear(&mut self) -> Result<()> {
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = Connection::open(&db_path)
                .map_err(|e| AmendError::Other(format!("Failed to open cache database: {e}")))?;

            conn.execute("DELETE FROM cache_entries", [])
                .map_err(|e| AmendError::Other(format!("Failed to clear cache: {e}")))?;

            Ok(())
        })
        .await
        .map_err(|e| AmendError::Other(format!("Failed to spawn clear operation: {e}")))?
    }

    pub async fn count_entries(&self) -> Result<u64> {
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || -> Result<u64> {
            let conn = Connection::open(&db_path)
                .map_err(|e| AmendError::Other(format!("Failed to open cache database: {e}")))?;

            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM cache_entries", [], |row| row.get(0))
                .map_err(|e| AmendError::Other(format!("Failed to count entries: {e}")))?;

            Ok(count as u64)
        })
        .await
        .map_err(|e| AmendError::Other(format!("Failed to spawn count_entries operation: {e}")))?
    }

    pub async fn get_total_size(&self) -> Result<u64> {
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || -> Result<u64> {
            let conn = Connection::open(&db_path)
                .map_err(|e| AmendError::Other(format!("Failed to open cache database: {e}")))?;

            let size: i64 = conn
                .query_row("SELECT COALESCE(SUM(size), 0) FROM cache_entries", [], |row| row.get(0))
                .map_err(|e| AmendError::Other(format!("Failed to get total size: {e}")))?;

            Ok(size as u64)
        })
        .await
        .map_err(|e| AmendError::Other(format!("Failed to spawn get_total_size operation: {e}")))?
    }

    pub async fn count_expired_entries(&self) -> Result<u64> {
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || -> Result<u64> {
            let conn = Connection::open(&db_path)
                .map_err(|e| AmendError::Other(format!("Failed to open cache database: {e}")))?;

            let now = Utc::now().to_rfc3339();
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM cache_entries WHERE expires_at < ?1", params![now], |row| {
                    row.get(0)
                })
                .map_err(|e| AmendError::Other(format!("Failed to count expired entries: {e}")))?;

            Ok(count as u64)
        })
        .await
        .map_err(|e| AmendError::Other(format!("Failed to spawn count_expired_entries operation: {e}")))?
    }

    pub async fn cleanup_expired(&mut self) -> Result<u64> {
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || -> Result<u64> {
            let conn = Connection::open(&db_path)
                .map_err(|e| AmendError::Other(format!("Failed to open cache database: {e}")))?;

            let now = Utc::now().to_rfc3339();
            let affected = conn
                .execute("DELETE FROM cache_entries WHERE expires_at < ?1", params![now])
                .map_err(|e| AmendError::Other(format!("Failed to cleanup expired entries: {e}")))?;

            Ok(affected as u64)
        })
        .await
        .map_err(|e| AmendError::Other(format!("Failed to spawn cleanup_expired operation: {e}")))?
    }

    pub async fn evict_lru(&mut self, space_to_free: u64) -> Result<()> {
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = Connection::open(&db_path)
                .map_err(|e| AmendError::Other(format!("Failed to open cache database: {e}")))?;

            let mut stmt = conn
                .prepare("SELECT key, size FROM cache_entries ORDER BY last_accessed ASC")
                .map_err(|e| AmendError::Other(format!("Failed to prepare LRU query: {e}")))?;

            let mut entries = Vec::new();
            let rows = stmt
                .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64)))
                .map_err(|e| AmendError::Other(format!("Failed to execute LRU query: {e}")))?;

            for row in rows {
                entries.push(row.map_err(|e| AmendError::Other(format!("Failed to process LRU row: {e}")))?);
            }

            let mut freed_space = 0u64;
            let mut keys_to_delete = Vec::new();

            for (key, size) in entries {
                keys_to_delete.push(key);
                freed_space += size;
                if freed_space >= space_to_free {
                    break;
                }
            }

            for key in keys_to_delete {
                conn.execute("DELETE FROM cache_entries WHERE key = ?1", params![key])
                    .map_err(|e| AmendError::Other(format!("Failed to delete LRU entry: {e}")))?;
            }

            Ok(())
        })
        .await
        .map_err(|e| AmendError::Other(format!("Failed to spawn evict_lru operation: {e}")))?
    }

    pub async fn optimize(&mut self) -> Result<()> {
        self.cleanup_expired().await?;

        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = Connection::open(&db_path)
                .map_err(|e| AmendError::Other(format!("Failed to open cache database: {e}")))?;

            conn.execute("VACUUM", [])
                .map_err(|e| AmendError::Other(format!("Failed to vacuum database: {e}")))?;
            conn.execute("ANALYZE", [])
                .map_err(|e| AmendError::Other(format!("Failed to analyze database: {e}")))?;

            Ok(())
        })
        .await
        .map_err(|e| AmendError::Other(format!("Failed to spawn optimize operation: {e}")))?
    }
}
