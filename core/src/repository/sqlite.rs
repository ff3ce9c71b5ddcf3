use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::repository::traits::BucketStore;

/// `BucketStore` backed by a single SQLite file.
pub struct SqliteBucketStore {
    conn: Connection,
}

impl SqliteBucketStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let conn = Connection::open(path)
            .with_context(|| format!("opening task database {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;")?;
        let store = Self::from_connection(conn)?;
        info!(path = %path.display(), "task database opened");
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS buckets (
                name TEXT PRIMARY KEY
            );
            CREATE TABLE IF NOT EXISTS entries (
                bucket TEXT NOT NULL REFERENCES buckets(name) ON DELETE CASCADE,
                key TEXT NOT NULL,
                value BLOB NOT NULL,
                PRIMARY KEY (bucket, key)
            );
            ",
        )
        .context("initializing task database schema")?;
        Ok(Self { conn })
    }
}

impl BucketStore for SqliteBucketStore {
    fn ensure(&self, bucket: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let created = tx.execute(
            "INSERT OR IGNORE INTO buckets (name) VALUES (?1)",
            params![bucket],
        )?;
        tx.commit()
            .with_context(|| format!("committing bucket '{}'", bucket))?;
        if created > 0 {
            info!(bucket, "bucket created");
        }
        Ok(())
    }

    fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let tx = self.conn.unchecked_transaction()?;
        let value = tx
            .query_row(
                "SELECT value FROM entries WHERE bucket = ?1 AND key = ?2",
                params![bucket, key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()
            .with_context(|| format!("reading '{}' from bucket '{}'", key, bucket))?;
        tx.commit()?;
        debug!(bucket, key, found = value.is_some(), "bucket read");
        Ok(value)
    }

    fn put(&self, bucket: &str, key: &str, value: &[u8]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let exists: bool = tx.query_row(
            "SELECT EXISTS (SELECT 1 FROM buckets WHERE name = ?1)",
            params![bucket],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(anyhow!("bucket '{}' does not exist", bucket));
        }
        tx.execute(
            "INSERT INTO entries (bucket, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT (bucket, key) DO UPDATE SET value = excluded.value",
            params![bucket, key, value],
        )?;
        tx.commit()
            .with_context(|| format!("writing '{}' to bucket '{}'", key, bucket))?;
        debug!(bucket, key, bytes = value.len(), "bucket write");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_is_none() {
        let store = SqliteBucketStore::in_memory().unwrap();
        store.ensure("a").unwrap();
        assert_eq!(store.get("a", "tasks").unwrap(), None);
        assert_eq!(store.get("never-created", "tasks").unwrap(), None);
    }

    #[test]
    fn test_put_overwrites() {
        let store = SqliteBucketStore::in_memory().unwrap();
        store.ensure("a").unwrap();
        store.put("a", "tasks", b"one").unwrap();
        store.put("a", "tasks", b"two").unwrap();
        assert_eq!(store.get("a", "tasks").unwrap(), Some(b"two".to_vec()));
    }

    #[test]
    fn test_put_requires_bucket() {
        let store = SqliteBucketStore::in_memory().unwrap();
        assert!(store.put("missing", "tasks", b"[]").is_err());
    }

    #[test]
    fn test_ensure_keeps_existing_entries() {
        let store = SqliteBucketStore::in_memory().unwrap();
        store.ensure("a").unwrap();
        store.put("a", "tasks", b"[]").unwrap();
        store.ensure("a").unwrap();
        assert_eq!(store.get("a", "tasks").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_buckets_are_separate() {
        let store = SqliteBucketStore::in_memory().unwrap();
        store.ensure("a").unwrap();
        store.ensure("b").unwrap();
        store.put("a", "tasks", b"from a").unwrap();
        assert_eq!(store.get("b", "tasks").unwrap(), None);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tasks.db");
        {
            let store = SqliteBucketStore::open(&path).unwrap();
            store.ensure("a").unwrap();
            store.put("a", "tasks", b"kept").unwrap();
        }
        let store = SqliteBucketStore::open(&path).unwrap();
        assert_eq!(store.get("a", "tasks").unwrap(), Some(b"kept".to_vec()));
    }
}
