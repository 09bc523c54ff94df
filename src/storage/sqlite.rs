//! Durable storage on a SQLite file.
//!
//! Every write goes to `kv` and is appended to `kv_changes` tagged with the
//! writer id of the handle. Each handle keeps a cursor into the journal, so
//! two processes on the same file see each other's writes as external
//! changes.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;
use rusqlite::{OptionalExtension, params};

use super::{StorageEvent, StoragePort};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Journal rows kept after pruning.
const JOURNAL_TAIL: i64 = 1000;

static HANDLE_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct SqliteStorage {
    pool: DbPool,
    writer: String,
    cursor: Cell<i64>,
}

impl SqliteStorage {
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;

        pool.conn.execute(
            "DELETE FROM kv_changes
             WHERE seq <= (SELECT IFNULL(MAX(seq), 0) FROM kv_changes) - ?1",
            [JOURNAL_TAIL],
        )?;

        let cursor: i64 =
            pool.conn
                .query_row("SELECT IFNULL(MAX(seq), 0) FROM kv_changes", [], |r| r.get(0))?;

        let writer = format!(
            "{}-{}-{}",
            std::process::id(),
            Local::now().timestamp_micros(),
            HANDLE_COUNTER.fetch_add(1, Ordering::Relaxed)
        );

        Ok(Self {
            pool,
            writer,
            cursor: Cell::new(cursor),
        })
    }

    /// Access to the underlying connection, for the audit log.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn journal(&self, key: &str, value: Option<&str>) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO kv_changes (key, value, writer, changed_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![key, value, self.writer, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl StoragePort for SqliteStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .pool
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |r| r.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let tx = self.pool.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Local::now().to_rfc3339()],
        )?;
        self.journal(key, Some(value))?;
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let tx = self.pool.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        if removed > 0 {
            self.journal(key, None)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        let mut stmt = self.pool.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn take_external_changes(&self) -> AppResult<Vec<StorageEvent>> {
        let mut stmt = self.pool.conn.prepare(
            "SELECT seq, key, value, writer FROM kv_changes
             WHERE seq > ?1 ORDER BY seq ASC",
        )?;
        let rows = stmt.query_map([self.cursor.get()], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, Option<String>>(2)?,
                r.get::<_, String>(3)?,
            ))
        })?;

        let mut events = Vec::new();
        let mut last = self.cursor.get();
        for row in rows {
            let (seq, key, new_value, writer) = row?;
            last = last.max(seq);
            if writer != self.writer {
                events.push(StorageEvent { key, new_value });
            }
        }
        self.cursor.set(last);

        Ok(events)
    }
}
