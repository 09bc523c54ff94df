pub mod attendance;
pub mod checkin;
pub mod config;
pub mod fetch;
pub mod init;
pub mod list;
pub mod log;
pub mod watch;

use std::path::PathBuf;

use crate::config::Config;
use crate::core::AttendanceStore;
use crate::core::snapshot::load_ops;
use crate::errors::AppResult;
use crate::models::Op;
use crate::storage::SqliteStorage;
use crate::utils::date::SystemClock;

/// Attendance store on the configured database, for today.
pub(crate) fn open_store(cfg: &Config) -> AppResult<AttendanceStore<SqliteStorage>> {
    let path = cfg.database_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let storage = SqliteStorage::open(&path.to_string_lossy())?;
    Ok(AttendanceStore::with_prefix(
        storage,
        SystemClock,
        &cfg.storage_prefix,
    ))
}

/// Ops from an explicit file, or from the cached snapshot.
pub(crate) fn load_ops_from(cfg: &Config, file: &Option<String>) -> AppResult<Vec<Op>> {
    let path = match file {
        Some(f) => PathBuf::from(f),
        None => cfg.ops_cache_path(),
    };
    load_ops(&path)
}
