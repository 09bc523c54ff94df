//! Persistence port used by the attendance store.
//!
//! A port is a string key/value store shared by several handles (browser
//! tabs, processes). Writes made through one handle reach the others as
//! [`StorageEvent`]s, drained with [`StoragePort::take_external_changes`].

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::errors::AppResult;

/// A change made through another handle. `new_value` is `None` when the
/// key was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub new_value: Option<String>,
}

pub trait StoragePort {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    fn remove(&self, key: &str) -> AppResult<()>;

    fn keys(&self) -> AppResult<Vec<String>>;

    /// Changes made by other handles since the previous call, oldest first.
    /// Never includes this handle's own writes.
    fn take_external_changes(&self) -> AppResult<Vec<StorageEvent>>;
}

impl<S: StoragePort + ?Sized> StoragePort for &S {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        (**self).keys()
    }

    fn take_external_changes(&self) -> AppResult<Vec<StorageEvent>> {
        (**self).take_external_changes()
    }
}
