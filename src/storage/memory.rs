//! In-memory storage shared between handles, the way browser tabs share
//! one origin's local storage.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use super::{StorageEvent, StoragePort};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Default)]
struct Shared {
    values: BTreeMap<String, String>,
    pending: HashMap<usize, Vec<StorageEvent>>,
    next_handle: usize,
    fail_writes: bool,
}

impl Shared {
    fn register(&mut self) -> usize {
        let id = self.next_handle;
        self.next_handle += 1;
        self.pending.insert(id, Vec::new());
        id
    }

    fn broadcast(&mut self, from: usize, event: StorageEvent) {
        for (id, queue) in self.pending.iter_mut() {
            if *id != from {
                queue.push(event.clone());
            }
        }
    }
}

#[derive(Debug)]
pub struct MemoryStorage {
    id: usize,
    shared: Rc<RefCell<Shared>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        let shared = Rc::new(RefCell::new(Shared::default()));
        let id = shared.borrow_mut().register();
        Self { id, shared }
    }

    /// A second handle on the same data. Writes through either handle are
    /// reported to the other as external changes.
    pub fn open_tab(&self) -> Self {
        let id = self.shared.borrow_mut().register();
        Self {
            id,
            shared: Rc::clone(&self.shared),
        }
    }

    /// Make every subsequent `set` fail, as a full or disabled storage would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.shared.borrow_mut().fail_writes = fail;
    }

    /// Write as if another tab did it, without needing a handle for it.
    pub fn inject_external(&self, key: &str, value: Option<&str>) {
        let mut shared = self.shared.borrow_mut();
        match value {
            Some(v) => shared.values.insert(key.to_string(), v.to_string()),
            None => shared.values.remove(key),
        };
        if let Some(queue) = shared.pending.get_mut(&self.id) {
            queue.push(StorageEvent {
                key: key.to_string(),
                new_value: value.map(str::to_string),
            });
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MemoryStorage {
    fn drop(&mut self) {
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.pending.remove(&self.id);
        }
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.shared.borrow().values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut shared = self.shared.borrow_mut();
        if shared.fail_writes {
            return Err(AppError::Storage("storage quota exceeded".to_string()));
        }
        shared.values.insert(key.to_string(), value.to_string());
        shared.broadcast(
            self.id,
            StorageEvent {
                key: key.to_string(),
                new_value: Some(value.to_string()),
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut shared = self.shared.borrow_mut();
        if shared.values.remove(key).is_some() {
            shared.broadcast(
                self.id,
                StorageEvent {
                    key: key.to_string(),
                    new_value: None,
                },
            );
        }
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        Ok(self.shared.borrow().values.keys().cloned().collect())
    }

    fn take_external_changes(&self) -> AppResult<Vec<StorageEvent>> {
        let mut shared = self.shared.borrow_mut();
        Ok(shared
            .pending
            .get_mut(&self.id)
            .map(std::mem::take)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_reach_other_tabs_only() {
        let first = MemoryStorage::new();
        let second = first.open_tab();

        first.set("k", "v").unwrap();

        assert!(first.take_external_changes().unwrap().is_empty());
        let events = second.take_external_changes().unwrap();
        assert_eq!(
            events,
            vec![StorageEvent {
                key: "k".into(),
                new_value: Some("v".into())
            }]
        );
        assert!(second.take_external_changes().unwrap().is_empty());
        assert_eq!(second.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn removals_are_broadcast() {
        let first = MemoryStorage::new();
        let second = first.open_tab();
        first.set("k", "v").unwrap();
        second.take_external_changes().unwrap();

        first.remove("k").unwrap();
        let events = second.take_external_changes().unwrap();
        assert_eq!(events[0].new_value, None);
        assert!(first.keys().unwrap().is_empty());
    }

    #[test]
    fn failing_writes_leave_values_untouched() {
        let storage = MemoryStorage::new();
        storage.set("k", "old").unwrap();
        storage.set_fail_writes(true);

        assert!(storage.set("k", "new").is_err());
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("old"));
    }
}
