//! Day-scoped attendance store.
//!
//! The whole map for one calendar day is persisted as JSON under
//! `"<prefix>_<YYYY-MM-DD>"`. Keys for other days under the same prefix
//! are stale and removed when the store opens or rolls over.

use chrono::{NaiveDate, SecondsFormat};
use tracing::{debug, error, warn};

use crate::models::attendance::attendance_key;
use crate::models::{AttendanceAction, AttendanceEntry, AttendanceMap, AttendanceStatus};
use crate::storage::{StorageEvent, StoragePort};
use crate::utils::date::{Clock, SystemClock, day_key};

pub const DEFAULT_STORAGE_PREFIX: &str = "veryable_attendance_v1";

/// Result of [`AttendanceStore::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a known action; nothing changed.
    Ignored,
    /// State updated; `persisted` tells whether it reached storage.
    Applied { persisted: bool },
}

pub struct AttendanceStore<S: StoragePort, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    prefix: String,
    day: NaiveDate,
    attendance: AttendanceMap,
}

impl<S: StoragePort, C: Clock> AttendanceStore<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        Self::with_prefix(storage, clock, DEFAULT_STORAGE_PREFIX)
    }

    /// Open the store for today: hydrate today's map and drop other days.
    pub fn with_prefix(storage: S, clock: C, prefix: &str) -> Self {
        let day = clock.today();
        let mut store = Self {
            storage,
            clock,
            prefix: prefix.to_string(),
            day,
            attendance: AttendanceMap::new(),
        };
        store.attendance = store.hydrate();
        store.clean_old_keys();
        store
    }

    /// Persisted key for the clock's current day.
    pub fn storage_key(&self) -> String {
        self.key_for(self.clock.today())
    }

    fn key_for(&self, day: NaiveDate) -> String {
        format!("{}_{}", self.prefix, day_key(day))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn hydrate(&self) -> AttendanceMap {
        let key = self.key_for(self.day);
        match self.storage.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<AttendanceMap>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(%key, error = %e, "ignoring malformed persisted attendance");
                    AttendanceMap::new()
                }
            },
            Ok(None) => AttendanceMap::new(),
            Err(e) => {
                warn!(%key, error = %e, "failed to read persisted attendance");
                AttendanceMap::new()
            }
        }
    }

    /// Remove keys of other days sharing the prefix. Unrelated keys stay.
    fn clean_old_keys(&self) {
        let today = self.key_for(self.day);
        let stale_prefix = format!("{}_", self.prefix);

        let keys = match self.storage.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "could not list persisted keys");
                return;
            }
        };

        for key in keys
            .iter()
            .filter(|k| k.starts_with(&stale_prefix) && **k != today)
        {
            match self.storage.remove(key) {
                Ok(()) => debug!(%key, "removed stale attendance"),
                Err(e) => warn!(%key, error = %e, "failed to remove stale attendance"),
            }
        }
    }

    /// Start a fresh map when the calendar day has changed.
    fn roll_over(&mut self) {
        let today = self.clock.today();
        if today == self.day {
            return;
        }
        debug!(from = %self.day, to = %today, "attendance day rolled over");
        self.day = today;
        self.attendance = self.hydrate();
        self.clean_old_keys();
    }

    fn persist(&self) -> bool {
        let key = self.key_for(self.day);
        let payload = match serde_json::to_string(&self.attendance) {
            Ok(p) => p,
            Err(e) => {
                error!(%key, error = %e, "could not serialize attendance");
                return false;
            }
        };
        match self.storage.set(&key, &payload) {
            Ok(()) => true,
            Err(e) => {
                error!(%key, error = %e, "could not persist attendance; keeping it in memory");
                false
            }
        }
    }

    /// Record a check-in or check-out for one operator on one op.
    ///
    /// Returns whether the updated map reached durable storage. The
    /// in-memory state is updated either way.
    pub fn perform_action(
        &mut self,
        op_id: &str,
        operator_id: &str,
        action: AttendanceAction,
        note: Option<&str>,
    ) -> bool {
        self.roll_over();

        let key = attendance_key(op_id, operator_id);
        let current = self.attendance.get(&key).cloned().unwrap_or_default();
        let now = self
            .clock
            .now()
            .to_rfc3339_opts(SecondsFormat::Secs, false);
        let note = note.map(str::to_string);

        let next = match action {
            AttendanceAction::CheckIn => AttendanceEntry {
                status: AttendanceStatus::CheckedIn,
                check_in_at: Some(now),
                check_out_at: None,
                check_in_note: note,
                ..current
            },
            AttendanceAction::CheckOut => AttendanceEntry {
                status: AttendanceStatus::CheckedOut,
                check_out_at: Some(now),
                check_out_note: note,
                ..current
            },
        };

        self.attendance.insert(key, next);
        self.persist()
    }

    /// Untyped entry point. Anything other than `checkin`/`checkout` leaves
    /// the state untouched.
    pub fn dispatch(
        &mut self,
        op_id: &str,
        operator_id: &str,
        action: &str,
        note: Option<&str>,
    ) -> DispatchOutcome {
        match AttendanceAction::parse(action) {
            Some(action) => DispatchOutcome::Applied {
                persisted: self.perform_action(op_id, operator_id, action, note),
            },
            None => {
                debug!(action, "ignoring unknown attendance action");
                DispatchOutcome::Ignored
            }
        }
    }

    /// Today's attendance map.
    pub fn snapshot(&mut self) -> &AttendanceMap {
        self.roll_over();
        &self.attendance
    }

    pub fn entry(&mut self, op_id: &str, operator_id: &str) -> Option<&AttendanceEntry> {
        self.roll_over();
        self.attendance.get(&attendance_key(op_id, operator_id))
    }

    /// Replace the map with an externally written value for today's key.
    ///
    /// Events for other keys and malformed payloads are ignored. A removed
    /// key reads as an empty map. Returns whether the state changed.
    pub fn apply_external_change(&mut self, event: &StorageEvent) -> bool {
        self.roll_over();
        if event.key != self.key_for(self.day) {
            return false;
        }

        let next = match event.new_value.as_deref() {
            None => AttendanceMap::new(),
            Some(raw) => match serde_json::from_str::<AttendanceMap>(raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(key = %event.key, error = %e, "ignoring malformed attendance from another session");
                    return false;
                }
            },
        };

        self.attendance = next;
        true
    }

    /// Drain and apply changes written by other sessions. Returns how many
    /// changed the state.
    pub fn sync_external(&mut self) -> usize {
        let events = match self.storage.take_external_changes() {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "could not read external storage changes");
                return 0;
            }
        };

        events
            .iter()
            .filter(|event| self.apply_external_change(event))
            .count()
    }
}
