use chrono::{DateTime, Local, TimeDelta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::date::parse_iso;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "Checked In")]
    CheckedIn,
    #[serde(rename = "Checked Out")]
    CheckedOut,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::CheckedIn => "Checked In",
            AttendanceStatus::CheckedOut => "Checked Out",
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, AttendanceStatus::CheckedIn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceAction {
    CheckIn,
    CheckOut,
}

impl AttendanceAction {
    /// `checkin` / `checkout`; anything else is not an action.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "checkin" => Some(AttendanceAction::CheckIn),
            "checkout" => Some(AttendanceAction::CheckOut),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceAction::CheckIn => "checkin",
            AttendanceAction::CheckOut => "checkout",
        }
    }
}

/// Check-in state of one operator on one op for the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_note: Option<String>,
}

impl Default for AttendanceEntry {
    fn default() -> Self {
        Self {
            status: AttendanceStatus::CheckedOut,
            check_in_at: None,
            check_out_at: None,
            check_in_note: None,
            check_out_note: None,
        }
    }
}

impl AttendanceEntry {
    pub fn is_checked_in(&self) -> bool {
        self.status.is_in()
    }

    pub fn checked_in_at(&self) -> Option<DateTime<Local>> {
        self.check_in_at.as_deref().and_then(parse_iso)
    }

    pub fn checked_out_at(&self) -> Option<DateTime<Local>> {
        self.check_out_at.as_deref().and_then(parse_iso)
    }

    /// Time worked so far: from check-in to check-out, or to `now` while
    /// still on shift. Zero without a valid check-in; never negative.
    pub fn worked(&self, now: DateTime<Local>) -> TimeDelta {
        let Some(start) = self.checked_in_at() else {
            return TimeDelta::zero();
        };
        let end = self.checked_out_at().unwrap_or(now);
        (end - start).max(TimeDelta::zero())
    }
}

/// Entries keyed by `"<opId>_<operatorId>"`.
pub type AttendanceMap = BTreeMap<String, AttendanceEntry>;

pub fn attendance_key(op_id: &str, operator_id: &str) -> String {
    format!("{op_id}_{operator_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_use_display_status_labels() {
        let entry = AttendanceEntry {
            status: AttendanceStatus::CheckedIn,
            check_in_at: Some("2026-03-10T09:00:00+00:00".into()),
            ..AttendanceEntry::default()
        };
        let json = serde_json::to_string(&entry).unwrap();

        assert_eq!(
            json,
            r#"{"status":"Checked In","checkInAt":"2026-03-10T09:00:00+00:00"}"#
        );
    }

    #[test]
    fn worked_time_runs_until_checkout_or_now() {
        let now = parse_iso("2026-03-10T12:00:00+00:00").unwrap();
        let mut entry = AttendanceEntry {
            status: AttendanceStatus::CheckedIn,
            check_in_at: Some("2026-03-10T09:00:00+00:00".into()),
            ..AttendanceEntry::default()
        };
        assert_eq!(entry.worked(now), TimeDelta::hours(3));

        entry.check_out_at = Some("2026-03-10T10:30:00+00:00".into());
        assert_eq!(entry.worked(now), TimeDelta::minutes(90));

        entry.check_out_at = Some("broken".into());
        assert_eq!(entry.worked(now), TimeDelta::hours(3));
    }

    #[test]
    fn worked_time_is_zero_without_valid_check_in() {
        let now = parse_iso("2026-03-10T12:00:00+00:00").unwrap();
        assert_eq!(AttendanceEntry::default().worked(now), TimeDelta::zero());

        let entry = AttendanceEntry {
            check_in_at: Some("yesterday-ish".into()),
            ..AttendanceEntry::default()
        };
        assert_eq!(entry.worked(now), TimeDelta::zero());
    }

    #[test]
    fn unknown_actions_do_not_parse() {
        assert_eq!(AttendanceAction::parse("checkin"), Some(AttendanceAction::CheckIn));
        assert_eq!(AttendanceAction::parse("CHECKIN"), None);
        assert_eq!(AttendanceAction::parse("pause"), None);
    }
}
