//! Staffing figures for an op, combining its roster with today's attendance.

use serde::Serialize;

use crate::models::attendance::attendance_key;
use crate::models::{AttendanceMap, Op};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingSummary {
    pub needed: u32,
    pub assigned: usize,
    pub filled: u32,
    pub unfilled: u32,
    pub checked_in: usize,
    pub progress_percent: f64,
}

/// Staffing for the whole op. Check-ins are counted over every assigned
/// operator, not only the ones a search left visible.
pub fn staffing_summary(op: &Op, attendance: &AttendanceMap) -> StaffingSummary {
    let needed = op.operators_needed;
    let assigned = op.operators.len();
    let filled = op.filled_quantity.unwrap_or(assigned as u32);

    let checked_in = op
        .operators
        .iter()
        .filter(|o| {
            attendance
                .get(&attendance_key(&op.op_id, &o.id))
                .is_some_and(|e| e.is_checked_in())
        })
        .count();

    let progress_percent = if needed > 0 {
        (checked_in as f64 / needed as f64 * 100.0).min(100.0)
    } else {
        0.0
    };

    StaffingSummary {
        needed,
        assigned,
        filled,
        unfilled: needed.saturating_sub(filled),
        checked_in,
        progress_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceEntry, AttendanceStatus, Operator};

    fn op(needed: u32, filled: Option<u32>, ids: &[&str]) -> Op {
        let operators = ids
            .iter()
            .map(|id| Operator {
                id: id.to_string(),
                first_name: "A".into(),
                last_name: "B".into(),
                ops_completed: 0,
                reliability: 1.0,
                endorsements: Vec::new(),
            })
            .collect();
        Op {
            op_id: "op".into(),
            public_id: "P".into(),
            op_title: "T".into(),
            op_date: None,
            start_time: String::new(),
            end_time: String::new(),
            check_in_code: None,
            check_out_code: None,
            check_in_expiration_time: None,
            check_out_expiration_time: None,
            filled_quantity: filled,
            est_total_hours: None,
            operators_needed: needed,
            operators,
        }
    }

    fn checked(status: AttendanceStatus) -> AttendanceEntry {
        AttendanceEntry {
            status,
            ..AttendanceEntry::default()
        }
    }

    #[test]
    fn counts_only_checked_in_operators() {
        let mut attendance = AttendanceMap::new();
        attendance.insert("op_1".into(), checked(AttendanceStatus::CheckedIn));
        attendance.insert("op_2".into(), checked(AttendanceStatus::CheckedOut));
        attendance.insert("other_3".into(), checked(AttendanceStatus::CheckedIn));

        let summary = staffing_summary(&op(4, None, &["1", "2", "3"]), &attendance);

        assert_eq!(summary.checked_in, 1);
        assert_eq!(summary.assigned, 3);
        assert_eq!(summary.filled, 3);
        assert_eq!(summary.unfilled, 1);
        assert_eq!(summary.progress_percent, 25.0);
    }

    #[test]
    fn filled_quantity_overrides_roster_size() {
        let summary = staffing_summary(&op(5, Some(5), &["1"]), &AttendanceMap::new());
        assert_eq!(summary.unfilled, 0);
    }

    #[test]
    fn progress_is_capped_and_zero_when_nobody_is_needed() {
        let mut attendance = AttendanceMap::new();
        attendance.insert("op_1".into(), checked(AttendanceStatus::CheckedIn));
        attendance.insert("op_2".into(), checked(AttendanceStatus::CheckedIn));

        assert_eq!(
            staffing_summary(&op(1, None, &["1", "2"]), &attendance).progress_percent,
            100.0
        );
        assert_eq!(
            staffing_summary(&op(0, None, &["1", "2"]), &attendance).progress_percent,
            0.0
        );
    }
}
