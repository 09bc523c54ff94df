// src/export/model.rs

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::models::attendance::attendance_key;
use crate::models::{AttendanceMap, Op};
use crate::utils::time::format_duration;

/// Flat attendance row for CSV / JSON.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AttendanceExport {
    pub key: String,
    pub op_id: String,
    pub op_title: String,
    pub operator_id: String,
    pub operator_name: String,
    pub status: String,
    pub check_in_at: String,
    pub check_out_at: String,
    pub worked: String,
    pub check_in_note: String,
    pub check_out_note: String,
}

/// One row per attendance entry, in key order. Op and operator details
/// are filled in from `ops` when the key belongs to a known pair.
pub fn build_rows(
    attendance: &AttendanceMap,
    ops: &[Op],
    now: DateTime<Local>,
) -> Vec<AttendanceExport> {
    attendance
        .iter()
        .map(|(key, entry)| {
            let known = ops.iter().find_map(|op| {
                op.operators
                    .iter()
                    .find(|o| attendance_key(&op.op_id, &o.id) == *key)
                    .map(|o| (op, o))
            });

            let (op_id, op_title, operator_id, operator_name) = match known {
                Some((op, o)) => (
                    op.op_id.clone(),
                    op.op_title.clone(),
                    o.id.clone(),
                    o.full_name(),
                ),
                None => Default::default(),
            };

            AttendanceExport {
                key: key.clone(),
                op_id,
                op_title,
                operator_id,
                operator_name,
                status: entry.status.as_str().to_string(),
                check_in_at: entry.check_in_at.clone().unwrap_or_default(),
                check_out_at: entry.check_out_at.clone().unwrap_or_default(),
                worked: format_duration(entry.worked(now)),
                check_in_note: entry.check_in_note.clone().unwrap_or_default(),
                check_out_note: entry.check_out_note.clone().unwrap_or_default(),
            }
        })
        .collect()
}
