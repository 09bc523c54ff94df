//! Plain-text rendering of projected ops and attendance for the terminal.

use chrono::{DateTime, Local};

use crate::core::roster::staffing_summary;
use crate::models::attendance::attendance_key;
use crate::models::{AttendanceMap, ProcessedOp};
use crate::utils::colors::{RESET, color_for_reliability, colorize_optional, colorize_status};
use crate::utils::date::{Clock, normalize_shift_date};
use crate::utils::table::{Column, Table};
use crate::utils::time::{date_label, format_duration, time_label};

/// One op: title line, schedule, staffing and the visible roster.
pub fn render_op<C: Clock>(op: &ProcessedOp, attendance: &AttendanceMap, clock: &C) -> String {
    let start = normalize_shift_date(&op.op.start_time, clock);
    let end = normalize_shift_date(&op.op.end_time, clock);
    let staffing = staffing_summary(&op.op, attendance);
    let now: DateTime<Local> = clock.now();

    let mut out = String::new();
    out.push_str(&format!("{} (#{})\n", op.op.op_title, op.op.public_id));
    out.push_str(&format!(
        "{} {} - {}\n",
        date_label(start.as_ref()),
        time_label(start.as_ref()),
        time_label(end.as_ref())
    ));

    let mut staffing_line = format!(
        "Checked in {}/{} ({:.0}%) | Assigned {} | Needed {}",
        staffing.checked_in,
        staffing.needed,
        staffing.progress_percent,
        staffing.assigned,
        staffing.needed
    );
    if staffing.unfilled > 0 {
        staffing_line.push_str(&format!(" | {} UNFILLED", staffing.unfilled));
    }
    out.push_str(&staffing_line);
    out.push('\n');

    if op.is_filtered {
        out.push_str(&format!(
            "Showing {} of {} operators\n",
            op.visible_operators.len(),
            op.total_operators
        ));
    }

    let mut table = Table::new(vec![
        Column::new("ID", 2),
        Column::new("Operator", 8),
        Column::new("Ops", 3),
        Column::new("Reliability", 11),
        Column::new("Status", 6),
        Column::new("Worked", 6),
        Column::new("Endorsements", 0),
    ]);

    for operator in &op.visible_operators {
        let entry = attendance.get(&attendance_key(&op.op.op_id, &operator.id));
        let percent = operator.reliability_percent();

        let (status, worked) = match entry {
            Some(e) => (
                colorize_status(e.status.as_str(), e.is_checked_in()),
                colorize_optional(&format_duration(e.worked(now))),
            ),
            None => (colorize_status("--", false), colorize_optional("0 min")),
        };

        table.add_row(vec![
            operator.id.clone(),
            operator.full_name(),
            operator.ops_completed.to_string(),
            format!("{}{percent}%{RESET}", color_for_reliability(percent)),
            status,
            worked,
            operator.endorsements.join(", "),
        ]);
    }

    out.push_str(&table.render());
    out
}

/// Today's attendance as a table, keyed like the persisted map.
pub fn render_attendance(attendance: &AttendanceMap, now: DateTime<Local>) -> String {
    if attendance.is_empty() {
        return "No attendance recorded today.\n".to_string();
    }

    let mut table = Table::new(vec![
        Column::new("Key", 3),
        Column::new("Status", 6),
        Column::new("Checked in", 10),
        Column::new("Checked out", 11),
        Column::new("Worked", 6),
        Column::new("Notes", 0),
    ]);

    for (key, entry) in attendance {
        let notes: Vec<&str> = [entry.check_in_note.as_deref(), entry.check_out_note.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        table.add_row(vec![
            key.clone(),
            colorize_status(entry.status.as_str(), entry.is_checked_in()),
            colorize_optional(&time_label(entry.checked_in_at().as_ref())),
            colorize_optional(&time_label(entry.checked_out_at().as_ref())),
            colorize_optional(&format_duration(entry.worked(now))),
            notes.join(" / "),
        ]);
    }

    table.render()
}
