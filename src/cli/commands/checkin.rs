use crate::cli::commands::{load_ops_from, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::snapshot::find_assignment;
use crate::db::log;
use crate::errors::AppResult;
use crate::models::AttendanceAction;
use crate::ui::messages::{success, warning};

/// Handle the `checkin` and `checkout` commands
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let (op_id, operator_id, note, file, action) = match cmd {
        Commands::Checkin {
            op_id,
            operator_id,
            note,
            file,
        } => (op_id, operator_id, note, file, AttendanceAction::CheckIn),
        Commands::Checkout {
            op_id,
            operator_id,
            note,
            file,
        } => (op_id, operator_id, note, file, AttendanceAction::CheckOut),
        _ => return Ok(()),
    };

    let ops = load_ops_from(cfg, file)?;
    let (op, operator) = find_assignment(&ops, op_id, operator_id)?;

    let mut store = open_store(cfg)?;
    let persisted = store.perform_action(op_id, operator_id, action, note.as_deref());

    let label = match action {
        AttendanceAction::CheckIn => "Checked in",
        AttendanceAction::CheckOut => "Checked out",
    };
    let stamp = store
        .entry(op_id, operator_id)
        .and_then(|e| match action {
            AttendanceAction::CheckIn => e.check_in_at.clone(),
            AttendanceAction::CheckOut => e.check_out_at.clone(),
        })
        .unwrap_or_default();

    log::ttlog_quiet(
        &store.storage().pool().conn,
        action.as_str(),
        &format!("{op_id}_{operator_id}"),
        note.as_deref().unwrap_or(""),
    );

    success(format!(
        "{label} {} on {} at {stamp}",
        operator.full_name(),
        op.op_title
    ));
    if !persisted {
        warning("Attendance could not be saved; it will be lost when this session ends.");
    }
    Ok(())
}
