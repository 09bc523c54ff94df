//! Last fetched ops list, kept on disk so the dashboard works offline.

use std::fs;
use std::path::Path;

use crate::errors::{AppError, AppResult};
use crate::models::Op;

pub fn load_ops(path: &Path) -> AppResult<Vec<Op>> {
    if !path.exists() {
        return Err(AppError::MissingOps(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_ops(path: &Path, ops: &[Op]) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(ops)?)?;
    Ok(())
}

/// Find the op and operator a check-in refers to.
pub fn find_assignment<'a>(
    ops: &'a [Op],
    op_id: &str,
    operator_id: &str,
) -> AppResult<(&'a Op, &'a crate::models::Operator)> {
    ops.iter()
        .find(|op| op.op_id == op_id)
        .and_then(|op| op.operator(operator_id).map(|o| (op, o)))
        .ok_or_else(|| AppError::UnknownOperator {
            op_id: op_id.to_string(),
            operator_id: operator_id.to_string(),
        })
}
