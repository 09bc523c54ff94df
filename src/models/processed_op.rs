use super::op::{Op, Operator};
use serde::Serialize;

/// An op prepared for display: the operators left after filtering, in
/// display order, plus enough context to label a partial roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedOp {
    #[serde(flatten)]
    pub op: Op,
    pub visible_operators: Vec<Operator>,
    /// Roster size before filtering.
    pub total_operators: usize,
    pub is_filtered: bool,
}
