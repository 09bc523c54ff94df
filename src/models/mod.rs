pub mod attendance;
pub mod op;
pub mod processed_op;
pub mod sort_option;

pub use attendance::{AttendanceAction, AttendanceEntry, AttendanceMap, AttendanceStatus};
pub use op::{Op, Operator};
pub use processed_op::ProcessedOp;
pub use sort_option::SortOption;
