pub mod colors;
pub mod date;
pub mod path;
pub mod table;
pub mod time;

pub use date::{Clock, FixedClock, SystemClock, normalize_shift_date};
pub use time::format_duration;
