pub mod attendance;
pub mod fetcher;
pub mod projection;
pub mod roster;
pub mod snapshot;

pub use attendance::{AttendanceStore, DispatchOutcome};
pub use fetcher::{CancelToken, FetchOutcome, FetchState, Fetcher};
pub use projection::{project, sort_operators};
