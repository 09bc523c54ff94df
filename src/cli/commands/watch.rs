use std::time::Duration;

use tracing::debug;

use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::ui::render::render_attendance;
use crate::utils::date::{Clock, SystemClock};

/// Handle the `watch` command: redraw today's attendance every interval,
/// folding in changes written by other sessions, until Ctrl-C.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { interval } = cmd {
        let period = Duration::from_secs(interval.unwrap_or(cfg.refresh_seconds).max(1));
        let mut store = open_store(cfg)?;
        let mut ticker = tokio::time::interval(period);

        info("Watching attendance (Ctrl-C to stop)…");
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tokio::signal::ctrl_c() => break,
            }

            let changed = store.sync_external();
            debug!(changed, "attendance refreshed");

            header(format!("Attendance {}", store.storage_key()));
            print!("{}", render_attendance(store.snapshot(), SystemClock.now()));
        }
    }
    Ok(())
}
