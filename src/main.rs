//! opsboard main entrypoint.

use opsboard::run;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `OPSBOARD_LOG=debug`.
const LOG_ENV: &str = "OPSBOARD_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        opsboard::ui::messages::error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
