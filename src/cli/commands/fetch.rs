use tracing::debug;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::fetcher::{CancelToken, FetchOutcome, FetchState, Fetcher};
use crate::core::snapshot::save_ops;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Op;
use crate::ui::messages::success;

/// Handle the `fetch` command
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Fetch { endpoint } = cmd {
        let endpoint = endpoint.as_deref().unwrap_or(&cfg.endpoint);
        let ops = fetch_and_cache(cfg, endpoint).await?;
        success(format!(
            "Fetched {} ops → {}",
            ops.len(),
            cfg.ops_cache_path().display()
        ));
    }
    Ok(())
}

/// Fetch the feed (Ctrl-C cancels), store it as the snapshot and audit
/// the outcome.
pub(crate) async fn fetch_and_cache(cfg: &Config, endpoint: &str) -> AppResult<Vec<Op>> {
    let fetcher = Fetcher::http(endpoint);
    let cancel = CancelToken::new();

    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupt received, cancelling fetch");
                cancel.cancel();
            }
        })
    };

    let mut state = FetchState::default();
    let outcome = fetcher.fetch(&cancel).await;
    watcher.abort();

    if matches!(outcome, FetchOutcome::Cancelled) {
        return Err(AppError::Cancelled);
    }
    state.apply(outcome);

    let (operation, message) = match &state.error {
        Some(e) => ("fetch_failed", e.clone()),
        None => ("fetch", format!("{} ops", state.data.len())),
    };
    audit(cfg, operation, endpoint, &message);

    if let Some(e) = state.error {
        return Err(AppError::Fetch(e));
    }

    save_ops(&cfg.ops_cache_path(), &state.data)?;
    Ok(state.data)
}

fn audit(cfg: &Config, operation: &str, target: &str, message: &str) {
    let pool = match DbPool::new(&cfg.database_path().to_string_lossy()) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "audit log unavailable");
            return;
        }
    };
    if init_db(&pool.conn).is_ok() {
        log::ttlog_quiet(&pool.conn, operation, target, message);
    }
}
