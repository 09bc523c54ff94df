use crate::cli::commands::{load_ops_from, open_store};
use crate::cli::commands::fetch::fetch_and_cache;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::projection::project;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::ui::render::render_op;
use crate::utils::date::SystemClock;

/// Handle the `list` command
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        search,
        sort,
        file,
        refresh,
        json,
    } = cmd
    {
        let ops = if *refresh && file.is_none() {
            fetch_and_cache(cfg, &cfg.endpoint).await?
        } else {
            load_ops_from(cfg, file)?
        };

        let sort_by = sort.unwrap_or(cfg.default_sort);
        let term = search.as_deref().unwrap_or("");
        let processed = project(&ops, term, sort_by, &SystemClock);

        if *json {
            println!("{}", serde_json::to_string_pretty(&processed)?);
            return Ok(());
        }

        if processed.is_empty() {
            println!("No ops match \"{}\".", term.trim());
            return Ok(());
        }

        let mut store = open_store(cfg)?;
        let attendance = store.snapshot();
        for op in &processed {
            header(&op.op.op_title);
            print!("{}", render_op(op, attendance, &SystemClock));
        }
    }
    Ok(())
}
