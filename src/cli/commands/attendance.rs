use std::path::Path;

use chrono::Local;

use crate::cli::commands::{load_ops_from, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{build_rows, export_attendance};
use crate::ui::render::render_attendance;

/// Handle the `attendance` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Attendance {
        json,
        export,
        format,
        force,
    } = cmd
    {
        let mut store = open_store(cfg)?;
        let attendance = store.snapshot().clone();

        if let Some(file) = export {
            // Names are a nicety; export works without a snapshot.
            let ops = load_ops_from(cfg, &None).unwrap_or_default();
            let rows = build_rows(&attendance, &ops, Local::now());
            return export_attendance(&rows, *format, Path::new(file), *force);
        }

        if *json {
            println!("{}", serde_json::to_string_pretty(&attendance)?);
        } else {
            print!("{}", render_attendance(&attendance, Local::now()));
        }
    }
    Ok(())
}
