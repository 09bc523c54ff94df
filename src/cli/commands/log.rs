use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::recent;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::{Column, Table};

/// Handle the `log` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { limit } = cmd {
        let pool = DbPool::new(&cfg.database_path().to_string_lossy())?;
        init_db(&pool.conn)?;

        let rows = recent(&pool.conn, *limit)?;
        if rows.is_empty() {
            println!("Log is empty.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 2),
            Column::new("Date", 4),
            Column::new("Operation", 9),
            Column::new("Target", 6),
            Column::new("Message", 0),
        ]);
        for r in rows {
            table.add_row(vec![r.id.to_string(), r.date, r.operation, r.target, r.message]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
