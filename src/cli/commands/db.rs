use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_ready;
use crate::db::stats;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Db { info: true }) {
        let pool = open_ready(&cfg.database)?;
        stats::print_db_info(&pool, &cfg.database)?;
    }

    Ok(())
}
