use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_ready;
use crate::db::log::ttlog_quiet;
use crate::db::store::SqliteRecordStore;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let pool = open_ready(&cfg.database)?;
        let store = SqliteRecordStore::new(&cfg.database);

        let rows = ExportLogic::export(&store, cfg.aggregate_options(None), *format, file, *force)?;

        ttlog_quiet(
            &pool.conn,
            "export",
            file,
            &format!("{} work days exported as {}", rows, format.as_str()),
        );
    }

    Ok(())
}
