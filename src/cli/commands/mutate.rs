//! `paid`, `close` and `del`: point mutations followed by a fresh aggregation pass.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::mutation::{Invalidation, MutationLogic};
use crate::core::pipeline::load_work_days;
use crate::db::initialize::open_ready;
use crate::db::log::ttlog_quiet;
use crate::db::store::SqliteRecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::activity::Stream;
use crate::ui::messages::{info, success, warning};
use crate::utils::money;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// Re-run the aggregation after a mutation. A failed refresh leaves the
/// mutation in place and only reports the view as stale.
fn refresh(store: &SqliteRecordStore, cfg: &Config, changed: Invalidation) {
    match load_work_days(store, cfg.aggregate_options(None)) {
        Ok(agg) => info(format!(
            "Totals refreshed after {} #{}: revenue {}, profit {} over {} work days",
            changed.stream,
            changed.id,
            money(agg.total_revenue(), &cfg.currency),
            money(agg.total_profit(), &cfg.currency),
            agg.days.len()
        )),
        Err(e) => warning(format!("Work-day totals are stale: {}", e)),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let pool = open_ready(&cfg.database)?;
    let store = SqliteRecordStore::new(&cfg.database);

    let changed = match cmd {
        Commands::Paid { id } => {
            let (paid, changed) = MutationLogic::toggle_paid(&store, *id)?;
            let state = if paid { "paid" } else { "unpaid" };
            ttlog_quiet(
                &pool.conn,
                "toggle_paid",
                &format!("{}#{}", Stream::TableSessions, id),
                &format!("Table session marked {}", state),
            );
            success(format!("Table session #{} marked {}.", id, state));
            changed
        }

        Commands::Close { id, reopen } => {
            let changed = MutationLogic::set_order_closed(&store, *id, !*reopen)?;
            let state = if *reopen { "reopened" } else { "closed" };
            ttlog_quiet(
                &pool.conn,
                "close",
                &format!("{}#{}", Stream::OrderSessions, id),
                &format!("Order session {}", state),
            );
            success(format!("Order session #{} {}.", id, state));
            changed
        }

        Commands::Del { stream, id, yes } => {
            let s = Stream::from_name(stream).ok_or_else(|| AppError::InvalidStream(stream.clone()))?;

            let prompt = format!("Delete {} #{}? This action is irreversible.", s, id);
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let changed = MutationLogic::delete_record(&store, s, *id)?;
            ttlog_quiet(
                &pool.conn,
                "del",
                &format!("{}#{}", s, id),
                "Record deleted",
            );
            success(format!("{} #{} has been deleted.", s, id));
            changed
        }

        _ => return Ok(()),
    };

    refresh(&store, cfg, changed);
    Ok(())
}
