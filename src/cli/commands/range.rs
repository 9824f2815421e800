use crate::cli::commands::session::open_lifecycle;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::load_work_days;
use crate::core::range::DateRangeResolver;
use crate::db::store::SqliteRecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::date_filter::{DateRange, DateRangeFilter};
use crate::ui::messages::{header, success};
use crate::utils::colors::{CYAN, RESET};
use crate::utils::date::{format_datetime, parse_date};
use crate::utils::money;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Range {
        preset,
        from,
        to,
        day,
        save,
    } = cmd
    {
        let mut lc = open_lifecycle(cfg)?;
        let store = SqliteRecordStore::new(&cfg.database);

        if let Some(raw) = day {
            let d = parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?;
            let range = DateRangeResolver::resolve_day_with_activity(&store, d)?;
            header(format!("Activity window for {}", d));
            print_range(&range);
            return Ok(());
        }

        let preset = match preset {
            Some(p) => *p,
            None => DateRangeResolver::restore_preset(lc.store(), lc.session())?,
        };

        let filter = DateRangeFilter {
            preset,
            anchor_start: from.clone(),
            anchor_end: to.clone(),
        };
        let range = DateRangeResolver::resolve_now(&filter, lc.session());

        header(format!("Date filter: {}", preset.as_str()));
        print_range(&range);
        print_range_totals(&store, &range, cfg)?;

        if *save {
            DateRangeResolver::save_preset(lc.store_mut(), preset)?;
            success(format!("Date filter set to '{}'", preset.as_str()));
        }
    }

    Ok(())
}

fn print_range(range: &DateRange) {
    println!("{}From :{} {}", CYAN, RESET, format_datetime(&range.start));
    println!("{}To   :{} {}", CYAN, RESET, format_datetime(&range.end));
}

/// Revenue and profit of the work days whose date falls inside the range.
fn print_range_totals(store: &SqliteRecordStore, range: &DateRange, cfg: &Config) -> AppResult<()> {
    let aggregation = load_work_days(store, cfg.aggregate_options(None))?;
    let (first, last) = (range.start.date(), range.end.date());

    let days: Vec<_> = aggregation
        .days
        .iter()
        .filter(|d| d.calendar_date >= first && d.calendar_date <= last)
        .collect();

    println!(
        "{}Days :{} {}  revenue {}  profit {}",
        CYAN,
        RESET,
        days.len(),
        money(days.iter().map(|d| d.total_revenue).sum::<f64>(), &cfg.currency),
        money(days.iter().map(|d| d.total_profit).sum::<f64>(), &cfg.currency)
    );
    Ok(())
}
