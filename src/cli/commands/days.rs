use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregator::Aggregation;
use crate::core::pipeline::load_work_days;
use crate::db::initialize::open_ready;
use crate::db::store::SqliteRecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::work_day::WorkDay;
use crate::ui::messages::{header, info, skipped_records};
use crate::utils::colors::{GREY, MAGENTA, RESET, YELLOW, color_for_pending, colorize_amount};
use crate::utils::date::format_datetime;
use crate::utils::formatting::{bold, mins2readable};
use crate::utils::{money, signed_money};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Days { order, details } = cmd {
        open_ready(&cfg.database)?;
        let store = SqliteRecordStore::new(&cfg.database);

        let aggregation = match load_work_days(&store, cfg.aggregate_options(*order)) {
            Ok(a) => a,
            Err(e @ AppError::UpstreamRead { .. }) => {
                info("Work days could not be loaded. Run the command again to retry.");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        if aggregation.days.is_empty() {
            info("No activity recorded yet.");
            skipped_records(&aggregation.warnings);
            return Ok(());
        }

        print_days(&aggregation, cfg);

        if *details {
            for day in &aggregation.days {
                print_day_details(day, cfg);
            }
        }

        skipped_records(&aggregation.warnings);
    }

    Ok(())
}

fn print_days(aggregation: &Aggregation, cfg: &Config) {
    header("Work days");

    let cur = cfg.currency.as_str();
    let mut table = Table::new(vec![
        Column::new("Work day", 12),
        Column::new("Tables", 12),
        Column::new("Orders", 12),
        Column::new("Tourn.", 12),
        Column::new("Expenses", 12),
        Column::new("Revenue", 12),
        Column::new("Profit", 12),
        Column::new("Unpaid", 6),
        Column::new("Open", 4),
    ]);

    for d in &aggregation.days {
        let key = if d.spans_midnight {
            format!("{}{}*{}", d.date_key, MAGENTA, RESET)
        } else {
            d.date_key.clone()
        };

        table.add_row(vec![
            key,
            money(d.revenue_by_category.table, cur),
            money(d.revenue_by_category.orders, cur),
            money(d.revenue_by_category.tournaments, cur),
            money(d.total_expenses, cur),
            bold(&money(d.total_revenue, cur)),
            colorize_amount(&signed_money(d.total_profit, cur), d.total_profit),
            format!(
                "{}{}{}",
                color_for_pending(d.unpaid_table_count),
                d.unpaid_table_count,
                RESET
            ),
            format!(
                "{}{}{}",
                color_for_pending(d.open_order_count),
                d.open_order_count,
                RESET
            ),
        ]);
    }

    print!("{}", table.render());
    println!(
        "\nTotal: revenue {}, profit {}",
        bold(&money(aggregation.total_revenue(), cur)),
        colorize_amount(
            &money(aggregation.total_profit(), cur),
            aggregation.total_profit()
        )
    );

    if aggregation.days.iter().any(|d| d.spans_midnight) {
        println!("{}* activity after midnight counted on the previous day{}", GREY, RESET);
    }
}

fn print_day_details(day: &WorkDay, cfg: &Config) {
    let cur = cfg.currency.as_str();
    println!();
    header(format!("{} ({} records)", day.date_key, day.record_count()));

    for t in &day.table_sessions {
        let end = t
            .end_time
            .map(|e| format_datetime(&e))
            .unwrap_or_else(|| format!("{}running{}", YELLOW, RESET));
        println!(
            "  🎱 #{:<4} {:<12} {} → {} ({}) {} {}",
            t.id,
            t.table_label,
            format_datetime(&t.start_time),
            end,
            mins2readable(t.duration_minutes()),
            money(t.revenue, cur),
            if t.is_paid { "paid" } else { "UNPAID" }
        );
    }

    for o in &day.order_sessions {
        println!(
            "  🧾 #{:<4} {:<12} {} {} (profit {}){}",
            o.session.id,
            o.session.customer_label,
            format_datetime(&o.session.created_at),
            money(o.total_revenue, cur),
            money(o.total_profit, cur),
            if o.session.is_closed { "" } else { " open" }
        );
        for line in &o.lines {
            println!(
                "       {}{} x {} {}{}",
                GREY,
                line.quantity,
                line.label,
                money(line.revenue, cur),
                RESET
            );
        }
    }

    for t in &day.tournaments {
        println!(
            "  🏆 #{:<4} {:<12} {} {}/{} paid, prizes {}, profit {}",
            t.id,
            t.name,
            format_datetime(&t.created_at),
            t.paid_participants(),
            t.participants.len(),
            money(t.prize_total(), cur),
            money(t.profit(), cur)
        );
    }

    for e in &day.expenses {
        println!(
            "  💸 #{:<4} {:<12} {} {} {}",
            e.id,
            e.category,
            format_datetime(&e.date),
            money(e.amount, cur),
            e.description
        );
    }
}
