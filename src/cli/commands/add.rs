use crate::cli::commands::{checked_amount, instant_or_now};
use crate::cli::parser::{AddTarget, Commands};
use crate::config::Config;
use crate::db::initialize::open_ready;
use crate::db::log::ttlog_quiet;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::activity::Stream;
use crate::models::expense::Expense;
use crate::models::inventory::InventoryItem;
use crate::models::order_session::{LineItem, OrderSession};
use crate::models::table_session::TableSession;
use crate::models::tournament::{Participant, Prize, Tournament};
use crate::ui::messages::success;
use crate::utils::date::parse_datetime;
use crate::utils::money;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Add { target } = cmd else {
        return Ok(());
    };

    let pool = open_ready(&cfg.database)?;
    let conn = &pool.conn;
    let cur = cfg.currency.as_str();

    let (stream, id, summary) = match target {
        AddTarget::Table {
            label,
            start,
            end,
            revenue,
            paid,
        } => {
            let start_time = instant_or_now(start.as_deref())?;
            let end_time = match end {
                Some(s) => Some(parse_datetime(s).ok_or_else(|| AppError::InvalidDateTime(s.clone()))?),
                None => None,
            };
            if end_time.is_some_and(|e| e < start_time) {
                return Err(AppError::InvalidDateTime(format!(
                    "end {} is before start",
                    end.as_deref().unwrap_or_default()
                )));
            }

            let t = TableSession {
                id: 0,
                start_time,
                end_time,
                revenue: checked_amount(*revenue, "revenue")?,
                is_paid: *paid,
                table_label: label.clone(),
            };
            let id = queries::insert_table_session(conn, &t)?;
            (
                Stream::TableSessions,
                id,
                format!("table '{}' {}", label, money(t.revenue, cur)),
            )
        }

        AddTarget::Order {
            customer,
            at,
            closed,
        } => {
            let o = OrderSession {
                id: 0,
                created_at: instant_or_now(at.as_deref())?,
                is_closed: *closed,
                customer_label: customer.clone(),
            };
            let id = queries::insert_order_session(conn, &o)?;
            (Stream::OrderSessions, id, format!("order for '{}'", customer))
        }

        AddTarget::Item {
            order,
            product,
            qty,
            sell,
            cost,
        } => {
            if *qty <= 0 {
                return Err(AppError::InvalidAmount(format!("qty = {}", qty)));
            }
            let li = LineItem {
                id: 0,
                order_session_id: *order,
                product_id: *product,
                quantity: *qty,
                unit_sell_price: checked_amount(*sell, "sell")?,
                unit_cost_price: cost.map(|c| checked_amount(c, "cost")).transpose()?,
            };
            let id = queries::insert_line_item(conn, &li)?;
            (
                Stream::OrderItems,
                id,
                format!("{} x product #{} on order #{}", qty, product, order),
            )
        }

        AddTarget::Tournament { name, at, fee } => {
            let t = Tournament {
                id: 0,
                created_at: instant_or_now(at.as_deref())?,
                name: name.clone(),
                subscription_fee: checked_amount(*fee, "fee")?,
                participants: Vec::new(),
                prizes: Vec::new(),
            };
            let id = queries::insert_tournament(conn, &t)?;
            (
                Stream::Tournaments,
                id,
                format!("tournament '{}' (fee {})", name, money(t.subscription_fee, cur)),
            )
        }

        AddTarget::Participant {
            tournament,
            name,
            paid,
        } => {
            let p = Participant {
                name: name.clone(),
                paid: *paid,
            };
            queries::insert_participant(conn, *tournament, &p)?;
            (
                Stream::Tournaments,
                *tournament,
                format!("participant '{}' in tournament #{}", name, tournament),
            )
        }

        AddTarget::Prize { tournament, amount } => {
            let p = Prize {
                amount: checked_amount(*amount, "amount")?,
            };
            queries::insert_prize(conn, *tournament, &p)?;
            (
                Stream::Tournaments,
                *tournament,
                format!("prize {} in tournament #{}", money(p.amount, cur), tournament),
            )
        }

        AddTarget::Expense {
            at,
            amount,
            description,
            category,
        } => {
            let e = Expense {
                id: 0,
                date: instant_or_now(at.as_deref())?,
                amount: checked_amount(*amount, "amount")?,
                description: description.clone(),
                category: category.clone(),
            };
            let id = queries::insert_expense(conn, &e)?;
            (
                Stream::Expenses,
                id,
                format!("expense {} ({})", money(e.amount, cur), category),
            )
        }

        AddTarget::Product { id, name, cost } => {
            let item = InventoryItem {
                product_id: *id,
                name: name.clone(),
                cost_price: checked_amount(*cost, "cost")?,
            };
            queries::upsert_product(conn, &item)?;
            (
                Stream::Inventory,
                *id,
                format!("product '{}' (cost {})", name, money(item.cost_price, cur)),
            )
        }
    };

    ttlog_quiet(conn, "add", &format!("{}#{}", stream, id), &summary);
    success(format!("Added {} ({} #{})", summary, stream, id));
    Ok(())
}
