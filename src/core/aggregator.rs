//! Work-day aggregation.
//!
//! Groups the activity streams into [`WorkDay`] buckets and computes the
//! financial rollups. Everything is recomputed from the inputs on each call;
//! nothing is carried over between calls.

use crate::models::activity::{ActivityRecord, MalformedRecord, Stream};
use crate::models::expense::Expense;
use crate::models::inventory::Inventory;
use crate::models::order_session::{LineItem, OrderLine, OrderRollup, OrderSession};
use crate::models::table_session::TableSession;
use crate::models::tournament::Tournament;
use crate::models::work_day::WorkDay;
use crate::utils::date::{DEFAULT_WORK_DAY_START_HOUR, is_late_night, work_day_of};
use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    pub order: SortOrder,
    pub work_day_start_hour: u32,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            order: SortOrder::Desc,
            work_day_start_hour: DEFAULT_WORK_DAY_START_HOUR,
        }
    }
}

/// Already-fetched inputs of one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct ActivitySnapshot {
    pub table_sessions: Vec<TableSession>,
    pub order_sessions: Vec<OrderSession>,
    pub line_items: Vec<LineItem>,
    pub tournaments: Vec<Tournament>,
    pub expenses: Vec<Expense>,
    pub inventory: Inventory,
    /// Rows rejected while reading the store.
    pub malformed: Vec<MalformedRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub days: Vec<WorkDay>,
    pub warnings: Vec<MalformedRecord>,
}

impl Aggregation {
    pub fn total_revenue(&self) -> f64 {
        self.days.iter().map(|d| d.total_revenue).sum()
    }

    pub fn total_profit(&self) -> f64 {
        self.days.iter().map(|d| d.total_profit).sum()
    }
}

/// Per-order totals built from its line items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderTotals {
    pub total_revenue: f64,
    pub total_profit: f64,
    pub lines: Vec<OrderLine>,
}

pub struct WorkDayAggregator;

impl WorkDayAggregator {
    /// Unit cost: the line's own cost, else the inventory's, else 0.
    pub fn unit_cost(item: &LineItem, inventory: &Inventory) -> f64 {
        item.unit_cost_price
            .or_else(|| inventory.get(item.product_id).map(|p| p.cost_price))
            .unwrap_or(0.0)
    }

    /// Display label; falls back to the product id when the inventory has no entry.
    pub fn line_label(item: &LineItem, inventory: &Inventory) -> String {
        inventory
            .get(item.product_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Product #{}", item.product_id))
    }

    /// Side table `order session id → totals`.
    pub fn order_totals(line_items: &[LineItem], inventory: &Inventory) -> HashMap<i64, OrderTotals> {
        let mut totals: HashMap<i64, OrderTotals> = HashMap::new();

        for item in line_items {
            let qty = item.quantity as f64;
            let revenue = item.unit_sell_price * qty;
            let profit = (item.unit_sell_price - Self::unit_cost(item, inventory)) * qty;

            let entry = totals.entry(item.order_session_id).or_default();
            entry.total_revenue += revenue;
            entry.total_profit += profit;
            entry.lines.push(OrderLine {
                label: Self::line_label(item, inventory),
                quantity: item.quantity,
                revenue,
                profit,
            });
        }

        totals
    }

    pub fn aggregate(snapshot: &ActivitySnapshot, options: AggregateOptions) -> Aggregation {
        let start_hour = options.work_day_start_hour;
        let mut warnings = snapshot.malformed.clone();

        // Items pointing at an unknown order would otherwise vanish from every total
        let known_orders: HashSet<i64> = snapshot.order_sessions.iter().map(|o| o.id).collect();
        let (items, orphans): (Vec<LineItem>, Vec<LineItem>) = snapshot
            .line_items
            .iter()
            .cloned()
            .partition(|li| known_orders.contains(&li.order_session_id));

        for li in orphans {
            warnings.push(MalformedRecord::new(
                Stream::OrderItems,
                Some(li.id),
                "order_session_id",
                li.order_session_id.to_string(),
            ));
        }

        let totals = Self::order_totals(&items, &snapshot.inventory);

        let records = snapshot
            .table_sessions
            .iter()
            .cloned()
            .map(ActivityRecord::Table)
            .chain(snapshot.order_sessions.iter().cloned().map(ActivityRecord::Order))
            .chain(snapshot.tournaments.iter().cloned().map(ActivityRecord::Tournament))
            .chain(snapshot.expenses.iter().cloned().map(ActivityRecord::Expense));

        let mut buckets: BTreeMap<NaiveDate, WorkDay> = BTreeMap::new();
        for record in records {
            let date = work_day_of(record.timestamp(), start_hour);
            tracing::trace!(stream = %record.kind(), id = record.id(), work_day = %date, "bucketed");
            let day = buckets.entry(date).or_insert_with(|| WorkDay::new(date));
            Self::fold(day, record, &totals);
        }

        let mut days: Vec<WorkDay> = buckets
            .into_values()
            .map(|mut day| {
                Self::finalize(&mut day, start_hour);
                day
            })
            .collect();

        if options.order == SortOrder::Desc {
            days.reverse();
        }

        Aggregation { days, warnings }
    }

    fn fold(day: &mut WorkDay, record: ActivityRecord, totals: &HashMap<i64, OrderTotals>) {
        match record {
            ActivityRecord::Table(t) => {
                day.revenue_by_category.table += t.revenue;
                day.profit_by_category.table += t.revenue;
                if !t.is_paid {
                    day.unpaid_table_count += 1;
                }
                day.table_sessions.push(t);
            }
            ActivityRecord::Order(o) => {
                let t = totals.get(&o.id).cloned().unwrap_or_default();
                day.revenue_by_category.orders += t.total_revenue;
                day.profit_by_category.orders += t.total_profit;
                if !o.is_closed {
                    day.open_order_count += 1;
                }
                day.order_sessions.push(OrderRollup {
                    session: o,
                    lines: t.lines,
                    total_revenue: t.total_revenue,
                    total_profit: t.total_profit,
                });
            }
            ActivityRecord::Tournament(t) => {
                day.revenue_by_category.tournaments += t.revenue();
                day.profit_by_category.tournaments += t.profit();
                day.tournaments.push(t);
            }
            ActivityRecord::Expense(e) => {
                day.total_expenses += e.amount;
                day.expenses.push(e);
            }
        }
    }

    /// Totals and the midnight flag, once every record is in.
    fn finalize(day: &mut WorkDay, start_hour: u32) {
        day.total_revenue = day.revenue_by_category.sum();
        day.total_profit = day.profit_by_category.sum() - day.total_expenses;

        let late = |ts: NaiveDateTime| is_late_night(ts, start_hour);
        day.spans_midnight = day
            .table_sessions
            .iter()
            .any(|t| t.crosses_midnight() || late(t.start_time))
            || day.order_sessions.iter().any(|o| late(o.session.created_at))
            || day.tournaments.iter().any(|t| late(t.created_at))
            || day.expenses.iter().any(|e| late(e.date));
    }
}
