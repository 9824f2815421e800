// src/export/model.rs

use crate::models::work_day::WorkDay;
use serde::Serialize;

/// One flat row per work day.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct WorkDayExport {
    pub work_day: String,
    pub table_sessions: usize,
    pub order_sessions: usize,
    pub tournaments: usize,
    pub expenses: usize,
    pub revenue_table: f64,
    pub revenue_orders: f64,
    pub revenue_tournaments: f64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_profit: f64,
    pub unpaid_tables: usize,
    pub open_orders: usize,
    pub spans_midnight: bool,
}

fn cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl From<&WorkDay> for WorkDayExport {
    fn from(d: &WorkDay) -> Self {
        Self {
            work_day: d.date_key.clone(),
            table_sessions: d.table_sessions.len(),
            order_sessions: d.order_sessions.len(),
            tournaments: d.tournaments.len(),
            expenses: d.expenses.len(),
            revenue_table: cents(d.revenue_by_category.table),
            revenue_orders: cents(d.revenue_by_category.orders),
            revenue_tournaments: cents(d.revenue_by_category.tournaments),
            total_revenue: cents(d.total_revenue),
            total_expenses: cents(d.total_expenses),
            total_profit: cents(d.total_profit),
            unpaid_tables: d.unpaid_table_count,
            open_orders: d.open_order_count,
            spans_midnight: d.spans_midnight,
        }
    }
}
