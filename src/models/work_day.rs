use super::{
    expense::Expense, order_session::OrderRollup, table_session::TableSession,
    tournament::Tournament,
};
use crate::utils::date::date_key;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub table: f64,
    pub orders: f64,
    pub tournaments: f64,
}

impl CategoryTotals {
    pub fn sum(&self) -> f64 {
        self.table + self.orders + self.tournaments
    }
}

/// Everything that happened during one work day (06:00 → 05:59 next day).
///
/// Derived on every aggregation pass and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkDay {
    pub date_key: String, // YYYY-MM-DD
    pub calendar_date: NaiveDate,
    pub table_sessions: Vec<TableSession>,
    pub order_sessions: Vec<OrderRollup>,
    pub tournaments: Vec<Tournament>,
    pub expenses: Vec<Expense>,
    pub revenue_by_category: CategoryTotals,
    pub profit_by_category: CategoryTotals,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_profit: f64,
    pub unpaid_table_count: usize,
    pub open_order_count: usize,
    pub spans_midnight: bool,
}

impl WorkDay {
    pub fn new(calendar_date: NaiveDate) -> Self {
        Self {
            date_key: date_key(&calendar_date),
            calendar_date,
            table_sessions: Vec::new(),
            order_sessions: Vec::new(),
            tournaments: Vec::new(),
            expenses: Vec::new(),
            revenue_by_category: CategoryTotals::default(),
            profit_by_category: CategoryTotals::default(),
            total_revenue: 0.0,
            total_expenses: 0.0,
            total_profit: 0.0,
            unpaid_table_count: 0,
            open_order_count: 0,
            spans_midnight: false,
        }
    }

    pub fn record_count(&self) -> usize {
        self.table_sessions.len()
            + self.order_sessions.len()
            + self.tournaments.len()
            + self.expenses.len()
    }
}
