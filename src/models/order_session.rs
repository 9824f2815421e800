use chrono::NaiveDateTime;
use serde::Serialize;

/// A customer tab for food and drinks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSession {
    pub id: i64,
    pub created_at: NaiveDateTime,
    pub is_closed: bool,
    pub customer_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub id: i64,
    pub order_session_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_sell_price: f64,
    /// `None` means "take it from the inventory".
    pub unit_cost_price: Option<f64>,
}

/// One priced line as shown under an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub label: String,
    pub quantity: i64,
    pub revenue: f64,
    pub profit: f64,
}

/// An order session together with its computed totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRollup {
    pub session: OrderSession,
    pub lines: Vec<OrderLine>,
    pub total_revenue: f64,
    pub total_profit: f64,
}
