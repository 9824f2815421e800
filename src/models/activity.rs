//! Tagged activity records and the stream names the record store exposes.

use super::{
    expense::Expense, order_session::OrderSession, table_session::TableSession,
    tournament::Tournament,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Record streams held by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stream {
    TableSessions,
    OrderSessions,
    OrderItems,
    Tournaments,
    Expenses,
    Inventory,
}

impl Stream {
    /// Stream name ⇔ SQLite table name
    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::TableSessions => "table_sessions",
            Stream::OrderSessions => "order_sessions",
            Stream::OrderItems => "order_items",
            Stream::Tournaments => "tournaments",
            Stream::Expenses => "expenses",
            Stream::Inventory => "inventory",
        }
    }

    /// Accepts the table name or the short CLI alias.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "tables" | "table_sessions" => Some(Stream::TableSessions),
            "order" | "orders" | "order_sessions" => Some(Stream::OrderSessions),
            "item" | "items" | "order_items" => Some(Stream::OrderItems),
            "tournament" | "tournaments" => Some(Stream::Tournaments),
            "expense" | "expenses" => Some(Stream::Expenses),
            "product" | "products" | "inventory" => Some(Stream::Inventory),
            _ => None,
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row that could not be turned into a typed record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedRecord {
    pub stream: Stream,
    pub id: Option<i64>,
    pub field: String,
    pub value: String,
}

impl MalformedRecord {
    pub fn new(stream: Stream, id: Option<i64>, field: &str, value: impl Into<String>) -> Self {
        Self {
            stream,
            id,
            field: field.to_string(),
            value: value.into(),
        }
    }
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(
                f,
                "{} #{}: unparseable {} '{}'",
                self.stream, id, self.field, self.value
            ),
            None => write!(
                f,
                "{}: unparseable {} '{}'",
                self.stream, self.field, self.value
            ),
        }
    }
}

/// Result of one bulk read: the valid records plus the rows that were skipped.
#[derive(Debug, Clone)]
pub struct Batch<T> {
    pub records: Vec<T>,
    pub malformed: Vec<MalformedRecord>,
}

impl<T> Default for Batch<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            malformed: Vec::new(),
        }
    }
}

impl<T> Batch<T> {
    pub fn of(records: Vec<T>) -> Self {
        Self {
            records,
            malformed: Vec::new(),
        }
    }
}

impl<T> FromIterator<Result<T, MalformedRecord>> for Batch<T> {
    fn from_iter<I: IntoIterator<Item = Result<T, MalformedRecord>>>(iter: I) -> Self {
        let mut batch = Batch::default();
        for r in iter {
            match r {
                Ok(rec) => batch.records.push(rec),
                Err(bad) => batch.malformed.push(bad),
            }
        }
        batch
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityRecord {
    Table(TableSession),
    Order(OrderSession),
    Tournament(Tournament),
    Expense(Expense),
}

impl ActivityRecord {
    pub fn kind(&self) -> Stream {
        match self {
            ActivityRecord::Table(_) => Stream::TableSessions,
            ActivityRecord::Order(_) => Stream::OrderSessions,
            ActivityRecord::Tournament(_) => Stream::Tournaments,
            ActivityRecord::Expense(_) => Stream::Expenses,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            ActivityRecord::Table(t) => t.id,
            ActivityRecord::Order(o) => o.id,
            ActivityRecord::Tournament(t) => t.id,
            ActivityRecord::Expense(e) => e.id,
        }
    }

    /// The instant that decides which work day the record belongs to.
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            ActivityRecord::Table(t) => t.start_time,
            ActivityRecord::Order(o) => o.created_at,
            ActivityRecord::Tournament(t) => t.created_at,
            ActivityRecord::Expense(e) => e.date,
        }
    }
}
