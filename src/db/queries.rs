//! Row mapping between SQLite and the typed activity records.
//!
//! Rows are validated here: a timestamp or amount that cannot be parsed turns
//! the row into a [`MalformedRecord`] instead of a silently-zeroed record.

use crate::errors::{AppError, AppResult};
use crate::models::activity::{Batch, MalformedRecord, Stream};
use crate::models::expense::Expense;
use crate::models::inventory::InventoryItem;
use crate::models::order_session::{LineItem, OrderSession};
use crate::models::table_session::TableSession;
use crate::models::tournament::{Participant, Prize, Tournament};
use crate::utils::date::{format_datetime, parse_datetime};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashMap;

type Mapped<T> = Result<T, MalformedRecord>;

fn timestamp(stream: Stream, id: i64, field: &str, raw: &str) -> Mapped<NaiveDateTime> {
    parse_datetime(raw).ok_or_else(|| MalformedRecord::new(stream, Some(id), field, raw))
}

fn optional_timestamp(
    stream: Stream,
    id: i64,
    field: &str,
    raw: Option<String>,
) -> Mapped<Option<NaiveDateTime>> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => timestamp(stream, id, field, &s).map(Some),
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(_) => "<blob>".to_string(),
    }
}

/// Numeric column that may hold text (SQLite keeps non-numeric text as-is).
fn optional_amount(stream: Stream, id: i64, field: &str, v: Value) -> Mapped<Option<f64>> {
    let parsed = match &v {
        Value::Null => return Ok(None),
        Value::Integer(i) => Some(*i as f64),
        Value::Real(f) => Some(*f),
        Value::Text(s) => s.trim().parse::<f64>().ok(),
        Value::Blob(_) => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(MalformedRecord::new(stream, Some(id), field, value_text(&v))),
    }
}

fn amount(stream: Stream, id: i64, field: &str, v: Value) -> Mapped<f64> {
    optional_amount(stream, id, field, v)?
        .ok_or_else(|| MalformedRecord::new(stream, Some(id), field, "NULL"))
}

fn quantity(stream: Stream, id: i64, field: &str, v: Value) -> Mapped<i64> {
    match &v {
        Value::Integer(i) => Ok(*i),
        Value::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| MalformedRecord::new(stream, Some(id), field, s.clone())),
        _ => Err(MalformedRecord::new(stream, Some(id), field, value_text(&v))),
    }
}

/// 0/1 flag column; anything else is a malformed value.
fn flag(stream: Stream, id: i64, field: &str, v: Value) -> Mapped<bool> {
    let parsed = match &v {
        Value::Integer(i) => Some(*i),
        Value::Text(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match parsed {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(MalformedRecord::new(stream, Some(id), field, value_text(&v))),
    }
}

fn map_table_session(row: &Row) -> rusqlite::Result<Mapped<TableSession>> {
    let s = Stream::TableSessions;
    let id: i64 = row.get("id")?;
    let start_raw: String = row.get("start_time")?;
    let end_raw: Option<String> = row.get("end_time")?;
    let revenue_raw: Value = row.get("revenue")?;
    let paid_raw: Value = row.get("is_paid")?;
    let table_label: String = row.get("table_label")?;

    Ok((|| -> Mapped<TableSession> {
        Ok(TableSession {
            id,
            start_time: timestamp(s, id, "start_time", &start_raw)?,
            end_time: optional_timestamp(s, id, "end_time", end_raw)?,
            revenue: amount(s, id, "revenue", revenue_raw)?,
            is_paid: flag(s, id, "is_paid", paid_raw)?,
            table_label,
        })
    })())
}

fn map_order_session(row: &Row) -> rusqlite::Result<Mapped<OrderSession>> {
    let id: i64 = row.get("id")?;
    let created_raw: String = row.get("created_at")?;
    let customer_label: String = row.get("customer_label")?;
    let closed_raw: Value = row.get("is_closed")?;

    let s = Stream::OrderSessions;
    Ok((|| -> Mapped<OrderSession> {
        Ok(OrderSession {
            id,
            created_at: timestamp(s, id, "created_at", &created_raw)?,
            is_closed: flag(s, id, "is_closed", closed_raw)?,
            customer_label,
        })
    })())
}

fn map_line_item(row: &Row) -> rusqlite::Result<Mapped<LineItem>> {
    let s = Stream::OrderItems;
    let id: i64 = row.get("id")?;
    let order_session_id: i64 = row.get("order_session_id")?;
    let product_id: i64 = row.get("product_id")?;
    let qty_raw: Value = row.get("quantity")?;
    let sell_raw: Value = row.get("unit_sell_price")?;
    let cost_raw: Value = row.get("unit_cost_price")?;

    Ok((|| -> Mapped<LineItem> {
        Ok(LineItem {
            id,
            order_session_id,
            product_id,
            quantity: quantity(s, id, "quantity", qty_raw)?,
            unit_sell_price: amount(s, id, "unit_sell_price", sell_raw)?,
            unit_cost_price: optional_amount(s, id, "unit_cost_price", cost_raw)?,
        })
    })())
}

fn map_expense(row: &Row) -> rusqlite::Result<Mapped<Expense>> {
    let s = Stream::Expenses;
    let id: i64 = row.get("id")?;
    let date_raw: String = row.get("date")?;
    let amount_raw: Value = row.get("amount")?;
    let description: String = row.get("description")?;
    let category: String = row.get("category")?;

    Ok((|| -> Mapped<Expense> {
        Ok(Expense {
            id,
            date: timestamp(s, id, "date", &date_raw)?,
            amount: amount(s, id, "amount", amount_raw)?,
            description,
            category,
        })
    })())
}

fn collect_batch<T, F>(conn: &Connection, sql: &str, map: F) -> AppResult<Batch<T>>
where
    F: FnMut(&Row) -> rusqlite::Result<Mapped<T>>,
{
    let mut stmt = conn.prepare(sql)?;
    let mapped = stmt
        .query_map([], map)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(mapped
        .into_iter()
        .inspect(|r| {
            if let Err(bad) = r {
                tracing::warn!(record = %bad, "skipping malformed row");
            }
        })
        .collect())
}

pub fn load_table_sessions(conn: &Connection) -> AppResult<Batch<TableSession>> {
    collect_batch(
        conn,
        "SELECT * FROM table_sessions ORDER BY start_time ASC, id ASC",
        map_table_session,
    )
}

pub fn load_order_sessions(conn: &Connection) -> AppResult<Batch<OrderSession>> {
    collect_batch(
        conn,
        "SELECT * FROM order_sessions ORDER BY created_at ASC, id ASC",
        map_order_session,
    )
}

pub fn load_line_items(conn: &Connection) -> AppResult<Batch<LineItem>> {
    collect_batch(
        conn,
        "SELECT * FROM order_items ORDER BY order_session_id ASC, id ASC",
        map_line_item,
    )
}

pub fn load_expenses(conn: &Connection) -> AppResult<Batch<Expense>> {
    collect_batch(
        conn,
        "SELECT * FROM expenses ORDER BY date ASC, id ASC",
        map_expense,
    )
}

/// Tournaments with their participants and prizes attached.
pub fn load_tournaments(conn: &Connection) -> AppResult<Batch<Tournament>> {
    let mut participants: HashMap<i64, Vec<Mapped<Participant>>> = HashMap::new();
    {
        let mut stmt = conn.prepare(
            "SELECT id, tournament_id, name, paid FROM tournament_participants ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let tid: i64 = row.get(1)?;
            let name: String = row.get(2)?;
            let raw: Value = row.get(3)?;
            Ok((
                tid,
                flag(Stream::Tournaments, tid, &format!("participant #{} paid", id), raw)
                    .map(|paid| Participant { name, paid }),
            ))
        })?;
        for r in rows {
            let (tid, p) = r?;
            participants.entry(tid).or_default().push(p);
        }
    }

    let mut prizes: HashMap<i64, Vec<Mapped<Prize>>> = HashMap::new();
    {
        let mut stmt =
            conn.prepare("SELECT id, tournament_id, amount FROM tournament_prizes ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let tid: i64 = row.get(1)?;
            let raw: Value = row.get(2)?;
            Ok((
                tid,
                amount(Stream::Tournaments, tid, "prize amount", raw)
                    .map(|amount| Prize { amount })
                    .map_err(|mut bad| {
                        bad.field = format!("prize #{} amount", id);
                        bad
                    }),
            ))
        })?;
        for r in rows {
            let (tid, p) = r?;
            prizes.entry(tid).or_default().push(p);
        }
    }

    collect_batch(
        conn,
        "SELECT * FROM tournaments ORDER BY created_at ASC, id ASC",
        |row| {
            let s = Stream::Tournaments;
            let id: i64 = row.get("id")?;
            let created_raw: String = row.get("created_at")?;
            let fee_raw: Value = row.get("subscription_fee")?;
            let name: String = row.get("name")?;

            Ok((|| -> Mapped<Tournament> {
                let prize_list = prizes
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .collect::<Result<Vec<_>, _>>()?;
                let participant_list = participants
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Tournament {
                    id,
                    created_at: timestamp(s, id, "created_at", &created_raw)?,
                    name,
                    subscription_fee: amount(s, id, "subscription_fee", fee_raw)?,
                    participants: participant_list,
                    prizes: prize_list,
                })
            })())
        },
    )
}

pub fn load_inventory(conn: &Connection) -> AppResult<Batch<InventoryItem>> {
    collect_batch(
        conn,
        "SELECT id, name, cost_price FROM inventory ORDER BY id ASC",
        |row| {
            let id: i64 = row.get(0)?;
            let name: String = row.get(1)?;
            let raw: Value = row.get(2)?;
            Ok(
                amount(Stream::Inventory, id, "cost_price", raw).map(|cost_price| InventoryItem {
                    product_id: id,
                    name,
                    cost_price,
                }),
            )
        },
    )
}

// ---------------------------------------------------------------------------
// Inserts (used by `add`)
// ---------------------------------------------------------------------------

pub fn insert_table_session(conn: &Connection, t: &TableSession) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO table_sessions (table_label, start_time, end_time, revenue, is_paid)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            t.table_label,
            format_datetime(&t.start_time),
            t.end_time.as_ref().map(format_datetime),
            t.revenue,
            if t.is_paid { 1 } else { 0 },
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_order_session(conn: &Connection, o: &OrderSession) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO order_sessions (customer_label, created_at, is_closed)
         VALUES (?1, ?2, ?3)",
        params![
            o.customer_label,
            format_datetime(&o.created_at),
            if o.is_closed { 1 } else { 0 },
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_line_item(conn: &Connection, li: &LineItem) -> AppResult<i64> {
    if !exists(conn, Stream::OrderSessions, li.order_session_id)? {
        return Err(AppError::RecordNotFound {
            stream: Stream::OrderSessions,
            id: li.order_session_id,
        });
    }

    conn.execute(
        "INSERT INTO order_items (order_session_id, product_id, quantity, unit_sell_price, unit_cost_price)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            li.order_session_id,
            li.product_id,
            li.quantity,
            li.unit_sell_price,
            li.unit_cost_price,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_tournament(conn: &Connection, t: &Tournament) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO tournaments (name, created_at, subscription_fee) VALUES (?1, ?2, ?3)",
        params![t.name, format_datetime(&t.created_at), t.subscription_fee],
    )?;
    let id = conn.last_insert_rowid();

    for p in &t.participants {
        insert_participant(conn, id, p)?;
    }
    for p in &t.prizes {
        insert_prize(conn, id, p)?;
    }
    Ok(id)
}

pub fn insert_participant(conn: &Connection, tournament_id: i64, p: &Participant) -> AppResult<i64> {
    if !exists(conn, Stream::Tournaments, tournament_id)? {
        return Err(AppError::RecordNotFound {
            stream: Stream::Tournaments,
            id: tournament_id,
        });
    }

    conn.execute(
        "INSERT INTO tournament_participants (tournament_id, name, paid) VALUES (?1, ?2, ?3)",
        params![tournament_id, p.name, if p.paid { 1 } else { 0 }],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_prize(conn: &Connection, tournament_id: i64, p: &Prize) -> AppResult<i64> {
    if !exists(conn, Stream::Tournaments, tournament_id)? {
        return Err(AppError::RecordNotFound {
            stream: Stream::Tournaments,
            id: tournament_id,
        });
    }

    conn.execute(
        "INSERT INTO tournament_prizes (tournament_id, amount) VALUES (?1, ?2)",
        params![tournament_id, p.amount],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_expense(conn: &Connection, e: &Expense) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO expenses (date, amount, description, category) VALUES (?1, ?2, ?3, ?4)",
        params![
            format_datetime(&e.date),
            e.amount,
            e.description,
            e.category
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert or replace a product in the inventory.
pub fn upsert_product(conn: &Connection, item: &InventoryItem) -> AppResult<()> {
    conn.execute(
        "INSERT INTO inventory (id, name, cost_price) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET name = excluded.name, cost_price = excluded.cost_price",
        params![item.product_id, item.name, item.cost_price],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Point mutations
// ---------------------------------------------------------------------------

pub fn exists(conn: &Connection, stream: Stream, id: i64) -> AppResult<bool> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?1 LIMIT 1", stream.as_str());
    let mut stmt = conn.prepare(&sql)?;
    Ok(stmt.exists([id])?)
}

/// Paid flag of one table session, `None` when the row does not exist.
pub fn table_paid(conn: &Connection, id: i64) -> AppResult<Option<Mapped<bool>>> {
    let raw: Option<Value> = conn
        .query_row(
            "SELECT is_paid FROM table_sessions WHERE id = ?1",
            [id],
            |row| row.get(0),
        )
        .optional()?;

    Ok(raw.map(|v| flag(Stream::TableSessions, id, "is_paid", v)))
}

pub fn set_table_paid(conn: &Connection, id: i64, paid: bool) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE table_sessions SET is_paid = ?1 WHERE id = ?2",
        params![if paid { 1 } else { 0 }, id],
    )?)
}

pub fn set_order_closed(conn: &Connection, id: i64, closed: bool) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE order_sessions SET is_closed = ?1 WHERE id = ?2",
        params![if closed { 1 } else { 0 }, id],
    )?)
}

/// Delete a record and whatever hangs off it (order items, tournament entries).
pub fn delete_record(conn: &mut Connection, stream: Stream, id: i64) -> AppResult<usize> {
    let tx = conn.transaction()?;

    match stream {
        Stream::OrderSessions => {
            tx.execute("DELETE FROM order_items WHERE order_session_id = ?1", [id])?;
        }
        Stream::Tournaments => {
            tx.execute(
                "DELETE FROM tournament_participants WHERE tournament_id = ?1",
                [id],
            )?;
            tx.execute("DELETE FROM tournament_prizes WHERE tournament_id = ?1", [id])?;
        }
        _ => {}
    }

    let sql = format!("DELETE FROM {} WHERE id = ?1", stream.as_str());
    let n = tx.execute(&sql, [id])?;
    tx.commit()?;
    Ok(n)
}

pub fn count_rows(conn: &Connection, stream: Stream) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", stream.as_str());
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}
