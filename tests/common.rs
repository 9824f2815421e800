#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use rvenue::db::initialize::open_ready;
use rvenue::db::queries;
use rvenue::models::expense::Expense;
use rvenue::models::order_session::{LineItem, OrderSession};
use rvenue::models::table_session::TableSession;
use rvenue::utils::date::parse_datetime;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rv() -> Command {
    cargo_bin_cmd!("rvenue")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rvenue.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn at(s: &str) -> NaiveDateTime {
    parse_datetime(s).expect("valid datetime")
}

/// `init` through the binary, in test mode.
pub fn init(db_path: &str) {
    rv().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn table(id: i64, start: &str, end: Option<&str>, revenue: f64, paid: bool) -> TableSession {
    TableSession {
        id,
        start_time: at(start),
        end_time: end.map(at),
        revenue,
        is_paid: paid,
        table_label: format!("T{}", id),
    }
}

pub fn order(id: i64, created: &str, closed: bool) -> OrderSession {
    OrderSession {
        id,
        created_at: at(created),
        is_closed: closed,
        customer_label: format!("Tab {}", id),
    }
}

pub fn item(id: i64, order: i64, product: i64, qty: i64, sell: f64, cost: Option<f64>) -> LineItem {
    LineItem {
        id,
        order_session_id: order,
        product_id: product,
        quantity: qty,
        unit_sell_price: sell,
        unit_cost_price: cost,
    }
}

pub fn expense(id: i64, date: &str, amount: f64) -> Expense {
    Expense {
        id,
        date: at(date),
        amount,
        description: "supplies".into(),
        category: "bar".into(),
    }
}

/// Seed one evening directly via the library DB API:
/// a paid table crossing midnight, an open unpaid table, one order with two lines, one expense.
pub fn seed_evening(db_path: &str) {
    let pool = open_ready(db_path).expect("open db");
    let conn = &pool.conn;

    queries::insert_table_session(conn, &table(0, "2024-01-10 23:00", Some("2024-01-11 01:00"), 12.0, true))
        .expect("table");
    queries::insert_table_session(conn, &table(0, "2024-01-10 20:00", None, 8.0, false))
        .expect("table");

    let order_id = queries::insert_order_session(conn, &order(0, "2024-01-10 21:00", false)).expect("order");
    queries::insert_line_item(conn, &item(0, order_id, 1, 2, 10.0, Some(6.0))).expect("item");
    queries::insert_line_item(conn, &item(0, order_id, 2, 1, 5.0, Some(5.0))).expect("item");

    queries::insert_expense(conn, &expense(0, "2024-01-10 18:00", 3.0)).expect("expense");
}
