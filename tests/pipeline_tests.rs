mod common;

use common::{item, order, seed_evening, setup_test_db, table};
use rvenue::core::aggregator::AggregateOptions;
use rvenue::core::mutation::MutationLogic;
use rvenue::core::pipeline::{fetch_snapshot, load_work_days};
use rvenue::core::store::{RecordPatch, RecordStore};
use rvenue::db::initialize::open_ready;
use rvenue::db::store::SqliteRecordStore;
use rvenue::errors::{AppError, AppResult};
use rvenue::models::activity::{Batch, Stream};
use rvenue::models::expense::Expense;
use rvenue::models::inventory::InventoryItem;
use rvenue::models::order_session::{LineItem, OrderSession};
use rvenue::models::table_session::TableSession;
use rvenue::models::tournament::Tournament;
use std::sync::Mutex;

/// In-memory store; `failing` makes one stream's read fail.
#[derive(Default)]
struct FakeStore {
    tables: Mutex<Vec<TableSession>>,
    orders: Vec<OrderSession>,
    items: Vec<LineItem>,
    failing: Option<Stream>,
}

impl FakeStore {
    fn check(&self, stream: Stream) -> AppResult<()> {
        if self.failing == Some(stream) {
            return Err(AppError::Other(format!("{} unavailable", stream)));
        }
        Ok(())
    }
}

impl RecordStore for FakeStore {
    fn table_sessions(&self) -> AppResult<Batch<TableSession>> {
        self.check(Stream::TableSessions)?;
        Ok(Batch::of(self.tables.lock().unwrap().clone()))
    }

    fn order_sessions(&self) -> AppResult<Batch<OrderSession>> {
        self.check(Stream::OrderSessions)?;
        Ok(Batch::of(self.orders.clone()))
    }

    fn line_items(&self) -> AppResult<Batch<LineItem>> {
        self.check(Stream::OrderItems)?;
        Ok(Batch::of(self.items.clone()))
    }

    fn tournaments(&self) -> AppResult<Batch<Tournament>> {
        self.check(Stream::Tournaments)?;
        Ok(Batch::default())
    }

    fn expenses(&self) -> AppResult<Batch<Expense>> {
        self.check(Stream::Expenses)?;
        Ok(Batch::default())
    }

    fn inventory(&self) -> AppResult<Batch<InventoryItem>> {
        self.check(Stream::Inventory)?;
        Ok(Batch::default())
    }

    fn table_paid(&self, id: i64) -> AppResult<bool> {
        self.tables
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.is_paid)
            .ok_or(AppError::RecordNotFound {
                stream: Stream::TableSessions,
                id,
            })
    }

    fn update(&self, stream: Stream, id: i64, patch: RecordPatch) -> AppResult<()> {
        let mut tables = self.tables.lock().unwrap();
        match (stream, patch, tables.iter_mut().find(|t| t.id == id)) {
            (Stream::TableSessions, RecordPatch::Paid(paid), Some(t)) => {
                t.is_paid = paid;
                Ok(())
            }
            _ => Err(AppError::RecordNotFound { stream, id }),
        }
    }

    fn delete(&self, stream: Stream, id: i64) -> AppResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.len();
        tables.retain(|t| t.id != id);
        if stream != Stream::TableSessions || tables.len() == before {
            return Err(AppError::RecordNotFound { stream, id });
        }
        Ok(())
    }
}

fn fake() -> FakeStore {
    FakeStore {
        tables: Mutex::new(vec![
            table(1, "2024-01-10 20:00", Some("2024-01-10 22:00"), 10.0, false),
            table(2, "2024-01-11 20:00", Some("2024-01-11 22:00"), 6.0, true),
        ]),
        orders: vec![order(1, "2024-01-10 21:00", true)],
        items: vec![item(1, 1, 1, 2, 4.0, Some(1.0))],
        failing: None,
    }
}

#[test]
fn one_failed_stream_fails_the_whole_pass() {
    let store = FakeStore {
        failing: Some(Stream::OrderSessions),
        ..fake()
    };

    match load_work_days(&store, AggregateOptions::default()) {
        Err(AppError::UpstreamRead { stream, .. }) => assert_eq!(stream, "order_sessions"),
        other => panic!("expected an upstream read error, got {:?}", other.map(|a| a.days.len())),
    }
}

#[test]
fn snapshot_joins_every_stream() {
    let snapshot = fetch_snapshot(&fake()).unwrap();
    assert_eq!(snapshot.table_sessions.len(), 2);
    assert_eq!(snapshot.order_sessions.len(), 1);
    assert_eq!(snapshot.line_items.len(), 1);
    assert!(snapshot.malformed.is_empty());
}

#[test]
fn toggling_paid_is_visible_after_reaggregation() {
    let store = fake();

    let before = load_work_days(&store, AggregateOptions::default()).unwrap();
    let jan10 = before.days.iter().find(|d| d.date_key == "2024-01-10").unwrap();
    assert_eq!(jan10.unpaid_table_count, 1);

    let (paid, changed) = MutationLogic::toggle_paid(&store, 1).unwrap();
    assert!(paid);
    assert_eq!(changed.stream, Stream::TableSessions);
    assert_eq!(changed.id, 1);

    let after = load_work_days(&store, AggregateOptions::default()).unwrap();
    let jan10 = after.days.iter().find(|d| d.date_key == "2024-01-10").unwrap();
    assert_eq!(jan10.unpaid_table_count, 0);
}

#[test]
fn toggling_an_unknown_table_fails() {
    let err = MutationLogic::toggle_paid(&fake(), 42).unwrap_err();
    assert!(matches!(
        err,
        AppError::RecordNotFound {
            stream: Stream::TableSessions,
            id: 42
        }
    ));
}

#[test]
fn deleting_removes_the_record_from_the_next_pass() {
    let store = fake();
    let _ = MutationLogic::delete_record(&store, Stream::TableSessions, 2).unwrap();

    let agg = load_work_days(&store, AggregateOptions::default()).unwrap();
    assert_eq!(agg.days.len(), 1);
    assert_eq!(agg.days[0].date_key, "2024-01-10");
}

#[test]
fn sqlite_store_reports_malformed_rows() {
    let db_path = setup_test_db("pipeline_malformed_rows");
    seed_evening(&db_path);

    let pool = open_ready(&db_path).unwrap();
    pool.conn
        .execute_batch(
            "INSERT INTO expenses (date, amount, description, category) VALUES ('2024-01-10 19:00', 'lots', 'x', 'bar');
             INSERT INTO order_items (order_session_id, product_id, quantity, unit_sell_price) VALUES (99, 1, 1, 2.0);",
        )
        .unwrap();

    let agg = load_work_days(&SqliteRecordStore::new(&db_path), AggregateOptions::default()).unwrap();

    assert_eq!(agg.days.len(), 1);
    let d = &agg.days[0];
    assert_eq!(d.date_key, "2024-01-10");
    assert_eq!(d.total_revenue, 45.0);
    assert_eq!(d.total_expenses, 3.0);
    assert!(d.spans_midnight);
    assert!(agg.warnings.iter().any(|w| w.stream == Stream::Expenses));
}

#[test]
fn sqlite_store_closes_and_deletes() {
    let db_path = setup_test_db("pipeline_close_delete");
    seed_evening(&db_path);
    let store = SqliteRecordStore::new(&db_path);

    let _ = MutationLogic::set_order_closed(&store, 1, true).unwrap();
    let agg = load_work_days(&store, AggregateOptions::default()).unwrap();
    assert_eq!(agg.days[0].open_order_count, 0);

    let _ = MutationLogic::delete_record(&store, Stream::OrderSessions, 1).unwrap();
    let agg = load_work_days(&store, AggregateOptions::default()).unwrap();
    assert_eq!(agg.days[0].revenue_by_category.orders, 0.0);
    assert!(agg.warnings.is_empty());

    assert!(matches!(
        MutationLogic::delete_record(&store, Stream::OrderSessions, 1),
        Err(AppError::RecordNotFound { .. })
    ));
}

#[test]
fn unreadable_paid_flag_skips_only_that_table() {
    let db_path = setup_test_db("pipeline_bad_paid_flag");
    seed_evening(&db_path);

    let pool = open_ready(&db_path).unwrap();
    pool.conn
        .execute(
            "INSERT INTO table_sessions (table_label, start_time, end_time, revenue, is_paid)
             VALUES ('T9', '2024-01-10 21:30', '2024-01-10 22:30', 50.0, 'yes')",
            [],
        )
        .unwrap();

    let agg = load_work_days(&SqliteRecordStore::new(&db_path), AggregateOptions::default()).unwrap();

    assert_eq!(agg.days.len(), 1);
    assert_eq!(agg.days[0].total_revenue, 45.0);
    assert!(agg
        .warnings
        .iter()
        .any(|w| w.stream == Stream::TableSessions && w.field == "is_paid" && w.value == "yes"));
}

#[test]
fn unreadable_participant_flag_skips_the_tournament() {
    let db_path = setup_test_db("pipeline_bad_participant_flag");
    seed_evening(&db_path);

    let pool = open_ready(&db_path).unwrap();
    pool.conn
        .execute_batch(
            "INSERT INTO tournaments (id, name, created_at, subscription_fee) VALUES (7, 'Cup', '2024-01-10 19:00', 10.0);
             INSERT INTO tournament_participants (tournament_id, name, paid) VALUES (7, 'ann', 1);
             INSERT INTO tournament_participants (tournament_id, name, paid) VALUES (7, 'bob', 'maybe');",
        )
        .unwrap();

    let agg = load_work_days(&SqliteRecordStore::new(&db_path), AggregateOptions::default()).unwrap();

    assert_eq!(agg.days.len(), 1);
    assert_eq!(agg.days[0].total_revenue, 45.0);
    assert!(agg
        .warnings
        .iter()
        .any(|w| w.stream == Stream::Tournaments && w.id == Some(7) && w.value == "maybe"));
}

#[test]
fn toggling_paid_reaches_a_row_with_bad_revenue() {
    let db_path = setup_test_db("pipeline_toggle_bad_revenue");
    seed_evening(&db_path);

    let pool = open_ready(&db_path).unwrap();
    pool.conn
        .execute(
            "INSERT INTO table_sessions (id, table_label, start_time, revenue, is_paid)
             VALUES (30, 'T3', '2024-01-10 21:00', 'ten', 0)",
            [],
        )
        .unwrap();

    let store = SqliteRecordStore::new(&db_path);
    let (paid, _) = MutationLogic::toggle_paid(&store, 30).unwrap();
    assert!(paid);
    assert!(store.table_paid(30).unwrap());

    let (paid, _) = MutationLogic::toggle_paid(&store, 30).unwrap();
    assert!(!paid);
}
