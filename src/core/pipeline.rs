//! Fetch-and-aggregate pass.
//!
//! All streams plus the inventory are read concurrently and joined before the
//! aggregator runs. One failed read fails the whole pass: partial grouping
//! would under-report revenue.

use crate::core::aggregator::{ActivitySnapshot, AggregateOptions, Aggregation, WorkDayAggregator};
use crate::core::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::activity::{Batch, MalformedRecord, Stream};
use std::thread::{self, ScopedJoinHandle};
use std::time::Instant;

fn joined<T>(stream: Stream, handle: ScopedJoinHandle<'_, AppResult<Batch<T>>>) -> AppResult<Batch<T>> {
    match handle.join() {
        Ok(Ok(batch)) => Ok(batch),
        Ok(Err(e)) => Err(AppError::upstream(stream.as_str(), e)),
        Err(_) => Err(AppError::upstream(
            stream.as_str(),
            AppError::Other("reader thread panicked".into()),
        )),
    }
}

fn take<T>(batch: Batch<T>, malformed: &mut Vec<MalformedRecord>) -> Vec<T> {
    malformed.extend(batch.malformed);
    batch.records
}

/// Read every stream in parallel and join the results.
pub fn fetch_snapshot<S: RecordStore + ?Sized>(store: &S) -> AppResult<ActivitySnapshot> {
    let started = Instant::now();

    let (tables, orders, items, tournaments, expenses, inventory) = thread::scope(|s| {
        let tables = s.spawn(|| store.table_sessions());
        let orders = s.spawn(|| store.order_sessions());
        let items = s.spawn(|| store.line_items());
        let tournaments = s.spawn(|| store.tournaments());
        let expenses = s.spawn(|| store.expenses());
        let inventory = s.spawn(|| store.inventory());

        (
            joined(Stream::TableSessions, tables),
            joined(Stream::OrderSessions, orders),
            joined(Stream::OrderItems, items),
            joined(Stream::Tournaments, tournaments),
            joined(Stream::Expenses, expenses),
            joined(Stream::Inventory, inventory),
        )
    });

    let mut malformed = Vec::new();
    let snapshot = ActivitySnapshot {
        table_sessions: take(tables?, &mut malformed),
        order_sessions: take(orders?, &mut malformed),
        line_items: take(items?, &mut malformed),
        tournaments: take(tournaments?, &mut malformed),
        expenses: take(expenses?, &mut malformed),
        inventory: take(inventory?, &mut malformed).into_iter().collect(),
        malformed: Vec::new(),
    };

    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        inventory = snapshot.inventory.len(),
        skipped = malformed.len(),
        "snapshot fetched"
    );

    Ok(ActivitySnapshot {
        malformed,
        ..snapshot
    })
}

/// One full aggregation pass. Callers re-run it after every mutation.
pub fn load_work_days<S: RecordStore + ?Sized>(
    store: &S,
    options: AggregateOptions,
) -> AppResult<Aggregation> {
    let snapshot = fetch_snapshot(store)?;
    Ok(WorkDayAggregator::aggregate(&snapshot, options))
}
