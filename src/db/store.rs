//! SQLite-backed record store.

use crate::core::store::{RecordPatch, RecordStore};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::activity::{Batch, Stream};
use crate::models::expense::Expense;
use crate::models::inventory::InventoryItem;
use crate::models::order_session::{LineItem, OrderSession};
use crate::models::table_session::TableSession;
use crate::models::tournament::Tournament;

/// Opens its own connection per call, so concurrent reads never share one.
pub struct SqliteRecordStore {
    path: String,
}

impl SqliteRecordStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    fn open(&self) -> AppResult<DbPool> {
        DbPool::new(&self.path)
    }
}

impl RecordStore for SqliteRecordStore {
    fn table_sessions(&self) -> AppResult<Batch<TableSession>> {
        queries::load_table_sessions(&self.open()?.conn)
    }

    fn order_sessions(&self) -> AppResult<Batch<OrderSession>> {
        queries::load_order_sessions(&self.open()?.conn)
    }

    fn line_items(&self) -> AppResult<Batch<LineItem>> {
        queries::load_line_items(&self.open()?.conn)
    }

    fn tournaments(&self) -> AppResult<Batch<Tournament>> {
        queries::load_tournaments(&self.open()?.conn)
    }

    fn expenses(&self) -> AppResult<Batch<Expense>> {
        queries::load_expenses(&self.open()?.conn)
    }

    fn inventory(&self) -> AppResult<Batch<InventoryItem>> {
        queries::load_inventory(&self.open()?.conn)
    }

    fn table_paid(&self, id: i64) -> AppResult<bool> {
        match queries::table_paid(&self.open()?.conn, id)? {
            Some(Ok(paid)) => Ok(paid),
            Some(Err(bad)) => Err(AppError::InvalidState(bad.to_string())),
            None => Err(AppError::RecordNotFound {
                stream: Stream::TableSessions,
                id,
            }),
        }
    }

    fn update(&self, stream: Stream, id: i64, patch: RecordPatch) -> AppResult<()> {
        let pool = self.open()?;
        let changed = match (stream, patch) {
            (Stream::TableSessions, RecordPatch::Paid(paid)) => {
                queries::set_table_paid(&pool.conn, id, paid)?
            }
            (Stream::OrderSessions, RecordPatch::Closed(closed)) => {
                queries::set_order_closed(&pool.conn, id, closed)?
            }
            (s, p) => {
                return Err(AppError::InvalidState(format!(
                    "patch {:?} does not apply to {}",
                    p, s
                )));
            }
        };

        if changed == 0 {
            return Err(AppError::RecordNotFound { stream, id });
        }
        Ok(())
    }

    fn delete(&self, stream: Stream, id: i64) -> AppResult<()> {
        let mut pool = self.open()?;
        let removed = pool.with_conn(|conn| queries::delete_record(conn, stream, id))?;

        if removed == 0 {
            return Err(AppError::RecordNotFound { stream, id });
        }
        Ok(())
    }
}
