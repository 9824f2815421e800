//! Ports the core depends on: the record store and the durable key/value store.

use crate::errors::{AppError, AppResult};
use crate::models::activity::{Batch, Stream};
use crate::models::expense::Expense;
use crate::models::inventory::InventoryItem;
use crate::models::order_session::{LineItem, OrderSession};
use crate::models::table_session::TableSession;
use crate::models::tournament::Tournament;
use std::collections::HashMap;

/// Field change applied by a point mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPatch {
    Paid(bool),
    Closed(bool),
}

/// Bulk reads (ordered by each stream's timestamp field) and point mutations.
///
/// `Sync` so the fetch pipeline can read every stream in parallel.
pub trait RecordStore: Sync {
    fn table_sessions(&self) -> AppResult<Batch<TableSession>>;
    fn order_sessions(&self) -> AppResult<Batch<OrderSession>>;
    fn line_items(&self) -> AppResult<Batch<LineItem>>;
    fn tournaments(&self) -> AppResult<Batch<Tournament>>;
    fn expenses(&self) -> AppResult<Batch<Expense>>;
    fn inventory(&self) -> AppResult<Batch<InventoryItem>>;

    /// Point read of one table session's paid flag.
    fn table_paid(&self, id: i64) -> AppResult<bool>;

    fn update(&self, stream: Stream, id: i64, patch: RecordPatch) -> AppResult<()>;
    fn delete(&self, stream: Stream, id: i64) -> AppResult<()>;
}

/// String key/value persistence. An absent key means "unset".
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Apply all changes at once; `None` removes the key.
    fn apply(&mut self, changes: &[(&str, Option<String>)]) -> AppResult<()>;
}

/// In-process key/value store, used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
    reject_writes: bool,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail.
    pub fn read_only() -> Self {
        Self {
            values: HashMap::new(),
            reject_writes: true,
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemorySettings {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn apply(&mut self, changes: &[(&str, Option<String>)]) -> AppResult<()> {
        if self.reject_writes {
            return Err(AppError::Other("settings store is read-only".into()));
        }
        for (key, value) in changes {
            match value {
                Some(v) => {
                    self.values.insert((*key).to_string(), v.clone());
                }
                None => {
                    self.values.remove(*key);
                }
            }
        }
        Ok(())
    }
}
