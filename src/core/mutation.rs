//! Point mutations. Each returns an [`Invalidation`]: the aggregated view is
//! stale and the caller decides when to run the pass again.

use crate::core::store::{RecordPatch, RecordStore};
use crate::errors::AppResult;
use crate::models::activity::Stream;

#[must_use = "the work-day view is stale after a mutation"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidation {
    pub stream: Stream,
    pub id: i64,
}

pub struct MutationLogic;

impl MutationLogic {
    /// Flip the paid flag of a table session; returns the new value.
    pub fn toggle_paid<S: RecordStore + ?Sized>(
        store: &S,
        id: i64,
    ) -> AppResult<(bool, Invalidation)> {
        let paid = !store.table_paid(id)?;
        store.update(Stream::TableSessions, id, RecordPatch::Paid(paid))?;

        Ok((
            paid,
            Invalidation {
                stream: Stream::TableSessions,
                id,
            },
        ))
    }

    pub fn set_order_closed<S: RecordStore + ?Sized>(
        store: &S,
        id: i64,
        closed: bool,
    ) -> AppResult<Invalidation> {
        store.update(Stream::OrderSessions, id, RecordPatch::Closed(closed))?;
        Ok(Invalidation {
            stream: Stream::OrderSessions,
            id,
        })
    }

    pub fn delete_record<S: RecordStore + ?Sized>(
        store: &S,
        stream: Stream,
        id: i64,
    ) -> AppResult<Invalidation> {
        store.delete(stream, id)?;
        Ok(Invalidation { stream, id })
    }
}
