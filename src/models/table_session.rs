use chrono::NaiveDateTime;
use serde::Serialize;

/// A billiards table rental. Revenue has no cost basis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSession {
    pub id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub revenue: f64,
    pub is_paid: bool,
    pub table_label: String,
}

impl TableSession {
    /// Minutes played; an open session counts as zero.
    pub fn duration_minutes(&self) -> i64 {
        match self.end_time {
            Some(end) if end > self.start_time => (end - self.start_time).num_minutes(),
            _ => 0,
        }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end_time
            .map(|end| end.date() != self.start_time.date())
            .unwrap_or(false)
    }
}
