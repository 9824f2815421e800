use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// The operator's work session (shift). Only the most recent one is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    pub active: bool,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub initial_cash: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    Active,
    Completed,
}

impl Session {
    pub fn state(&self) -> SessionState {
        if self.active {
            SessionState::Active
        } else if self.start_time.is_some() {
            SessionState::Completed
        } else {
            SessionState::Idle
        }
    }
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Active => "active",
            SessionState::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionDuration {
    pub hours: i64,
    pub minutes: i64,
}

impl SessionDuration {
    pub fn from_minutes(total: i64) -> Self {
        let total = total.max(0);
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> i64 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for SessionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}h {:02}m", self.hours, self.minutes)
    }
}
