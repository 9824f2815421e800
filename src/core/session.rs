//! Work-session lifecycle: `Idle → Active → Completed → Active …`.
//!
//! Exactly one session is tracked. Every transition is written to the
//! key/value store first and applied in memory only once the write succeeded.

use crate::core::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::date_filter::FilterPreset;
use crate::models::session::{Session, SessionDuration, SessionState};
use crate::utils::date::{self, ISO_FORMAT, parse_datetime, to_iso};
use chrono::{NaiveDateTime, SubsecRound};

/// Persisted key names.
pub mod keys {
    pub const ACTIVE: &str = "active";
    pub const START_TIME: &str = "startTime";
    pub const END_TIME: &str = "endTime";
    pub const INITIAL_CASH: &str = "initialCash";
    pub const DATE_FILTER: &str = "dateFilter";
}

fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, ISO_FORMAT)
        .ok()
        .or_else(|| parse_datetime(raw))
}

fn load_instant<K: KeyValueStore>(store: &K, key: &str) -> AppResult<Option<NaiveDateTime>> {
    Ok(store.get(key)?.and_then(|raw| {
        let parsed = parse_instant(&raw);
        if parsed.is_none() {
            tracing::warn!(key, value = %raw, "ignoring unparseable session instant");
        }
        parsed
    }))
}

pub struct SessionLifecycle<K: KeyValueStore> {
    store: K,
    session: Session,
}

impl<K: KeyValueStore> SessionLifecycle<K> {
    /// Restore the persisted session (process startup).
    pub fn load(store: K) -> AppResult<Self> {
        let active = store.get(keys::ACTIVE)?.as_deref() == Some("true");
        let start_time = load_instant(&store, keys::START_TIME)?;
        let end_time = load_instant(&store, keys::END_TIME)?;

        let initial_cash = match store.get(keys::INITIAL_CASH)? {
            Some(raw) => raw.trim().parse::<f64>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "ignoring unparseable initial cash");
                0.0
            }),
            None => 0.0,
        };

        // An active flag without a start instant cannot be resumed
        let active = if active && start_time.is_none() {
            tracing::warn!("persisted session is active but has no start time; treating as idle");
            false
        } else {
            active
        };

        Ok(Self {
            store,
            session: Session {
                active,
                start_time,
                end_time: if active { None } else { end_time },
                initial_cash,
            },
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_active(&self) -> bool {
        self.session.active
    }

    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.session.start_time
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.session.end_time
    }

    pub fn initial_cash(&self) -> f64 {
        self.session.initial_cash
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut K {
        &mut self.store
    }

    pub fn start_session(&mut self, initial_cash: f64) -> AppResult<()> {
        self.start_session_at(initial_cash, date::now())
    }

    /// Open a new session, replacing a completed one. The date filter
    /// switches to `session` so the new shift becomes the current view.
    pub fn start_session_at(&mut self, initial_cash: f64, now: NaiveDateTime) -> AppResult<()> {
        if !initial_cash.is_finite() || initial_cash < 0.0 {
            return Err(AppError::InvalidState(format!(
                "initial cash must be a non-negative amount (got {})",
                initial_cash
            )));
        }
        if self.session.active {
            return Err(AppError::InvalidState(
                "a session is already active; end it before starting a new one".into(),
            ));
        }

        // Kept at the persisted precision so a reload yields the same instant.
        let now = now.trunc_subsecs(3);
        self.store.apply(&[
            (keys::ACTIVE, Some("true".to_string())),
            (keys::START_TIME, Some(to_iso(&now))),
            (keys::END_TIME, None),
            (keys::INITIAL_CASH, Some(initial_cash.to_string())),
            (keys::DATE_FILTER, Some(FilterPreset::Session.as_str().to_string())),
        ])?;

        self.session = Session {
            active: true,
            start_time: Some(now),
            end_time: None,
            initial_cash,
        };
        Ok(())
    }

    pub fn end_session(&mut self) -> AppResult<()> {
        self.end_session_at(date::now())
    }

    /// Close the active session. Start time and initial cash stay for display.
    pub fn end_session_at(&mut self, now: NaiveDateTime) -> AppResult<()> {
        if !self.session.active {
            return Err(AppError::InvalidState(format!(
                "cannot end a session that is {}",
                self.session.state()
            )));
        }

        let now = now.trunc_subsecs(3);
        self.store.apply(&[
            (keys::ACTIVE, Some("false".to_string())),
            (keys::END_TIME, Some(to_iso(&now))),
        ])?;

        self.session.active = false;
        self.session.end_time = Some(now);
        Ok(())
    }

    pub fn current_duration(&self) -> Option<SessionDuration> {
        self.current_duration_at(date::now())
    }

    /// `(end ?? now) − start`; `None` when no session was ever started.
    pub fn current_duration_at(&self, now: NaiveDateTime) -> Option<SessionDuration> {
        let start = self.session.start_time?;
        let end = self.session.end_time.unwrap_or(now);
        Some(SessionDuration::from_minutes((end - start).num_minutes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemorySettings;

    fn at(s: &str) -> NaiveDateTime {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let mut lc = SessionLifecycle::load(MemorySettings::read_only()).unwrap();
        assert!(lc.start_session_at(100.0, at("2024-01-10 18:00")).is_err());
        assert_eq!(lc.state(), SessionState::Idle);
        assert_eq!(lc.start_time(), None);
    }

    #[test]
    fn inconsistent_persisted_state_loads_as_idle() {
        let store = MemorySettings::new().with(keys::ACTIVE, "true");
        let lc = SessionLifecycle::load(store).unwrap();
        assert_eq!(lc.state(), SessionState::Idle);
    }

    #[test]
    fn garbage_values_are_ignored_on_load() {
        let store = MemorySettings::new()
            .with(keys::ACTIVE, "false")
            .with(keys::START_TIME, "2024-01-10T18:00:00.000")
            .with(keys::END_TIME, "not a date")
            .with(keys::INITIAL_CASH, "lots");
        let lc = SessionLifecycle::load(store).unwrap();
        assert_eq!(lc.state(), SessionState::Completed);
        assert_eq!(lc.end_time(), None);
        assert_eq!(lc.initial_cash(), 0.0);
    }
}
