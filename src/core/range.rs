//! Turns a filter preset into a concrete instant interval.

use crate::core::session::keys;
use crate::core::store::{KeyValueStore, RecordStore};
use crate::errors::{AppError, AppResult};
use crate::models::date_filter::{DateRange, DateRangeFilter, FilterPreset};
use crate::models::session::Session;
use crate::utils::date::{self, end_of_day, parse_date, start_of_day};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

pub struct DateRangeResolver;

impl DateRangeResolver {
    /// Midnight to 23:59:59.999 of `d`.
    pub fn day_bounds(d: NaiveDate) -> DateRange {
        DateRange {
            start: start_of_day(d),
            end: end_of_day(d),
        }
    }

    pub fn resolve_now(filter: &DateRangeFilter, session: &Session) -> DateRange {
        Self::resolve(filter, session, date::now())
    }

    /// Rules in priority order:
    /// 1. `session` with a start → `[start, end ?? now]`
    /// 2. `custom` → the single day of `anchor_start` (the end anchor is not used)
    /// 3. `week` → the last 7 days up to now
    /// 4. `month` → the last 30 days up to now
    /// 5. anything else → today
    pub fn resolve(filter: &DateRangeFilter, session: &Session, now: NaiveDateTime) -> DateRange {
        match (filter.preset, session.start_time) {
            (FilterPreset::Session, Some(start)) => DateRange {
                start,
                end: session.end_time.unwrap_or(now),
            },
            (FilterPreset::Custom, _) => {
                let day = filter
                    .anchor_start
                    .as_deref()
                    .and_then(parse_date)
                    .unwrap_or_else(|| now.date());
                Self::day_bounds(day)
            }
            (FilterPreset::Week, _) => DateRange {
                start: now - TimeDelta::days(6),
                end: now,
            },
            (FilterPreset::Month, _) => DateRange {
                start: now - TimeDelta::days(29),
                end: now,
            },
            _ => Self::day_bounds(now.date()),
        }
    }

    /// Bounds of a past day widened to the activity actually recorded on it.
    ///
    /// Table and order sessions starting inside the calendar day stretch the
    /// interval from the earliest start to the latest end; records with no end
    /// count as `start + 24h`. Without any activity the plain day is returned.
    pub fn resolve_day_with_activity<S: RecordStore + ?Sized>(
        store: &S,
        day: NaiveDate,
    ) -> AppResult<DateRange> {
        let naive = Self::day_bounds(day);

        let tables = store
            .table_sessions()
            .map_err(|e| AppError::upstream("table_sessions", e))?;
        let orders = store
            .order_sessions()
            .map_err(|e| AppError::upstream("order_sessions", e))?;

        let spans = tables
            .records
            .iter()
            .filter(|t| naive.contains(t.start_time))
            .map(|t| (t.start_time, t.end_time))
            .chain(
                orders
                    .records
                    .iter()
                    .filter(|o| naive.contains(o.created_at))
                    .map(|o| (o.created_at, None)),
            );

        let mut widened: Option<DateRange> = None;
        for (start, end) in spans {
            let end = end.unwrap_or(start + TimeDelta::hours(24));
            widened = Some(match widened {
                None => DateRange { start, end },
                Some(r) => DateRange {
                    start: r.start.min(start),
                    end: r.end.max(end),
                },
            });
        }

        Ok(widened.unwrap_or(naive))
    }

    /// Preset to show at startup: an active session always wins, then the
    /// persisted label, then `session`.
    pub fn restore_preset<K: KeyValueStore>(store: &K, session: &Session) -> AppResult<FilterPreset> {
        if session.active {
            return Ok(FilterPreset::Session);
        }

        Ok(store
            .get(keys::DATE_FILTER)?
            .as_deref()
            .and_then(FilterPreset::from_label)
            .unwrap_or_default())
    }

    pub fn save_preset<K: KeyValueStore>(store: &mut K, preset: FilterPreset) -> AppResult<()> {
        store.apply(&[(keys::DATE_FILTER, Some(preset.as_str().to_string()))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::parse_datetime;

    #[test]
    fn session_without_start_falls_back_to_today() {
        let now = parse_datetime("2024-06-01 15:00").unwrap();
        let r = DateRangeResolver::resolve(
            &DateRangeFilter::preset(FilterPreset::Session),
            &Session::default(),
            now,
        );
        assert_eq!(r, DateRangeResolver::day_bounds(now.date()));
    }

    #[test]
    fn unparseable_custom_anchor_degrades_to_today() {
        let now = parse_datetime("2024-06-01 15:00").unwrap();
        let r = DateRangeResolver::resolve(
            &DateRangeFilter::custom("31/12/2023", None),
            &Session::default(),
            now,
        );
        assert_eq!(r, DateRangeResolver::day_bounds(now.date()));
    }
}
