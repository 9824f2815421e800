pub mod add;
pub mod config;
pub mod days;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod mutate;
pub mod range;
pub mod session;

use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::NaiveDateTime;

/// `--at`/`--start` style argument; missing means now.
pub(crate) fn instant_or_now(raw: Option<&str>) -> AppResult<NaiveDateTime> {
    match raw {
        Some(s) => date::parse_datetime(s).ok_or_else(|| AppError::InvalidDateTime(s.to_string())),
        None => Ok(date::now()),
    }
}

/// Money amounts entered on the command line must be finite and non-negative.
pub(crate) fn checked_amount(value: f64, field: &str) -> AppResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AppError::InvalidAmount(format!("{field} = {value}")))
    }
}
