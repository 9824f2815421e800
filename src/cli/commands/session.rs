use crate::cli::parser::{Commands, SessionAction};
use crate::config::Config;
use crate::core::session::SessionLifecycle;
use crate::db::initialize::open_ready;
use crate::db::log::ttlog_quiet;
use crate::db::settings::SqliteSettings;
use crate::errors::AppResult;
use crate::models::session::SessionState;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::format_datetime;
use crate::utils::money;

/// Persisted session bound to the configured database.
pub(crate) fn open_lifecycle(cfg: &Config) -> AppResult<SessionLifecycle<SqliteSettings>> {
    let pool = open_ready(&cfg.database)?;
    SessionLifecycle::load(SqliteSettings::new(pool))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session { action } = cmd {
        let mut lc = open_lifecycle(cfg)?;

        match action {
            SessionAction::Start { cash } => {
                lc.start_session(*cash)?;
                let started = lc.start_time().map(|t| format_datetime(&t)).unwrap_or_default();

                ttlog_quiet(
                    &lc.store().pool().conn,
                    "session_start",
                    &started,
                    &format!("Session started with {}", money(*cash, &cfg.currency)),
                );
                success(format!(
                    "Session started at {} (initial cash {})",
                    started,
                    money(*cash, &cfg.currency)
                ));
            }
            SessionAction::End => {
                lc.end_session()?;
                let ended = lc.end_time().map(|t| format_datetime(&t)).unwrap_or_default();
                let duration = lc.current_duration().map(|d| d.to_string()).unwrap_or_default();

                ttlog_quiet(
                    &lc.store().pool().conn,
                    "session_end",
                    &ended,
                    &format!("Session ended after {}", duration),
                );
                success(format!("Session ended at {} ({})", ended, duration));
            }
            SessionAction::Status => print_status(&lc, cfg),
        }
    }

    Ok(())
}

fn print_status(lc: &SessionLifecycle<SqliteSettings>, cfg: &Config) {
    header("Session");

    let state = lc.state();
    let color = match state {
        SessionState::Active => GREEN,
        SessionState::Completed => YELLOW,
        SessionState::Idle => GREY,
    };
    println!("{}State    :{} {}{}{}", CYAN, RESET, color, state, RESET);

    if state == SessionState::Idle {
        info("No session has been started yet.");
        return;
    }

    if let Some(start) = lc.start_time() {
        println!("{}Started  :{} {}", CYAN, RESET, format_datetime(&start));
    }
    if let Some(end) = lc.end_time() {
        println!("{}Ended    :{} {}", CYAN, RESET, format_datetime(&end));
    }
    if let Some(d) = lc.current_duration() {
        println!("{}Duration :{} {}", CYAN, RESET, d);
    }
    println!(
        "{}Cash     :{} {}",
        CYAN,
        RESET,
        money(lc.initial_cash(), &cfg.currency)
    );
}
