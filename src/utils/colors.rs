/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Profit color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_amount(value: f64) -> &'static str {
    if value > 0.0 {
        GREEN
    } else if value < 0.0 {
        RED
    } else {
        RESET
    }
}

/// Grey for zero counts, yellow otherwise (unpaid tables, open orders).
pub fn color_for_pending(count: usize) -> &'static str {
    if count == 0 { GREY } else { YELLOW }
}

pub fn colorize_amount(text: &str, value: f64) -> String {
    format!("{}{}{}", color_for_amount(value), text, RESET)
}
