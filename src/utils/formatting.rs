//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Two-decimal amount followed by the currency symbol, e.g. `12.50 €`.
pub fn money(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

/// Like [`money`] but with an explicit `+` for positive values.
pub fn signed_money(amount: f64, currency: &str) -> String {
    if amount > 0.0 {
        format!("+{:.2} {}", amount, currency)
    } else {
        money(amount, currency)
    }
}

pub fn mins2readable(mins: i64) -> String {
    let abs_m = mins.abs();
    format!("{:02}h {:02}m", abs_m / 60, abs_m % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats() {
        assert_eq!(money(12.5, "€"), "12.50 €");
        assert_eq!(signed_money(8.0, "€"), "+8.00 €");
        assert_eq!(signed_money(-3.0, "€"), "-3.00 €");
        assert_eq!(mins2readable(135), "02h 15m");
    }
}
