//! Vietnamese Dong formatting and parsing

use std::sync::OnceLock;

use regex::Regex;

pub const VND_SYMBOL: &str = "₫";

fn non_numeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\d-]").expect("valid regex"))
}

/// Group the integer part with `.` separators: 1234567 -> "1.234.567"
pub fn format_number(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format as whole đồng: 1234567 -> "1.234.567 ₫"
pub fn format_vnd(amount: f64) -> String {
    format!("{} {}", format_number(amount), VND_SYMBOL)
}

/// Parse a formatted VND amount back to a number
///
/// Separators and the currency symbol are dropped; anything that does not
/// leave a valid integer parses as 0.
pub fn parse_vnd(text: &str) -> f64 {
    let cleaned = non_numeric().replace_all(text, "");
    cleaned.parse::<i64>().map(|v| v as f64).unwrap_or(0.0)
}
