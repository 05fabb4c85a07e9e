//! Display formatting shared by every view.

use catalog::Money;
use chrono::{DateTime, Utc};

/// Formats an amount as US dollars with thousands separators: `$1,234.50`.
pub fn format_usd(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let dollars = group_thousands(amount.dollars().unsigned_abs());
    format!("{sign}${dollars}.{:02}", amount.cents_part())
}

/// Formats a timestamp as an en-US short date: `3/7/2025`.
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
