//! Number formatting utilities for human-readable display.
//!
//! Handles f64 values from the orders API: fixed-decimal money with comma
//! separators, tax rates as percentages, coordinates, and byte sizes.

use crate::shared::OrderId;

/// Adds thousands separators to the integer part of a formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `$1,234.50`, always two decimals.
pub fn money(amount: f64) -> String {
    let formatted = group_thousands(&format!("{:.2}", amount.abs()));
    if amount < 0.0 {
        format!("-${}", formatted)
    } else {
        format!("${}", formatted)
    }
}

/// A fractional rate (`0.08875`) as a percentage (`8.875%`).
pub fn rate_percent(rate: f64, decimals: usize) -> String {
    format!("{:.1$}%", rate * 100.0, decimals)
}

/// Coordinate with four decimals, or an em dash when unset.
pub fn coordinate(value: f64) -> String {
    if value == 0.0 {
        "—".to_string()
    } else {
        format!("{:.4}", value)
    }
}

/// `ORD-007` style label, zero-padded to three digits.
pub fn order_label(id: OrderId) -> String {
    format!("ORD-{:03}", id.get())
}

/// `512 B`, `1.5 KB`, `2.0 MB`.
pub fn file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
