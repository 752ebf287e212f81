//! id-ID display formatting.
//!
//! The storefront renders prices as `Rp 1.500.000` (thousands grouped with
//! `.`), order dates in long Indonesian form, and the payment countdown as
//! `HH:MM:SS` with modulo-day hours.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Indonesian month names, indexed by `month0`.
const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Format an amount in rupiah with id-ID thousands grouping.
///
/// Whole amounts render without decimals; fractional amounts keep two
/// decimals behind a comma.
///
/// ```rust
/// use tokoku::utils::format_rupiah;
///
/// assert_eq!(format_rupiah(1_500_000.0), "1.500.000");
/// assert_eq!(format_rupiah(999.5), "999,50");
/// ```
#[must_use]
pub fn format_rupiah(amount: f64) -> String {
    let negative = amount < 0.0;
    // Work in hundredths so float artifacts can't produce ",100".
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction > 0 {
        out.push_str(&format!(",{:02}", fraction));
    }
    out
}

/// Render a remaining number of seconds as `HH:MM:SS`.
///
/// Hours wrap at 24 — the same modulo-day arithmetic the countdown display
/// has always used, so a window of just under 24 hours shows `23:59:59`.
/// Negative inputs clamp to `00:00:00`.
#[must_use]
pub fn format_countdown(remaining_seconds: i64) -> String {
    let total = remaining_seconds.max(0);
    let hours = (total / 3600) % 24;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format an order timestamp the way the order card shows it:
/// `7 Agustus 2026, 14.30`.
#[must_use]
pub fn format_order_date(timestamp: NaiveDateTime) -> String {
    let month = MONTHS
        .get(timestamp.month0() as usize)
        .copied()
        .unwrap_or("");
    format!(
        "{} {} {}, {:02}.{:02}",
        timestamp.day(),
        month,
        timestamp.year(),
        timestamp.hour(),
        timestamp.minute()
    )
}
