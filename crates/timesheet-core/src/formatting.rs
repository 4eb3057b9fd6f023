//! Rounding and display helpers shared by the aggregator and the report.

/// Round `value` to `decimals` decimal places, halves away from zero.
///
/// ```
/// use timesheet_core::formatting::round_to;
///
/// assert_eq!(round_to(1.25, 1), 1.3);
/// assert_eq!(round_to(149.5, 0), 150.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `(part / whole) * 100`, or `0.0` when `whole` is not positive.
///
/// ```
/// use timesheet_core::formatting::ratio_percent;
///
/// assert_eq!(ratio_percent(200.0, 160.0), 125.0);
/// assert_eq!(ratio_percent(500.0, 0.0), 0.0);
/// ```
pub fn ratio_percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole) * 100.0
    } else {
        0.0
    }
}

/// Format a number with thousands separators and fixed decimals.
///
/// ```
/// use timesheet_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(-9876.0, 0), "-9,876");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let fixed = format!("{:.prec$}", value.abs(), prec = decimals as usize);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Whole currency units with a dollar sign, e.g. `"$12,400"`.
pub fn format_currency(amount: f64) -> String {
    let body = format_number(amount.abs(), 0);
    if amount <= -0.5 {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Hours with one decimal and an `h` suffix, e.g. `"37.5h"`.
pub fn format_hours(hours: f64) -> String {
    format!("{}h", format_number(hours, 1))
}

/// Percentage with one decimal, e.g. `"82.4%"`.
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
