//! Display formatting: photon amounts, timestamps, hash truncation.
//!
//! Amounts render with a thousands-separated whole part and between two
//! and six fraction digits — enough to show dust without drowning every
//! balance in eight decimals. All arithmetic on photon counts is integer;
//! the float path exists only for the node's pre-divided `value_sole`
//! field.

use chrono::DateTime;

use crate::config::{CURRENCY_SUFFIX, PHOTONS_PER_SOLE};

/// Minimum fraction digits shown.
const MIN_FRACTION_DIGITS: usize = 2;

/// Maximum fraction digits shown (micro-SOLE precision).
const MAX_FRACTION_DIGITS: usize = 6;

/// Formats an integer photon amount as a SOLE string.
///
/// `150_000_000` photons → `"1.50 SOLE"`.
pub fn format_photons(photons: i64) -> String {
    let negative = photons < 0;
    let abs = photons.unsigned_abs();

    let mut whole = abs / PHOTONS_PER_SOLE as u64;
    // Photons carry 8 fraction digits; round to the 6 we display.
    let mut frac = (abs % PHOTONS_PER_SOLE as u64 + 50) / 100;
    if frac == 1_000_000 {
        whole += 1;
        frac = 0;
    }

    render(negative, whole, frac)
}

/// Formats a decimal SOLE value (the node's `value_sole` field).
///
/// Zero and non-finite inputs render as `"0.00 SOLE"`.
pub fn format_sole(sole: f64) -> String {
    if !sole.is_finite() || sole == 0.0 {
        return render(false, 0, 0);
    }

    let negative = sole < 0.0;
    let scaled = (sole.abs() * 1_000_000.0).round() as u64;
    render(negative, scaled / 1_000_000, scaled % 1_000_000)
}

/// Formats a unix timestamp (seconds) for display. Zero → `"N/A"`.
pub fn format_time(timestamp: i64) -> String {
    if timestamp == 0 {
        return "N/A".to_string();
    }
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "N/A".to_string(),
    }
}

/// Shortens a hash to `start` leading and `end` trailing characters with
/// an ellipsis between. Hashes already short enough come back unchanged.
pub fn truncate_hash(hash: &str, start: usize, end: usize) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= start + end {
        return hash.to_string();
    }
    let head: String = chars[..start].iter().collect();
    let tail: String = chars[chars.len() - end..].iter().collect();
    format!("{head}...{tail}")
}

/// Assembles sign, grouped whole part, trimmed fraction, and suffix.
///
/// `frac` is in millionths (six implied digits).
fn render(negative: bool, whole: u64, frac: u64) -> String {
    let mut fraction = format!("{frac:06}");
    while fraction.len() > MIN_FRACTION_DIGITS && fraction.ends_with('0') {
        fraction.pop();
    }
    debug_assert!(fraction.len() <= MAX_FRACTION_DIGITS);

    format!(
        "{}{}.{} {}",
        if negative { "-" } else { "" },
        group_thousands(whole),
        fraction,
        CURRENCY_SUFFIX,
    )
}

/// Inserts comma separators into a non-negative integer: `1234567` →
/// `"1,234,567"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
