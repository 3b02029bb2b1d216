// Parsing and formatting helpers.
//
// This module centralizes the "dirty" number/period handling so the rest of
// the code can assume clean, typed values.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that show up in bulk filing exports.
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

/// Reformat a raw `YYYYMM` period key as `MM/YYYY` for display.
///
/// Grouping always happens on the raw key; this runs only at the
/// presentation edge. Keys that are not a valid period pass through as-is.
pub fn format_period(period: &str) -> String {
    let padded = format!("{}01", period);
    match NaiveDate::parse_from_str(&padded, "%Y%m%d") {
        Ok(d) => d.format("%m/%Y").to_string(),
        Err(_) => period.to_string(),
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimal places plus thousands separators (e.g. `1,234,567.89`).
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Used for counts in console messages (e.g. `12,481 records retained`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_f64_safe_accepts_plain_decimals() {
        assert_eq!(parse_f64_safe(Some("1000.00")), Some(1000.0));
        assert_eq!(parse_f64_safe(Some(" 180.5 ")), Some(180.5));
        assert_eq!(parse_f64_safe(Some("1,234.56")), Some(1234.56));
    }

    #[test]
    fn parse_f64_safe_rejects_garbage() {
        assert_eq!(parse_f64_safe(None), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(Some("abc")), None);
        assert_eq!(parse_f64_safe(Some("12x")), None);
    }

    #[test]
    fn period_formats_as_month_slash_year() {
        assert_eq!(format_period("201901"), "01/2019");
        assert_eq!(format_period("202012"), "12/2020");
    }

    #[test]
    fn invalid_period_passes_through() {
        assert_eq!(format_period("Unknown"), "Unknown");
        assert_eq!(format_period("201913"), "201913");
    }

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-42.0, 2), "-42.00");
    }
}
