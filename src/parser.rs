// Tab-delimited trade declaration parsing.
//
// Pure text-in, records-out: no I/O, no diagnostics. Dropping a line is the
// expected filtering behavior for these filings, not a fault, so malformed
// lines are skipped silently and never counted.
use crate::types::TradeRecord;
use crate::util::parse_f64_safe;

/// A line needs at least this many fields to be considered at all.
pub const MIN_FIELDS: usize = 11;

const UNKNOWN: &str = "Unknown";
const UNKNOWN_ACTIVITY: &str = "Unknown Activity";

// Field layout, 0-indexed: 0=period(YYYYMM), 1=origin state,
// 2=origin municipality, 3=destination state, 4=destination municipality,
// 6=activity (NCM description), 9=gross value, 10=tax value (ICMS).
// Fields 5, 7 and 8 are present in the filings but unused here.
const F_PERIOD: usize = 0;
const F_ORIGIN_STATE: usize = 1;
const F_ORIGIN_MUN: usize = 2;
const F_DEST_STATE: usize = 3;
const F_DEST_MUN: usize = 4;
const F_ACTIVITY: usize = 6;
const F_GROSS: usize = 9;
const F_TAX: usize = 10;

/// Parse raw declaration text into records.
///
/// Blank lines are skipped entirely. A non-blank line yields a record only
/// when it splits into at least [`MIN_FIELDS`] fields and its gross-value
/// field parses strictly greater than zero.
pub fn parse_trade_text(text: &str) -> Vec<TradeRecord> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_line)
        .collect()
}

/// Split on runs of tab characters. The filings pad columns with repeated
/// tabs, so consecutive tabs act as a single separator.
fn split_tab_runs(line: &str) -> Vec<&str> {
    line.split('\t').filter(|f| !f.is_empty()).collect()
}

fn field_or<'a>(fields: &[&'a str], idx: usize, fallback: &'a str) -> &'a str {
    match fields.get(idx) {
        Some(s) if !s.trim().is_empty() => s,
        _ => fallback,
    }
}

fn parse_line(line: &str) -> Option<TradeRecord> {
    let fields = split_tab_runs(line);
    if fields.len() < MIN_FIELDS {
        return None;
    }
    let gross = parse_f64_safe(fields.get(F_GROSS).copied())?;
    if gross <= 0.0 {
        return None;
    }
    let tax = parse_f64_safe(fields.get(F_TAX).copied()).unwrap_or(0.0);

    Some(TradeRecord {
        period: field_or(&fields, F_PERIOD, UNKNOWN).trim().to_string(),
        origin_state: field_or(&fields, F_ORIGIN_STATE, UNKNOWN).trim().to_string(),
        origin_municipality: field_or(&fields, F_ORIGIN_MUN, UNKNOWN).trim().to_string(),
        destination_state: field_or(&fields, F_DEST_STATE, UNKNOWN).trim().to_string(),
        destination_municipality: field_or(&fields, F_DEST_MUN, UNKNOWN).trim().to_string(),
        activity: field_or(&fields, F_ACTIVITY, UNKNOWN_ACTIVITY).trim().to_string(),
        gross_value: gross,
        tax_value: tax,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_LINE: &str =
        "201901\tBA\tSalvador\tSP\tSaoPaulo\tx\tTires\ty\tz\t1000.00\t180.00";

    #[test]
    fn parses_a_well_formed_line() {
        let records = parse_trade_text(VALID_LINE);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.period, "201901");
        assert_eq!(r.origin_state, "BA");
        assert_eq!(r.origin_municipality, "Salvador");
        assert_eq!(r.destination_state, "SP");
        assert_eq!(r.destination_municipality, "SaoPaulo");
        assert_eq!(r.activity, "Tires");
        assert_eq!(r.gross_value, 1000.0);
        assert_eq!(r.tax_value, 180.0);
    }

    #[test]
    fn drops_non_positive_gross_value() {
        let zero = "201901\tBA\tSalvador\tSP\tSaoPaulo\tx\tTires\ty\tz\t0\t180.00";
        let negative = "201901\tBA\tSalvador\tSP\tSaoPaulo\tx\tTires\ty\tz\t-5.0\t180.00";
        let garbage = "201901\tBA\tSalvador\tSP\tSaoPaulo\tx\tTires\ty\tz\tn/a\t180.00";
        assert!(parse_trade_text(zero).is_empty());
        assert!(parse_trade_text(negative).is_empty());
        assert!(parse_trade_text(garbage).is_empty());
    }

    #[test]
    fn drops_short_lines_regardless_of_values() {
        // Ten fields only; the gross value would be fine.
        let short = "201901\tBA\tSalvador\tSP\tSaoPaulo\tx\tTires\ty\tz\t1000.00";
        assert!(parse_trade_text(short).is_empty());
    }

    #[test]
    fn skips_blank_lines_between_records() {
        let text = format!("\n   \n{}\n\t\n{}\n", VALID_LINE, VALID_LINE);
        assert_eq!(parse_trade_text(&text).len(), 2);
    }

    #[test]
    fn collapses_tab_runs_into_one_separator() {
        let padded =
            "201901\t\tBA\tSalvador\t\t\tSP\tSaoPaulo\tx\tTires\ty\tz\t\t1000.00\t180.00";
        let records = parse_trade_text(padded);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].origin_state, "BA");
        assert_eq!(records[0].gross_value, 1000.0);
    }

    #[test]
    fn tax_defaults_to_zero_on_parse_failure() {
        let line = "201901\tBA\tSalvador\tSP\tSaoPaulo\tx\tTires\ty\tz\t1000.00\tnope";
        let records = parse_trade_text(line);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tax_value, 0.0);
    }

    #[test]
    fn missing_activity_gets_the_sentinel() {
        // Field 6 is whitespace-only; extra trailing fields keep the line
        // above the minimum width.
        let line = "201901\tBA\tSalvador\tSP\tSaoPaulo\tx\t \ty\tz\t1000.00\t180.00\tpad";
        let records = parse_trade_text(line);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].activity, "Unknown Activity");
    }
}
