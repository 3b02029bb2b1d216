// Multi-file ingestion.
//
// Each input is read and parsed as an independent task producing its own
// result; results are joined only once every input has finished, then
// concatenated into a single record set. Aggregation never sees a partially
// ingested set.
use crate::parser::parse_trade_text;
use crate::types::TradeRecord;
use std::error::Error;
use std::fs;

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub files_loaded: usize,
    pub files_failed: usize,
    pub records: usize,
}

/// Read and parse one input file.
pub fn load_file(path: &str) -> Result<Vec<TradeRecord>, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_trade_text(&text))
}

/// Ingest every path and concatenate the results.
///
/// A file that cannot be read is logged to stderr and contributes zero
/// records; the remaining inputs still load and the combined set is
/// returned. Records are concatenated as-is, never deduplicated, and input
/// order cannot affect downstream aggregation.
pub fn ingest_files(paths: &[String]) -> (Vec<TradeRecord>, LoadReport) {
    let results: Vec<(&str, Result<Vec<TradeRecord>, Box<dyn Error>>)> = paths
        .iter()
        .map(|path| (path.as_str(), load_file(path)))
        .collect();

    // Join point: every input has completed before anything is merged.
    let mut combined: Vec<TradeRecord> = Vec::new();
    let mut report = LoadReport {
        files_loaded: 0,
        files_failed: 0,
        records: 0,
    };
    for (path, result) in results {
        match result {
            Ok(mut records) => {
                report.files_loaded += 1;
                combined.append(&mut records);
            }
            Err(e) => {
                report.files_failed += 1;
                eprintln!("Failed to load {}: {}", path, e);
            }
        }
    }
    report.records = combined.len();
    (combined, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    const LINE: &str = "201901\tBA\tSalvador\tSP\tSaoPaulo\tx\tTires\ty\tz\t1000.00\t180.00";

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("trade_report_{}_{}", std::process::id(), name));
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn concatenates_all_inputs_without_dedup() {
        let a = temp_file("a.txt", LINE);
        let b = temp_file("b.txt", LINE);
        let paths = vec![
            a.to_string_lossy().into_owned(),
            b.to_string_lossy().into_owned(),
        ];

        let (records, report) = ingest_files(&paths);
        assert_eq!(report.files_loaded, 2);
        assert_eq!(report.files_failed, 0);
        assert_eq!(records.len(), 2);
        // Two identical sources double the total, exactly.
        let total: f64 = records.iter().map(|r| r.gross_value).sum();
        assert_eq!(total, 2000.0);

        fs::remove_file(a).ok();
        fs::remove_file(b).ok();
    }

    #[test]
    fn unreadable_input_is_excluded_not_fatal() {
        let good = temp_file("good.txt", LINE);
        let paths = vec![
            "/nonexistent/trade_report_missing.txt".to_string(),
            good.to_string_lossy().into_owned(),
        ];

        let (records, report) = ingest_files(&paths);
        assert_eq!(report.files_loaded, 1);
        assert_eq!(report.files_failed, 1);
        assert_eq!(records.len(), 1);

        fs::remove_file(good).ok();
    }
}
