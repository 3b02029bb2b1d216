// Entry point and high-level CLI flow.
//
// - Option [1] ingests one or more tab-delimited declaration files.
// - Option [2] recomputes every report from the in-memory record set and
//   hands the chart shapes to the export/preview surface.
mod aggregate;
mod loader;
mod output;
mod parser;
mod rank;
mod regions;
mod reports;
mod series;
mod types;
mod util;

use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use types::TradeRecord;

// In-memory app state so a loaded record set can feed repeated report runs
// in a single session.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { records: None }));

struct AppState {
    records: Option<Vec<TradeRecord>>,
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask whether to go back to the report selection menu after generating
/// reports. Returns `true` for `Y`, `false` for `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to Report Selection (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: ingest one or more declaration files.
///
/// Several paths can be given at once; their records are concatenated. A
/// fresh load replaces whatever was held before.
fn handle_load() {
    let input = read_line("Enter declaration file path(s), separated by spaces: ");
    let paths: Vec<String> = input.split_whitespace().map(|s| s.to_string()).collect();
    if paths.is_empty() {
        println!("No paths given.\n");
        return;
    }

    let (records, report) = loader::ingest_files(&paths);
    println!(
        "Ingestion complete: {} file(s) loaded, {} failed, {} records retained.",
        util::format_int(report.files_loaded),
        util::format_int(report.files_failed),
        util::format_int(report.records)
    );
    if records.is_empty() {
        println!("Note: the given input(s) contained no valid declaration lines.");
    }
    println!();

    let mut state = APP_STATE.lock().unwrap();
    state.records = Some(records);
}

/// Handle option [2]: recompute all reports and write their exports.
fn handle_generate_reports() {
    let records = {
        let state = APP_STATE.lock().unwrap();
        state.records.clone()
    };
    let Some(records) = records else {
        println!("Error: No data loaded. Please load the declaration files first (option 1).\n");
        return;
    };
    if records.is_empty() {
        println!("No valid trade data to report; nothing rendered.\n");
        return;
    }

    println!("Generating reports...\n");

    output::emit_report(
        "Report 1: Top States by Gross Value",
        "report_state_totals.csv",
        "chart_state_totals.json",
        reports::state_totals(&records).map(|r| {
            let rows = output::state_total_rows(&r);
            (r, rows)
        }),
        5,
    );

    output::emit_report(
        "Report 2: Activity Breakdown per State",
        "report_state_activity.csv",
        "chart_state_activity.json",
        reports::state_activity_breakdown(&records).map(|r| {
            let rows = output::breakdown_rows(&r);
            (r, rows)
        }),
        5,
    );

    output::emit_report(
        "Report 3: Top Municipalities by Gross Value",
        "report_municipalities.csv",
        "chart_municipalities.json",
        reports::municipality_totals(&records).map(|r| {
            let rows = output::municipality_rows(&r);
            (r, rows)
        }),
        5,
    );

    output::emit_report(
        "Report 4: Gross Value per Fiscal Period",
        "report_period_trend.csv",
        "chart_period_trend.json",
        reports::period_trend(&records).map(|r| {
            let rows = output::trend_rows(&r);
            (r, rows)
        }),
        5,
    );

    output::emit_report(
        "Report 5: State vs. Region Average",
        "report_region_comparison.csv",
        "chart_region_comparison.json",
        reports::region_comparison(&records).map(|r| {
            let rows = output::region_rows(&r);
            (r, rows)
        }),
        5,
    );

    output::emit_report(
        "Report 6: State Contribution",
        "report_state_contribution.csv",
        "chart_state_contribution.json",
        reports::state_contribution(&records).map(|r| {
            let rows = output::contribution_rows(&r);
            (r, rows)
        }),
        5,
    );

    let summary = reports::dataset_summary(&records);
    if let Err(e) = output::write_json("summary.json", &summary) {
        eprintln!("Write error: {}", e);
    }
    println!(
        "Summary (summary.json): {} records, {} origin states, {} activities, gross {} / ICMS {}\n",
        util::format_int(summary.total_records),
        util::format_int(summary.distinct_origin_states),
        util::format_int(summary.distinct_activities),
        util::format_number(summary.total_gross, 2),
        util::format_number(summary.total_tax, 2)
    );
}

fn main() {
    loop {
        println!("Interstate Trade Reports");
        println!("[1] Load declaration files");
        println!("[2] Generate reports\n");
        match read_line("Enter choice: ").as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!();
                handle_generate_reports();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
