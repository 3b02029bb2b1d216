// Export and preview surface: CSV/JSON files for the chart layer plus
// markdown table previews on the console.
use crate::types::{
    ActivityBreakdownRow, CategoryReport, CategorySeries, ContributionRow, MunicipalityRow,
    PeriodTrendRow, PieReport, RegionComparisonReport, RegionComparisonRow, StateTotalsRow,
    TimeSeriesReport,
};
use crate::util::{format_number, format_period};
use serde::Serialize;
use std::error::Error;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn preview_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Write both exports for one report and preview its first rows. A `None`
/// means the builder had nothing to aggregate; only a diagnostic is
/// printed and no file is touched.
pub fn emit_report<R, T>(
    title: &str,
    csv_path: &str,
    json_path: &str,
    built: Option<(R, Vec<T>)>,
    max_rows: usize,
) where
    R: Serialize,
    T: Serialize + Tabled + Clone,
{
    println!("{}", title);
    let Some((chart, rows)) = built else {
        println!("(no data)\n");
        return;
    };
    if let Err(e) = write_csv(csv_path, &rows) {
        eprintln!("Write error: {}", e);
    }
    if let Err(e) = write_json(json_path, &chart) {
        eprintln!("Write error: {}", e);
    }
    preview_rows(&rows, max_rows);
    println!("(Full report exported to {} and {})\n", csv_path, json_path);
}

fn point_at(series: Option<&CategorySeries>, i: usize) -> f64 {
    series.and_then(|s| s.points.get(i)).copied().unwrap_or(0.0)
}

// Chart shape -> flat row conversions. The chart JSON keeps raw values and
// keys; these rows carry the formatted presentation.

pub fn state_total_rows(report: &CategoryReport) -> Vec<StateTotalsRow> {
    let gross = report.series.first();
    let tax = report.series.get(1);
    report
        .categories
        .iter()
        .enumerate()
        .map(|(i, state)| StateTotalsRow {
            rank: i + 1,
            state: state.clone(),
            gross_value: format_number(point_at(gross, i), 2),
            tax_value: format_number(point_at(tax, i), 2),
        })
        .collect()
}

pub fn breakdown_rows(report: &CategoryReport) -> Vec<ActivityBreakdownRow> {
    let mut rows = Vec::new();
    for (i, state) in report.categories.iter().enumerate() {
        for series in &report.series {
            rows.push(ActivityBreakdownRow {
                state: state.clone(),
                activity: series.name.clone(),
                gross_value: format_number(point_at(Some(series), i), 2),
            });
        }
    }
    rows
}

pub fn municipality_rows(report: &CategoryReport) -> Vec<MunicipalityRow> {
    let gross = report.series.first();
    report
        .categories
        .iter()
        .enumerate()
        .map(|(i, municipality)| MunicipalityRow {
            rank: i + 1,
            municipality: municipality.clone(),
            gross_value: format_number(point_at(gross, i), 2),
        })
        .collect()
}

pub fn trend_rows(report: &TimeSeriesReport) -> Vec<PeriodTrendRow> {
    let mut rows = Vec::new();
    for (i, period) in report.periods.iter().enumerate() {
        for series in &report.series {
            let y = series.points.get(i).map(|p| p.y).unwrap_or(0.0);
            rows.push(PeriodTrendRow {
                period: format_period(period),
                state: series.name.clone(),
                gross_value: format_number(y, 2),
            });
        }
    }
    rows
}

pub fn region_rows(report: &RegionComparisonReport) -> Vec<RegionComparisonRow> {
    report
        .series
        .iter()
        .map(|series| RegionComparisonRow {
            state: series.name.clone(),
            region_avg: format_number(series.points.first().map(|p| p.y).unwrap_or(0.0), 2),
            state_avg: format_number(series.points.get(1).map(|p| p.y).unwrap_or(0.0), 2),
        })
        .collect()
}

pub fn contribution_rows(report: &PieReport) -> Vec<ContributionRow> {
    report
        .slices
        .iter()
        .map(|slice| ContributionRow {
            slice: slice.name.clone(),
            gross_value: format_number(slice.value, 2),
            percentage: format_number(slice.percentage, 2),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TimePoint, TimeSeries};

    #[test]
    fn state_rows_are_ranked_in_category_order() {
        let report = CategoryReport {
            categories: vec!["SP".to_string(), "BA".to_string()],
            series: vec![
                CategorySeries {
                    name: "Gross Value".to_string(),
                    points: vec![2000.0, 1000.0],
                },
                CategorySeries {
                    name: "ICMS".to_string(),
                    points: vec![360.0, 180.0],
                },
            ],
        };
        let rows = state_total_rows(&report);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].state, "SP");
        assert_eq!(rows[0].gross_value, "2,000.00");
        assert_eq!(rows[1].tax_value, "180.00");
    }

    #[test]
    fn trend_rows_format_the_period_for_display() {
        let report = TimeSeriesReport {
            periods: vec!["201901".to_string()],
            series: vec![TimeSeries {
                name: "BA".to_string(),
                points: vec![TimePoint {
                    x: "201901".to_string(),
                    y: 5.0,
                }],
            }],
        };
        let rows = trend_rows(&report);
        assert_eq!(rows[0].period, "01/2019");
        assert_eq!(rows[0].state, "BA");
    }

    #[test]
    fn breakdown_rows_cover_every_cell() {
        let report = CategoryReport {
            categories: vec!["BA".to_string(), "SP".to_string()],
            series: vec![CategorySeries {
                name: "Tires".to_string(),
                points: vec![300.0, 0.0],
            }],
        };
        let rows = breakdown_rows(&report);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].state, "SP");
        assert_eq!(rows[1].gross_value, "0.00");
    }
}
