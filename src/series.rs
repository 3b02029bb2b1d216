// Assembly of ranked aggregates into the dense tabular shapes the chart
// layer consumes. Output is always rectangular: every series spans the full
// category (or period) axis, with 0 for missing combinations.
use crate::types::{
    CategoryReport, CategorySeries, PieReport, PieSlice, TimePoint, TimeSeries, TimeSeriesReport,
    TradeRecord,
};
use std::collections::{BTreeSet, HashMap};

/// Slices whose share of the total is at or below this fold into the
/// catch-all "Other" slice.
pub const MIN_SLICE_SHARE: f64 = 5.0;

/// Build a dense category/series table from `(name, category -> value)`
/// pairs. Missing cells become 0, never omitted points.
pub fn category_table(
    categories: &[String],
    series: Vec<(String, HashMap<String, f64>)>,
) -> CategoryReport {
    let series = series
        .into_iter()
        .map(|(name, by_category)| CategorySeries {
            name,
            points: categories
                .iter()
                .map(|c| by_category.get(c).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();
    CategoryReport {
        categories: categories.to_vec(),
        series,
    }
}

/// Sorted unique period keys. Lexicographic order is chronological order
/// for the fixed-width `YYYYMM` keys.
pub fn sorted_periods(records: &[TradeRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.period.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Dense time series from a pre-built entity -> period -> value index.
/// Every entity gets exactly one point per period, 0 where the combination
/// is absent.
pub fn time_series_table(
    periods: Vec<String>,
    entities: &[String],
    index: &HashMap<String, HashMap<String, f64>>,
) -> TimeSeriesReport {
    let series = entities
        .iter()
        .map(|entity| {
            let by_period = index.get(entity);
            TimeSeries {
                name: entity.clone(),
                points: periods
                    .iter()
                    .map(|period| TimePoint {
                        x: period.clone(),
                        y: by_period
                            .and_then(|m| m.get(period))
                            .copied()
                            .unwrap_or(0.0),
                    })
                    .collect(),
            }
        })
        .collect();
    TimeSeriesReport { periods, series }
}

/// Contribution slices, largest first. Entries at or below
/// [`MIN_SLICE_SHARE`] percent of the total collapse into one trailing
/// "Other" slice carrying their summed value and percentage.
pub fn pie_slices(entries: &[(String, f64)]) -> PieReport {
    let total: f64 = entries.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return PieReport { slices: Vec::new() };
    }

    let mut ordered: Vec<(String, f64)> = entries.to_vec();
    ordered.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut slices = Vec::new();
    let mut other_value = 0.0;
    for (name, value) in ordered {
        let percentage = value / total * 100.0;
        if percentage > MIN_SLICE_SHARE {
            slices.push(PieSlice {
                name,
                value,
                percentage,
            });
        } else {
            other_value += value;
        }
    }
    if other_value > 0.0 {
        slices.push(PieSlice {
            name: "Other".to_string(),
            value: other_value,
            percentage: other_value / total * 100.0,
        });
    }
    PieReport { slices }
}
