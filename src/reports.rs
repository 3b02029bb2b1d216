// Report builders.
//
// Each builder recomputes from the full record set and returns `None` when
// there is nothing to aggregate, so the caller skips the chart layer
// instead of rendering an empty frame.
use crate::aggregate::{nested_sum_by, sum_by, sum_count_by};
use crate::rank::{top_entries, top_nested, TOP_N};
use crate::regions::{region_averages, region_of};
use crate::series::{category_table, pie_slices, sorted_periods, time_series_table};
use crate::types::{
    CategoryReport, PieReport, RegionComparisonReport, SummaryStats, TimePoint, TimeSeries,
    TimeSeriesReport, TradeRecord,
};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Top states by summed gross value, with the ICMS totals as an independent
/// second series over the same category axis.
pub fn state_totals(records: &[TradeRecord]) -> Option<CategoryReport> {
    if records.is_empty() {
        return None;
    }
    let gross = sum_by(records, |r| r.origin_state.clone(), |r| r.gross_value);
    let tax = sum_by(records, |r| r.origin_state.clone(), |r| r.tax_value);
    let categories: Vec<String> = top_entries(&gross, TOP_N)
        .into_iter()
        .map(|(state, _)| state)
        .collect();
    Some(category_table(
        &categories,
        vec![("Gross Value".to_string(), gross), ("ICMS".to_string(), tax)],
    ))
}

/// Gross value per activity within each of the top states.
///
/// States are ranked globally; each state's activities are then ranked on
/// their own (per-parent selection). Series are aligned by activity
/// identity with zero-fill, capped at the activities with the largest
/// combined value across the ranked states.
pub fn state_activity_breakdown(records: &[TradeRecord]) -> Option<CategoryReport> {
    if records.is_empty() {
        return None;
    }
    let grouped = nested_sum_by(
        records,
        |r| r.origin_state.clone(),
        |r| r.activity.clone(),
        |r| r.gross_value,
    );
    let ranked = top_nested(&grouped, TOP_N);
    let categories: Vec<String> = ranked.iter().map(|p| p.parent.clone()).collect();

    // Union of every ranked state's top activities, cell values keyed by
    // activity then state.
    let mut combined: HashMap<String, f64> = HashMap::new();
    let mut cells: HashMap<String, HashMap<String, f64>> = HashMap::new();
    for parent in &ranked {
        for child in &parent.children {
            *combined.entry(child.name.clone()).or_insert(0.0) += child.value;
            cells
                .entry(child.name.clone())
                .or_default()
                .insert(parent.parent.clone(), child.value);
        }
    }
    let mut activities: Vec<(String, f64)> = combined.into_iter().collect();
    activities.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    activities.truncate(TOP_N);

    let series = activities
        .into_iter()
        .map(|(name, _)| {
            let by_state = cells.remove(&name).unwrap_or_default();
            (name, by_state)
        })
        .collect();
    Some(category_table(&categories, series))
}

/// Top origin municipalities by summed gross value.
pub fn municipality_totals(records: &[TradeRecord]) -> Option<CategoryReport> {
    if records.is_empty() {
        return None;
    }
    let gross = sum_by(records, |r| r.origin_municipality.clone(), |r| r.gross_value);
    let categories: Vec<String> = top_entries(&gross, TOP_N)
        .into_iter()
        .map(|(municipality, _)| municipality)
        .collect();
    Some(category_table(
        &categories,
        vec![("Gross Value".to_string(), gross)],
    ))
}

/// Gross value of the top states across every fiscal period in the data.
/// Series are dense: one point per period per state.
pub fn period_trend(records: &[TradeRecord]) -> Option<TimeSeriesReport> {
    if records.is_empty() {
        return None;
    }
    let gross = sum_by(records, |r| r.origin_state.clone(), |r| r.gross_value);
    let states: Vec<String> = top_entries(&gross, TOP_N)
        .into_iter()
        .map(|(state, _)| state)
        .collect();
    let wanted: HashSet<&str> = states.iter().map(|s| s.as_str()).collect();

    // One pass builds the state -> period -> value index; assembly then
    // reads cells instead of rescanning the record set per point.
    let mut index: HashMap<String, HashMap<String, f64>> = HashMap::new();
    for r in records {
        if wanted.contains(r.origin_state.as_str()) {
            *index
                .entry(r.origin_state.clone())
                .or_default()
                .entry(r.period.clone())
                .or_insert(0.0) += r.gross_value;
        }
    }
    Some(time_series_table(sorted_periods(records), &states, &index))
}

/// Per-state average gross value paired with the average of its region.
/// States without a region mapping are left out; if nothing maps there is
/// nothing to compare.
pub fn region_comparison(records: &[TradeRecord]) -> Option<RegionComparisonReport> {
    if records.is_empty() {
        return None;
    }
    let per_state = sum_count_by(records, |r| r.origin_state.clone(), |r| r.gross_value);
    let state_avgs: HashMap<String, f64> = per_state
        .iter()
        .map(|(state, sc)| (state.clone(), sc.average()))
        .collect();
    let region_avgs = region_averages(&state_avgs);

    let mut mapped: Vec<(String, &'static str)> = state_avgs
        .keys()
        .filter_map(|state| region_of(state).map(|region| (state.clone(), region)))
        .collect();
    if mapped.is_empty() {
        return None;
    }
    mapped.sort();

    let series = mapped
        .into_iter()
        .map(|(state, region)| {
            let region_avg = region_avgs.get(region).copied().unwrap_or(0.0);
            let state_avg = state_avgs.get(&state).copied().unwrap_or(0.0);
            TimeSeries {
                name: state.clone(),
                points: vec![
                    TimePoint {
                        x: state.clone(),
                        y: region_avg,
                    },
                    TimePoint {
                        x: state,
                        y: state_avg,
                    },
                ],
            }
        })
        .collect();
    Some(RegionComparisonReport { series })
}

/// Each state's contribution to the overall gross value, with small slices
/// folded into "Other".
pub fn state_contribution(records: &[TradeRecord]) -> Option<PieReport> {
    if records.is_empty() {
        return None;
    }
    let gross = sum_by(records, |r| r.origin_state.clone(), |r| r.gross_value);
    let entries: Vec<(String, f64)> = gross.into_iter().collect();
    Some(pie_slices(&entries))
}

pub fn dataset_summary(records: &[TradeRecord]) -> SummaryStats {
    let origin_states: HashSet<&str> = records.iter().map(|r| r.origin_state.as_str()).collect();
    let destination_states: HashSet<&str> = records
        .iter()
        .map(|r| r.destination_state.as_str())
        .collect();
    let municipalities: HashSet<&str> = records
        .iter()
        .map(|r| r.origin_municipality.as_str())
        .collect();
    let activities: HashSet<&str> = records.iter().map(|r| r.activity.as_str()).collect();
    let periods: HashSet<&str> = records.iter().map(|r| r.period.as_str()).collect();
    SummaryStats {
        total_records: records.len(),
        distinct_origin_states: origin_states.len(),
        distinct_destination_states: destination_states.len(),
        distinct_municipalities: municipalities.len(),
        distinct_activities: activities.len(),
        distinct_periods: periods.len(),
        total_gross: records.iter().map(|r| r.gross_value).sum(),
        total_tax: records.iter().map(|r| r.tax_value).sum(),
    }
}
