use serde::Serialize;
use tabled::Tabled;

/// One retained line of a trade declaration file.
///
/// Records are immutable once parsed; every retained record has
/// `gross_value > 0` (the parser enforces this).
#[derive(Debug, Clone)]
pub struct TradeRecord {
    /// Fiscal period, raw `YYYYMM`. Kept as an opaque string; it is both a
    /// grouping key and, at the presentation edge, reformatted `MM/YYYY`.
    pub period: String,
    pub origin_state: String,
    pub origin_municipality: String,
    pub destination_state: String,
    pub destination_municipality: String,
    /// NCM description used as the activity-category dimension.
    pub activity: String,
    pub gross_value: f64,
    /// ICMS amount, aggregated independently of the gross value.
    pub tax_value: f64,
}

// Chart shapes handed to the rendering collaborator. Serialized verbatim;
// the chart layer owns labels, colors and tooltips.

#[derive(Debug, Clone, Serialize)]
pub struct CategorySeries {
    pub name: String,
    /// One point per category, dense.
    pub points: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub categories: Vec<String>,
    pub series: Vec<CategorySeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimePoint {
    pub x: String,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeSeries {
    pub name: String,
    pub points: Vec<TimePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeSeriesReport {
    /// Sorted unique period keys; every series has one point per entry.
    pub periods: Vec<String>,
    pub series: Vec<TimeSeries>,
}

/// Per-state pair of (region average, state average) for the comparison
/// chart. Reuses the `{x, y}` point shape; each series carries exactly two
/// points, both anchored at the state code.
#[derive(Debug, Clone, Serialize)]
pub struct RegionComparisonReport {
    pub series: Vec<TimeSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieReport {
    pub slices: Vec<PieSlice>,
}

// Flat rows for CSV export and console previews.

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct StateTotalsRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "State")]
    #[tabled(rename = "State")]
    pub state: String,
    #[serde(rename = "GrossValue")]
    #[tabled(rename = "GrossValue")]
    pub gross_value: String,
    #[serde(rename = "ICMS")]
    #[tabled(rename = "ICMS")]
    pub tax_value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ActivityBreakdownRow {
    #[serde(rename = "State")]
    #[tabled(rename = "State")]
    pub state: String,
    #[serde(rename = "Activity")]
    #[tabled(rename = "Activity")]
    pub activity: String,
    #[serde(rename = "GrossValue")]
    #[tabled(rename = "GrossValue")]
    pub gross_value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MunicipalityRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Municipality")]
    #[tabled(rename = "Municipality")]
    pub municipality: String,
    #[serde(rename = "GrossValue")]
    #[tabled(rename = "GrossValue")]
    pub gross_value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct PeriodTrendRow {
    #[serde(rename = "Period")]
    #[tabled(rename = "Period")]
    pub period: String,
    #[serde(rename = "State")]
    #[tabled(rename = "State")]
    pub state: String,
    #[serde(rename = "GrossValue")]
    #[tabled(rename = "GrossValue")]
    pub gross_value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RegionComparisonRow {
    #[serde(rename = "State")]
    #[tabled(rename = "State")]
    pub state: String,
    #[serde(rename = "RegionAvg")]
    #[tabled(rename = "RegionAvg")]
    pub region_avg: String,
    #[serde(rename = "StateAvg")]
    #[tabled(rename = "StateAvg")]
    pub state_avg: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ContributionRow {
    #[serde(rename = "Slice")]
    #[tabled(rename = "Slice")]
    pub slice: String,
    #[serde(rename = "GrossValue")]
    #[tabled(rename = "GrossValue")]
    pub gross_value: String,
    #[serde(rename = "Percentage")]
    #[tabled(rename = "Percentage")]
    pub percentage: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub total_records: usize,
    pub distinct_origin_states: usize,
    pub distinct_destination_states: usize,
    pub distinct_municipalities: usize,
    pub distinct_activities: usize,
    pub distinct_periods: usize,
    pub total_gross: f64,
    pub total_tax: f64,
}
