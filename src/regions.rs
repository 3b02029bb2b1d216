// The fixed state-to-region partition behind the region comparison report.
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Hand-authored partition of the 27 state codes into the 5 named regions.
/// A code absent from the map is silently left out of region aggregates.
pub static REGION_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for state in ["AC", "AM", "AP", "PA", "RO", "RR", "TO"] {
        m.insert(state, "Norte");
    }
    for state in ["AL", "BA", "CE", "MA", "PB", "PE", "PI", "RN", "SE"] {
        m.insert(state, "Nordeste");
    }
    for state in ["DF", "GO", "MS", "MT"] {
        m.insert(state, "Centro-Oeste");
    }
    for state in ["ES", "MG", "RJ", "SP"] {
        m.insert(state, "Sudeste");
    }
    for state in ["PR", "RS", "SC"] {
        m.insert(state, "Sul");
    }
    m
});

pub fn region_of(state: &str) -> Option<&'static str> {
    REGION_MAP.get(state).copied()
}

/// Per-region unweighted mean of the per-state averages. This deliberately
/// flattens per-state record counts: a region's figure is the plain mean of
/// its states' averages, not a record-weighted one.
pub fn region_averages(state_averages: &HashMap<String, f64>) -> HashMap<&'static str, f64> {
    let mut acc: HashMap<&'static str, (f64, usize)> = HashMap::new();
    for (state, avg) in state_averages {
        if let Some(region) = region_of(state) {
            let e = acc.entry(region).or_insert((0.0, 0));
            e.0 += avg;
            e.1 += 1;
        }
    }
    acc.into_iter()
        .map(|(region, (sum, n))| (region, sum / n as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_all_27_states_in_5_regions() {
        assert_eq!(REGION_MAP.len(), 27);
        let mut regions: Vec<&str> = REGION_MAP.values().copied().collect();
        regions.sort();
        regions.dedup();
        assert_eq!(
            regions,
            ["Centro-Oeste", "Nordeste", "Norte", "Sudeste", "Sul"]
        );
    }

    #[test]
    fn maps_known_codes() {
        assert_eq!(region_of("BA"), Some("Nordeste"));
        assert_eq!(region_of("SP"), Some("Sudeste"));
        assert_eq!(region_of("RS"), Some("Sul"));
        assert_eq!(region_of("XX"), None);
    }

    #[test]
    fn region_average_is_unweighted_mean_of_state_averages() {
        // Two Nordeste states averaging 10 and 20 give 15, regardless of how
        // many records stood behind each state.
        let mut state_avgs = HashMap::new();
        state_avgs.insert("BA".to_string(), 10.0);
        state_avgs.insert("PE".to_string(), 20.0);
        let regions = region_averages(&state_avgs);
        assert_eq!(regions["Nordeste"], 15.0);
    }

    #[test]
    fn unmapped_states_are_excluded_silently() {
        let mut state_avgs = HashMap::new();
        state_avgs.insert("BA".to_string(), 10.0);
        state_avgs.insert("ZZ".to_string(), 1000.0);
        let regions = region_averages(&state_avgs);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions["Nordeste"], 10.0);
    }
}
