// Ranking grouped totals and truncating to a bounded result.
use crate::aggregate::NestedTotals;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Every report in this system caps its ranked output at ten entries.
pub const TOP_N: usize = 10;

/// Rank all entries by value, descending, keeping the first `n`. The sort is
/// stable, so entries with equal values stay in the grouping map's iteration
/// order.
pub fn top_entries(totals: &HashMap<String, f64>, n: usize) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = totals.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    entries.truncate(n);
    entries
}

/// One child slot of a ranked parent. `share` is the child's percentage of
/// the parent total, derived after accumulation; ranking by value and by
/// share order a parent's children identically.
#[derive(Debug, Clone)]
pub struct RankedChild {
    pub name: String,
    pub value: f64,
    pub share: f64,
}

#[derive(Debug, Clone)]
pub struct ParentRanking {
    pub parent: String,
    pub total: f64,
    pub children: Vec<RankedChild>,
}

/// Per-parent selection: rank the top-`n` parents by their own totals, then
/// rank each parent's children independently and keep each parent's own
/// top `n`. Child lists are never re-ranked across parents.
pub fn top_nested(grouped: &HashMap<String, NestedTotals>, n: usize) -> Vec<ParentRanking> {
    let parent_totals: HashMap<String, f64> = grouped
        .iter()
        .map(|(k, node)| (k.clone(), node.total))
        .collect();

    top_entries(&parent_totals, n)
        .into_iter()
        .map(|(parent, total)| {
            let node = &grouped[&parent];
            let mut children: Vec<RankedChild> = node
                .children
                .iter()
                .map(|(name, value)| RankedChild {
                    name: name.clone(),
                    value: *value,
                    share: if total > 0.0 { value / total * 100.0 } else { 0.0 },
                })
                .collect();
            children.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
            children.truncate(n);
            ParentRanking {
                parent,
                total,
                children,
            }
        })
        .collect()
}
