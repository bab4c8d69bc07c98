use indexmap::IndexMap;

/// Per-technology line totals, kept in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    per_tech: IndexMap<&'static str, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `lines` under `label`; the label is recorded even when `lines` is 0.
    pub fn add(&mut self, label: &'static str, lines: u64) {
        *self.per_tech.entry(label).or_insert(0) += lines;
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.per_tech.get(label).copied()
    }

    pub fn grand_total(&self) -> u64 {
        self.per_tech.values().sum()
    }

    pub fn len(&self) -> usize {
        self.per_tech.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_tech.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.per_tech.iter().map(|(label, lines)| (*label, *lines))
    }
}

/// One line of the final report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechRow {
    pub label: &'static str,
    pub lines: u64,
    /// Share of the grand total, in `[0, 100]`.
    pub percent: f64,
}

/// Converts a tally into rows sorted by descending share.
///
/// Equal shares keep the tally's encounter order. A zero grand total yields
/// no rows.
#[allow(clippy::cast_precision_loss)]
pub fn compute_percentages(tally: &Tally) -> Vec<TechRow> {
    let total = tally.grand_total();
    if total == 0 {
        return Vec::new();
    }
    let mut rows: Vec<TechRow> = tally
        .iter()
        .map(|(label, lines)| TechRow {
            label,
            lines,
            percent: lines as f64 * 100.0 / total as f64,
        })
        .collect();
    // `sort_by` is stable
    rows.sort_by(|a, b| b.percent.total_cmp(&a.percent));
    rows
}
