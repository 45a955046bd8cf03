use std::cmp::Ordering;

/// Calendar year as it appears in the source data.
pub type Year = i64;

/// Resolution at which populations are compared when ranking rows.
///
/// Populations are rounded to multiples of this before comparison; values in the same bucket tie
/// and are ordered by name. Two values closer than this can still fall on either side of a bucket
/// edge, in which case the larger one ranks first.
pub const RANK_EPSILON: f64 = 1e-6;

/// Default number of ranked rows tracked per year.
pub const DEFAULT_WINDOW: usize = 10;

/// One country's population in one snapshot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CountryRow {
    /// Trimmed, non-empty country name.
    pub name: String,
    /// Population, finite and `>= 0`.
    pub pop: f64,
}

impl CountryRow {
    /// Build a row from a name and population.
    pub fn new(name: impl Into<String>, pop: f64) -> Self {
        Self {
            name: name.into(),
            pop,
        }
    }

    /// Placeholder row for a country with no data in a snapshot.
    pub fn absent(name: impl Into<String>) -> Self {
        Self::new(name, 0.0)
    }
}

fn quantize(pop: f64) -> f64 {
    (pop / RANK_EPSILON).round()
}

/// Ranking order: descending population, ascending name on (near-)ties.
///
/// Populations are quantized to [`RANK_EPSILON`] before comparison so the ordering stays total.
pub fn rank_order(a: &CountryRow, b: &CountryRow) -> Ordering {
    quantize(b.pop)
        .total_cmp(&quantize(a.pop))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort rows in place by [`rank_order`].
pub fn sort_rows(rows: &mut [CountryRow]) {
    rows.sort_by(rank_order);
}

/// Sort a copy of `rows` by [`rank_order`] and keep the first `n`.
pub fn ranked_prefix(rows: &[CountryRow], n: usize) -> Vec<CountryRow> {
    let mut out = rows.to_vec();
    sort_rows(&mut out);
    out.truncate(n);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
