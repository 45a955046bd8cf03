use crate::data::normalize::YearSlice;
use crate::foundation::core::{CountryRow, Year, sort_rows};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Year-indexed top-`n` table over a fixed country set.
pub type RankingTable = BTreeMap<Year, Vec<CountryRow>>;

/// Union of every year's top-`n` names, in ascending order.
pub fn stable_country_set(slices: &[YearSlice], n: usize) -> BTreeSet<String> {
    slices
        .iter()
        .flat_map(|s| s.rows.iter().take(n))
        .map(|r| r.name.clone())
        .collect()
}

/// Build the top-`n` table in which every year ranks the same country set.
///
/// Countries missing from a year rank with population 0. Each year holds exactly `n` rows unless
/// fewer than `n` countries ever reach any year's top `n`, in which case every year holds the
/// whole (short) set.
#[tracing::instrument(skip(slices), fields(years = slices.len()))]
pub fn create_stable_rankings(slices: &[YearSlice], n: usize) -> RankingTable {
    let stable = stable_country_set(slices, n);
    tracing::debug!(stable = stable.len(), "stable country set");

    let mut rankings = RankingTable::new();
    for s in slices {
        let year_pops: HashMap<&str, f64> =
            s.rows.iter().map(|r| (r.name.as_str(), r.pop)).collect();
        let mut rows: Vec<CountryRow> = stable
            .iter()
            .map(|name| match year_pops.get(name.as_str()) {
                Some(&pop) => CountryRow::new(name.as_str(), pop),
                None => CountryRow::absent(name.as_str()),
            })
            .collect();
        sort_rows(&mut rows);
        rows.truncate(n);
        rankings.insert(s.year, rows);
    }
    rankings
}

#[cfg(test)]
#[path = "../../tests/unit/data/rankings.rs"]
mod tests;
