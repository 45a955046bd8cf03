use crate::data::schema::YearBlock;
use crate::foundation::core::{CountryRow, Year, sort_rows};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// One year's deduplicated, ranked rows.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct YearSlice {
    /// Year of the source block.
    pub year: Year,
    /// At most one row per name, sorted by [`crate::rank_order`].
    pub rows: Vec<CountryRow>,
}

/// Keep one row per name, preferring the larger population.
///
/// On equal populations the first occurrence is kept.
pub fn dedupe(rows: Vec<CountryRow>) -> Vec<CountryRow> {
    let mut by_name: BTreeMap<String, CountryRow> = BTreeMap::new();
    for row in rows {
        match by_name.entry(row.name.clone()) {
            Entry::Vacant(e) => {
                e.insert(row);
            }
            Entry::Occupied(mut e) => {
                if row.pop > e.get().pop {
                    e.insert(row);
                }
            }
        }
    }
    by_name.into_values().collect()
}

/// Normalize one validated block into a [`YearSlice`].
pub fn to_year_slice(block: &YearBlock) -> YearSlice {
    let rows = block
        .countries
        .iter()
        .map(|c| CountryRow::new(c.country.trim(), c.population))
        .collect();
    let mut rows = dedupe(rows);
    sort_rows(&mut rows);
    YearSlice {
        year: block.year,
        rows,
    }
}

/// Normalize every block, preserving source order.
pub fn to_year_slices(blocks: &[YearBlock]) -> Vec<YearSlice> {
    blocks.iter().map(to_year_slice).collect()
}

/// Keep only the last slice of each year, in ascending year order.
pub fn latest_per_year(slices: Vec<YearSlice>) -> Vec<YearSlice> {
    let mut by_year: BTreeMap<Year, YearSlice> = BTreeMap::new();
    for s in slices {
        by_year.insert(s.year, s);
    }
    by_year.into_values().collect()
}

/// Ascending, duplicate-free list of years.
pub fn compute_years(slices: &[YearSlice]) -> Vec<Year> {
    let mut years: Vec<Year> = slices.iter().map(|s| s.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Index slices by year and find the largest population in one pass.
///
/// Expects one slice per year (see [`latest_per_year`]).
pub fn index_by_year(slices: &[YearSlice]) -> (BTreeMap<Year, Vec<CountryRow>>, f64) {
    let mut by_year = BTreeMap::new();
    let mut max_pop = 0.0_f64;
    for s in slices {
        for r in &s.rows {
            if r.pop > max_pop {
                max_pop = r.pop;
            }
        }
        by_year.insert(s.year, s.rows.clone());
    }
    (by_year, max_pop)
}

#[cfg(test)]
#[path = "../../tests/unit/data/normalize.rs"]
mod tests;
