use crate::data::normalize::{
    YearSlice, compute_years, index_by_year, latest_per_year, to_year_slices,
};
use crate::data::rankings::{RankingTable, create_stable_rankings};
use crate::data::schema::YearBlock;
use crate::foundation::core::{CountryRow, Year};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// Read-only, fully normalized population dataset.
///
/// Built once in a single batch; nothing mutates it afterwards, so it can be shared across threads
/// behind an [`Arc`] without locking.
#[derive(Clone, Debug)]
pub struct Dataset {
    years: Vec<Year>,
    by_year: BTreeMap<Year, Vec<CountryRow>>,
    max_pop: f64,
    window: usize,
    rankings: RankingTable,
    slices: Vec<YearSlice>,
}

impl Dataset {
    /// Normalize `blocks` and rank them for a `window`-sized view.
    ///
    /// When several blocks share a year, the last one replaces the others everywhere, including
    /// the axis maximum and the stable country set.
    #[tracing::instrument(skip(blocks), fields(blocks = blocks.len()))]
    pub fn build(blocks: &[YearBlock], window: usize) -> Self {
        let slices = latest_per_year(to_year_slices(blocks));
        let years = compute_years(&slices);
        let (by_year, max_pop) = index_by_year(&slices);
        let rankings = create_stable_rankings(&slices, window);
        tracing::debug!(years = years.len(), max_pop, "dataset built");
        Self {
            years,
            by_year,
            max_pop,
            window,
            rankings,
            slices,
        }
    }

    /// Dataset with no years, as produced by invalid input.
    pub fn empty(window: usize) -> Self {
        Self::build(&[], window)
    }

    /// Ascending list of distinct years.
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    /// First year of the dataset, if any.
    pub fn initial_year(&self) -> Option<Year> {
        self.years.first().copied()
    }

    /// Whether `year` has data.
    pub fn contains_year(&self, year: Year) -> bool {
        self.rankings.contains_key(&year)
    }

    /// Stable top-`window` rows for `year`; empty when the year is unknown.
    pub fn rows(&self, year: Year) -> &[CountryRow] {
        self.rankings.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every normalized row for `year`, before windowing; empty when the year is unknown.
    pub fn full_slice(&self, year: Year) -> &[CountryRow] {
        self.by_year.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Largest population across all years, `0` for an empty dataset.
    pub fn max_pop(&self) -> f64 {
        self.max_pop
    }

    /// Window size the ranking table was built for.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Full year to rows table, for handing every year to a renderer up front.
    pub fn all_rows(&self) -> &RankingTable {
        &self.rankings
    }

    /// Build a stable ranking table for another window size.
    pub fn rankings_for(&self, n: usize) -> RankingTable {
        if n == self.window {
            return self.rankings.clone();
        }
        create_stable_rankings(&self.slices, n)
    }
}

type Source = Box<dyn Fn() -> Vec<YearBlock> + Send + Sync>;

/// Single-owner lazy cache around a [`Dataset`].
///
/// The source runs at most once, on first access. Concurrent first callers wait for the one
/// in-flight build and then share its result.
pub struct DatasetCache {
    window: usize,
    source: Source,
    cell: OnceLock<Arc<Dataset>>,
}

impl DatasetCache {
    /// Cache that pulls validated blocks from `source` on first use.
    pub fn new<F>(window: usize, source: F) -> Self
    where
        F: Fn() -> Vec<YearBlock> + Send + Sync + 'static,
    {
        Self {
            window,
            source: Box::new(source),
            cell: OnceLock::new(),
        }
    }

    /// Cache over blocks that are already in memory.
    pub fn with_blocks(window: usize, blocks: Vec<YearBlock>) -> Self {
        Self::new(window, move || blocks.clone())
    }

    /// Build on first call, then return the shared dataset.
    pub fn get(&self) -> &Arc<Dataset> {
        if let Some(ds) = self.cell.get() {
            tracing::trace!("dataset cache hit");
            return ds;
        }
        self.cell.get_or_init(|| {
            tracing::debug!(window = self.window, "dataset cache miss, building");
            Arc::new(Dataset::build(&(self.source)(), self.window))
        })
    }

    /// Whether the dataset has been built yet.
    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }

    /// See [`Dataset::years`].
    pub fn years(&self) -> &[Year] {
        self.get().years()
    }

    /// See [`Dataset::rows`].
    pub fn rows(&self, year: Year) -> &[CountryRow] {
        self.get().rows(year)
    }

    /// See [`Dataset::max_pop`].
    pub fn max_pop(&self) -> f64 {
        self.get().max_pop()
    }

    /// See [`Dataset::all_rows`].
    pub fn all_rows(&self) -> &RankingTable {
        self.get().all_rows()
    }
}

impl std::fmt::Debug for DatasetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetCache")
            .field("window", &self.window)
            .field("built", &self.is_built())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/dataset.rs"]
mod tests;
