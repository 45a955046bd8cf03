use crate::animation::player::TweenPlayer;
use crate::animation::tween::{DEFAULT_TWEEN_MS, Tween};
use crate::chart::format::announcement;
use crate::data::dataset::Dataset;
use crate::data::rankings::RankingTable;
use crate::foundation::core::{CountryRow, DEFAULT_WINDOW, Year};
use crate::foundation::error::{BarRaceError, BarRaceResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Highest tick rate accepted by [`ChartOpts::validate`].
pub const MAX_FPS: u32 = 1000;

/// Options controlling a chart view.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChartOpts {
    /// Rows ranked and shown per year.
    pub window: usize,
    /// Length of one year-to-year transition in milliseconds.
    pub tween_ms: u64,
    /// Tick rate for driven transitions.
    pub fps: u32,
    /// Jump straight to each year's rows instead of tweening.
    pub reduced_motion: bool,
}

impl Default for ChartOpts {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            tween_ms: DEFAULT_TWEEN_MS,
            fps: 60,
            reduced_motion: false,
        }
    }
}

impl ChartOpts {
    /// Reject options no view can honor.
    pub fn validate(&self) -> BarRaceResult<()> {
        if self.window == 0 {
            return Err(BarRaceError::validation("window must be > 0"));
        }
        if self.tween_ms == 0 {
            return Err(BarRaceError::validation("tween_ms must be > 0"));
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(BarRaceError::validation(format!(
                "fps must be in 1..={MAX_FPS}, got {}",
                self.fps
            )));
        }
        Ok(())
    }

    /// Transition length as a [`Duration`].
    pub fn tween_duration(&self) -> Duration {
        Duration::from_millis(self.tween_ms)
    }
}

/// One chart view: the selected year and the animation towards it.
#[derive(Debug)]
pub struct ChartSession {
    dataset: Arc<Dataset>,
    opts: ChartOpts,
    rankings: RankingTable,
    year: Option<Year>,
    player: TweenPlayer,
}

impl ChartSession {
    /// Open a view on the dataset's first year, already settled.
    ///
    /// Rows are ranked for `opts.window`, which may differ from the window the dataset was built
    /// for.
    pub fn new(dataset: Arc<Dataset>, opts: ChartOpts) -> BarRaceResult<Self> {
        opts.validate()?;
        let rankings = dataset.rankings_for(opts.window);
        let year = dataset.initial_year();
        let initial = year
            .and_then(|y| rankings.get(&y))
            .cloned()
            .unwrap_or_default();
        let mut player = TweenPlayer::new(initial, opts.tween_duration());
        player.set_reduced_motion(opts.reduced_motion);
        Ok(Self {
            dataset,
            opts,
            rankings,
            year,
            player,
        })
    }

    /// Shared dataset.
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Active options.
    pub fn opts(&self) -> &ChartOpts {
        &self.opts
    }

    /// Stable rows of `year` at this view's window; empty when the year is unknown.
    pub fn rows(&self, year: Year) -> &[CountryRow] {
        self.rankings.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Selected year; `None` only for an empty dataset.
    pub fn year(&self) -> Option<Year> {
        self.year
    }

    /// Map a requested year onto one with data, falling back to the first year.
    pub fn resolve_year(&self, requested: Year) -> Option<Year> {
        if self.dataset.contains_year(requested) {
            Some(requested)
        } else {
            self.dataset.initial_year()
        }
    }

    /// Select a year and start animating towards its rows.
    ///
    /// Returns the generation and tween of the new transition, or `None` when the dataset is
    /// empty.
    pub fn select_year(&mut self, requested: Year, now: Instant) -> Option<(u64, Tween)> {
        let year = self.resolve_year(requested)?;
        if year != requested {
            tracing::debug!(requested, year, "unknown year, falling back");
        }
        self.year = Some(year);
        let next = self.rankings.get(&year).map(Vec::as_slice).unwrap_or(&[]);
        Some(self.player.start(next, self.opts.window, now))
    }

    /// Toggle reduced motion; applies from the next selection.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.opts.reduced_motion = reduced;
        self.player.set_reduced_motion(reduced);
    }

    /// Frame to display at `now`.
    pub fn frame_at(&mut self, now: Instant) -> &[CountryRow] {
        self.player.sample(now)
    }

    /// Last frame handed out.
    pub fn displayed(&self) -> &[CountryRow] {
        self.player.displayed()
    }

    /// Whether a transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.player.is_animating()
    }

    /// Leading row of the displayed frame.
    pub fn leader(&self) -> Option<&CountryRow> {
        self.player.displayed().first()
    }

    /// Accessibility announcement for the current state.
    pub fn announcement(&self) -> Option<String> {
        self.year.map(|y| announcement(y, self.leader()))
    }

    /// Shared axis bound for bar lengths.
    pub fn max_pop(&self) -> f64 {
        self.dataset.max_pop()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/session.rs"]
mod tests;
