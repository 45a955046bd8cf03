//! Barrace turns yearly country-population records into the data behind an animated bar chart
//! race.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: untyped JSON `[{Year, Countries: [{Country, Population}]}]` -> [`YearBlock`]s.
//!    Schema violations fail closed to an empty dataset and are reported through `tracing`.
//! 2. **Normalize**: each block -> [`YearSlice`] (trimmed names, one row per name, ranked).
//! 3. **Rank**: all slices + window `N` -> a year-indexed table over a stable country set, so bars
//!    do not pop in and out between years.
//! 4. **Cache**: [`DatasetCache`] builds the [`Dataset`] once and shares it read-only.
//! 5. **Tween**: [`Tween`] / [`TweenPlayer`] interpolate between two snapshots with a cubic
//!    ease-in-out, re-ranking every frame; a generation token cancels superseded transitions.
//!
//! The crate provides data, never pixels: renderers consume [`CountryRow`] frames plus
//! [`Dataset::max_pop`] as the shared axis bound.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod chart;
mod data;
mod foundation;

pub use animation::ease::{Ease, ease_in_out_cubic};
pub use animation::player::{
    ChannelSink, FrameSink, GenerationToken, InMemorySink, TickEvent, TickOutcome, TweenPlayer,
    run_transition, spawn_transition,
};
pub use animation::tween::{DEFAULT_TWEEN_MS, Tween, frame_interval};
pub use chart::bars::{
    BAR_MOTION_EASE, BAR_MOTION_MS, BarMotion, BarState, MIN_THRESHOLD_W, MIN_THRESHOLD_Y,
    TransformMotion, ZERO_VALUE_OPACITY, layout_bars, plan_bar_motion, safe_width, should_skip,
    value_label,
};
pub use chart::format::{announcement, format_compact, format_grouped};
pub use chart::scales::{BandScale, LinearScale};
pub use chart::session::{ChartOpts, ChartSession, MAX_FPS};
pub use data::dataset::{Dataset, DatasetCache};
pub use data::normalize::{
    YearSlice, compute_years, dedupe, index_by_year, latest_per_year, to_year_slice,
    to_year_slices,
};
pub use data::rankings::{RankingTable, create_stable_rankings, stable_country_set};
pub use data::schema::{
    RawCountry, SchemaError, SchemaErrors, SchemaPathElem, YearBlock, safe_parse_dataset,
    validate_dataset,
};
pub use data::source::{load_from_path, load_from_reader, load_from_str};
pub use foundation::core::{
    CountryRow, DEFAULT_WINDOW, RANK_EPSILON, Year, rank_order, ranked_prefix, sort_rows,
};
pub use foundation::error::{BarRaceError, BarRaceResult};
