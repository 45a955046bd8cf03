use crate::animation::ease::Ease;
use crate::foundation::core::{CountryRow, ranked_prefix, sort_rows};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default transition length between two year snapshots.
pub const DEFAULT_TWEEN_MS: u64 = 900;

/// Interpolation between two ranked snapshots.
///
/// Pure: a frame depends only on the two endpoints and the elapsed time.
#[derive(Clone, Debug)]
pub struct Tween {
    prev: Vec<CountryRow>,
    next: Vec<CountryRow>,
    // Union of names with (prev, next) populations; absent sides are 0.
    pops: BTreeMap<String, (f64, f64)>,
    target: usize,
    duration: Duration,
    ease: Ease,
}

impl Tween {
    /// Tween from `prev` to `next`, emitting at most `target` rows per frame.
    pub fn new(
        prev: &[CountryRow],
        next: &[CountryRow],
        target: usize,
        duration: Duration,
    ) -> Self {
        let mut pops: BTreeMap<String, (f64, f64)> = BTreeMap::new();
        for r in prev {
            pops.entry(r.name.clone()).or_default().0 = r.pop;
        }
        for r in next {
            pops.entry(r.name.clone()).or_default().1 = r.pop;
        }
        Self {
            prev: prev.to_vec(),
            next: next.to_vec(),
            pops,
            target,
            duration,
            ease: Ease::InOutCubic,
        }
    }

    /// Replace the easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Transition length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Maximum rows per frame.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Linear progress in `[0, 1]`; a zero duration is complete immediately.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Whether the transition has reached its end at `elapsed`.
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    /// Frame at wall-clock offset `elapsed` from the start of the transition.
    pub fn frame_at(&self, elapsed: Duration) -> Vec<CountryRow> {
        self.frame_at_progress(self.progress(elapsed))
    }

    /// Frame at linear progress `p`.
    ///
    /// `p <= 0` is exactly the ranked `prev` and `p >= 1` exactly the ranked `next`; in between,
    /// every name in either snapshot is interpolated, rounded, re-ranked and truncated.
    pub fn frame_at_progress(&self, p: f64) -> Vec<CountryRow> {
        if p <= 0.0 {
            return self.first_frame();
        }
        if p >= 1.0 {
            return self.final_frame();
        }
        let k = self.ease.apply(p);
        let mut rows: Vec<CountryRow> = self
            .pops
            .iter()
            .map(|(name, &(a, b))| CountryRow::new(name.as_str(), (a + (b - a) * k).round()))
            .collect();
        sort_rows(&mut rows);
        rows.truncate(self.target);
        rows
    }

    /// Ranked, truncated starting snapshot.
    pub fn first_frame(&self) -> Vec<CountryRow> {
        ranked_prefix(&self.prev, self.target)
    }

    /// Ranked, truncated end snapshot.
    pub fn final_frame(&self) -> Vec<CountryRow> {
        ranked_prefix(&self.next, self.target)
    }

    /// Sample the whole transition at a fixed frame rate, ending with the final frame.
    ///
    /// Yields `ceil(duration * fps) + 1` evenly spaced frames, the last one at exactly `duration`.
    /// A zero duration yields the final frame alone.
    pub fn sample_frames(&self, fps: u32) -> Vec<Vec<CountryRow>> {
        let count = frame_count(self.duration, fps);
        if count == 0 {
            return vec![self.final_frame()];
        }
        (0..=count)
            .map(|i| self.frame_at_progress(i as f64 / count as f64))
            .collect()
    }
}

/// Number of tick intervals needed to cover `duration` at `fps`.
fn frame_count(duration: Duration, fps: u32) -> u64 {
    if duration.is_zero() {
        return 0;
    }
    let ticks = (duration.as_secs_f64() * f64::from(fps.max(1)) - 1e-9).ceil();
    ticks.max(1.0) as u64
}

/// Time between ticks at `fps` frames per second (`fps` is clamped to at least 1).
pub fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
