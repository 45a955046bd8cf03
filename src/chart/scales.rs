use std::collections::HashMap;

/// Maps a numeric domain onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    d0: f64,
    r0: f64,
    slope: f64,
}

impl LinearScale {
    /// Build a scale; a domain narrower than 1 is widened to 1 so the slope stays finite.
    pub fn new([d0, d1]: [f64; 2], [r0, r1]: [f64; 2]) -> Self {
        let slope = (r1 - r0) / (d1 - d0).max(1.0);
        Self { d0, r0, slope }
    }

    /// Scale for bar lengths against the shared `max_pop` axis.
    pub fn for_population(max_pop: f64, width: f64) -> Self {
        Self::new([0.0, max_pop.max(0.0)], [0.0, width])
    }

    /// Project a domain value.
    pub fn apply(&self, x: f64) -> f64 {
        self.r0 + (x - self.d0) * self.slope
    }
}

/// Evenly spaced bands for a list of names.
#[derive(Clone, Debug)]
pub struct BandScale {
    index: HashMap<String, usize>,
    offset: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Split `[r0, r1]` into one band per name, `padding` being the fraction of each step left
    /// empty.
    pub fn new<S: AsRef<str>>(domain: &[S], [r0, r1]: [f64; 2], padding: f64) -> Self {
        let n = domain.len().max(1) as f64;
        let step = (r1 - r0) / n;
        let bandwidth = step * (1.0 - padding.clamp(0.0, 1.0));
        let offset = r0 + (step - bandwidth) / 2.0;
        let index = domain
            .iter()
            .enumerate()
            .map(|(i, d)| (d.as_ref().to_owned(), i))
            .collect();
        Self {
            index,
            offset,
            step,
            bandwidth,
        }
    }

    /// Start of the band for `name`; unknown names map to the first band.
    pub fn position(&self, name: &str) -> f64 {
        let i = self.index.get(name).copied().unwrap_or(0);
        i as f64 * self.step + self.offset
    }

    /// Band thickness.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Distance between consecutive band starts.
    pub fn step(&self) -> f64 {
        self.step
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/scales.rs"]
mod tests;
