//! Per-bar motion planning for renderers that animate bars themselves (FLIP style): the renderer
//! lays out the new frame, then asks how each bar should move from where it was drawn last.

use crate::animation::ease::Ease;
use crate::chart::format::format_grouped;
use crate::chart::scales::{BandScale, LinearScale};
use crate::foundation::core::CountryRow;
use std::collections::HashMap;

/// Vertical movement (px) below which a bar stays put, provided its width barely changes too.
pub const MIN_THRESHOLD_Y: f64 = 2.0;
/// Width change (px) below which a bar stays put, provided it barely moves vertically too.
pub const MIN_THRESHOLD_W: f64 = 4.0;
/// Length of one per-bar motion.
pub const BAR_MOTION_MS: u64 = 400;
/// Curve for per-bar translate/width motion.
pub const BAR_MOTION_EASE: Ease = Ease::OutCubic;
/// Opacity of bars whose value is zero.
pub const ZERO_VALUE_OPACITY: f64 = 0.3;

/// Where one bar is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarState {
    /// Band position.
    pub y: f64,
    /// Bar length.
    pub w: f64,
    /// Value shown in the label.
    pub val: f64,
}

/// Position every row with the given scales, keeping row order.
pub fn layout_bars(
    rows: &[CountryRow],
    x: &LinearScale,
    y: &BandScale,
) -> Vec<(String, BarState)> {
    rows.iter()
        .map(|r| {
            let state = BarState {
                y: y.position(&r.name),
                w: x.apply(r.pop),
                val: r.pop,
            };
            (r.name.clone(), state)
        })
        .collect()
}

/// Translate/scale keyframes for one bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformMotion {
    /// Starting band position.
    pub from_y: f64,
    /// Final band position.
    pub to_y: f64,
    /// Horizontal scale at the start, relative to the final width.
    pub scale_x: f64,
    /// Starting opacity.
    pub from_opacity: f64,
    /// Final opacity.
    pub to_opacity: f64,
}

/// Animation plan for one bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarMotion {
    /// Country name.
    pub name: String,
    /// Row translate/scale, if large enough to be visible.
    pub transform: Option<TransformMotion>,
    /// Rect width endpoints, if the width changes by more than a pixel.
    pub width: Option<(f64, f64)>,
    /// Label value endpoints, if the value changes.
    pub label: Option<(f64, f64)>,
}

/// Clamp a width to `min` so it can be used as a divisor.
pub fn safe_width(w: f64, min: f64) -> f64 {
    w.max(min)
}

/// Whether a change is too small to be worth animating.
pub fn should_skip(first: &BarState, last: &BarState) -> bool {
    (first.y - last.y).abs() < MIN_THRESHOLD_Y && (first.w - last.w).abs() < MIN_THRESHOLD_W
}

fn opacity(val: f64) -> f64 {
    if val == 0.0 { ZERO_VALUE_OPACITY } else { 1.0 }
}

/// Plan how each bar of `next` moves from its state in `prev`.
///
/// Nothing is planned for the first layout or under reduced motion. Bars new to `next` start
/// from their own final state.
pub fn plan_bar_motion(
    prev: &[(String, BarState)],
    next: &[(String, BarState)],
    reduced_motion: bool,
) -> Vec<BarMotion> {
    if prev.is_empty() || reduced_motion {
        return Vec::new();
    }
    let prev: HashMap<&str, &BarState> = prev.iter().map(|(n, s)| (n.as_str(), s)).collect();

    let mut out = Vec::new();
    for (name, last) in next {
        let first = prev.get(name.as_str()).copied().unwrap_or(last);
        if should_skip(first, last) {
            continue;
        }

        let dy = first.y - last.y;
        let scale_x = safe_width(first.w, 1.0) / safe_width(last.w, 1.0);
        let transform =
            (dy.abs() > 1.0 || (scale_x - 1.0).abs() > 0.01).then(|| TransformMotion {
                from_y: first.y,
                to_y: last.y,
                scale_x,
                from_opacity: opacity(first.val),
                to_opacity: opacity(last.val),
            });
        let width = ((first.w - last.w).abs() > 1.0)
            .then(|| (safe_width(first.w, 2.0), safe_width(last.w, 2.0)));
        let label = (first.val != last.val).then_some((first.val, last.val));

        out.push(BarMotion {
            name: name.clone(),
            transform,
            width,
            label,
        });
    }
    out
}

/// Label text while a value animates from `from` to `to` at progress `p`.
///
/// Bars growing in from zero or shrinking out to zero show `—` while the value rounds to zero.
pub fn value_label(from: f64, to: f64, p: f64) -> String {
    let k = Ease::InOutCubic.apply(p);
    if to == 0.0 || from == 0.0 {
        let v = if to == 0.0 {
            (from * (1.0 - k)).round()
        } else {
            (to * k).round()
        };
        if v == 0.0 {
            return "—".to_owned();
        }
        return format_grouped(v);
    }
    format_grouped((from + (to - from) * k).round())
}

#[cfg(test)]
#[path = "../../tests/unit/chart/bars.rs"]
mod tests;
