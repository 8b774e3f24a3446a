//! Minimum-distance enforcement.
//!
//! Scans a track left to right and accumulates a rightward shift so that each
//! boundary gap to the predecessor is at least `minimum_distance`. Shifts
//! never decrease along the track, nothing moves left, and a second pass is a
//! no-op.

use tracing::trace;

use crate::model::{Layout, Span};

/// Shortfalls below this are treated as already satisfied, which keeps the
/// pass idempotent under floating rounding.
const SHORTFALL_EPS: f64 = 1e-6;

/// Per-span rightward shift for one track sorted by start.
///
/// A span starting exactly where the last kept span starts is a duplicate:
/// it is skipped for the gap computation and inherits the running shift.
pub fn minimum_distance_shifts(spans: &[Span], minimum_distance: f64) -> Vec<f64> {
    let mut shifts = Vec::with_capacity(spans.len());
    let mut shift = 0.0;
    let mut previous: Option<Span> = None;
    for span in spans {
        match previous {
            Some(prev) if prev.start == span.start => {}
            Some(prev) => {
                let shortfall = minimum_distance - (span.start - prev.end);
                if shortfall > SHORTFALL_EPS {
                    shift += shortfall;
                }
                previous = Some(*span);
            }
            None => previous = Some(*span),
        }
        shifts.push(shift);
    }
    shifts
}

/// Enforce the spacing floor on every track; returns the total shift applied.
pub fn enforce_minimum_distance(layout: &mut Layout, minimum_distance: f64) -> f64 {
    let mut total = 0.0;
    for seq in 0..layout.tracks.len() {
        let spans: Vec<Span> = layout.tracks[seq]
            .iter()
            .map(|&g| layout.group_range(g))
            .collect();
        let shifts = minimum_distance_shifts(&spans, minimum_distance);
        for (k, shift) in shifts.into_iter().enumerate() {
            if shift > 0.0 {
                let g = layout.tracks[seq][k];
                layout.shift_group(g, shift);
                total += shift;
            }
        }
    }
    if total > 0.0 {
        trace!(total, "minimum_distance_shift");
    }
    total
}
