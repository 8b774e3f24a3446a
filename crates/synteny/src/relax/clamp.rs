//! Order-constraint clamp.
//!
//! A group may cover at most `ORDER_FRACTION` of the room left between its
//! boundary and `minimum_distance` short of each neighbor, and never more
//! than the heat-scaled maximum move. Since only one group moves per tick,
//! this keeps every gap at or above the minimum distance and the order intact.

use super::cfg::AnnealCfg;

/// Share of the remaining room a single move may consume.
pub const ORDER_FRACTION: f64 = 3.0 / 7.0;
/// Bound used on a side without a neighbor (before the heat cap).
pub const UNBOUNDED_MOVE: f64 = 1e8;

/// Clamp `delta` given the signed gaps to the left (negative) and right
/// (positive) neighbors. Zero in, zero out.
pub fn clamp_displacement(
    delta: f64,
    left_gap: Option<f64>,
    right_gap: Option<f64>,
    heat: f64,
    minimum_distance: f64,
    cfg: &AnnealCfg,
) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let max_move = (heat * cfg.max_move_per_heat).max(0.0);
    let room = |gap: Option<f64>, outward: f64| match gap {
        // `outward * gap` is the unsigned gap while order holds; an inverted
        // pair leaves no room at all.
        Some(g) => ((outward * g - minimum_distance).max(0.0) * ORDER_FRACTION).min(max_move),
        None => UNBOUNDED_MOVE.min(max_move),
    };
    if delta < 0.0 {
        delta.max(-room(left_gap, -1.0))
    } else {
        delta.min(room(right_gap, 1.0))
    }
}
