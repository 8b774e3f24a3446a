//! Force evaluator: tension, compression repulsion, long-range repulsion,
//! contraction and homology pull on one rigid group.
//!
//! Sign convention: a positive force moves the group right (towards larger
//! positions). Per-side gaps follow `Layout::gap`: negative on the left,
//! positive on the right while order holds.

use tracing::warn;

use super::cfg::{ForceCfg, Tuning};
use crate::math::{clamped_log2, sign, sqrt_abs};
use crate::model::{GroupId, Layout, Side};

/// Net force on a group: after the per-side contact clamp, and before it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Forces {
    pub with_normal: f64,
    pub raw: f64,
}

/// Partial sums, exposed for inspection in tests and diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ForceTerms {
    pub tension: f64,
    pub contraction: f64,
    pub repulsion: f64,
    pub homology: f64,
}

impl ForceTerms {
    #[inline]
    pub fn weighted(&self, t: &Tuning) -> f64 {
        t.scale_x_force * self.tension
            + t.scale_contraction * self.contraction
            + t.scale_repulsion * self.repulsion
            + t.scale_y_force * self.homology
    }
}

/// String tension pulling a gap back towards its expected size.
///
/// Linear for small deviations, proportional to the relative stretch up to
/// twice the expected gap, then strongly damped and logarithmic.
pub fn attracting_force(gap: f64, expected: f64, cfg: &ForceCfg) -> f64 {
    let deviation = gap - expected;
    if deviation.abs() < cfg.small_deviation {
        return deviation;
    }
    if expected == 0.0 {
        warn!(gap, "zero expected gap on a tension link");
        return 0.0;
    }
    let stretch = deviation.abs() / expected.abs();
    let direction = sign(expected);
    if stretch <= 1.0 {
        stretch * direction
    } else {
        stretch.log2() * direction * cfg.far_tension_damping
    }
}

/// Push-back when a gap is smaller than expected: `gain · (1 − |d−e|/|e|) · −sign(d)`.
pub fn repelling_force(gap: f64, expected: f64, cfg: &ForceCfg) -> f64 {
    if expected == 0.0 {
        warn!(gap, "zero expected gap on a repulsion link");
        return 0.0;
    }
    let compressed = 1.0 - (gap - expected).abs() / expected.abs();
    compressed * cfg.repulsion_gain * -sign(gap)
}

/// Contraction towards the neighbor: `sqrt(|d|) · sign(d)`.
#[inline]
pub fn contraction_force(gap: f64) -> f64 {
    sqrt_abs(gap) * sign(gap)
}

/// Weak long-range repulsion `−sign(d) / |d|^(1/10)`.
#[inline]
pub fn natural_repulsion(gap: f64) -> f64 {
    if gap == 0.0 {
        return 0.0;
    }
    -sign(gap) / gap.abs().powf(0.1)
}

/// Homology pull towards a peer `delta` away.
#[inline]
pub fn homology_force(delta: f64, cfg: &ForceCfg) -> f64 {
    clamped_log2(delta) * sign(delta) * cfg.homology_gain
}

#[inline]
pub(crate) fn is_touching(gap: f64, tuning: &Tuning, cfg: &ForceCfg) -> bool {
    gap.abs() <= tuning.minimum_distance + cfg.touch_tolerance
}

/// Unweighted force terms on `id`.
pub fn force_terms(layout: &Layout, id: GroupId, heat: f64, cfg: &ForceCfg) -> ForceTerms {
    let mut terms = ForceTerms::default();
    let own = layout.group_range(id);
    let group = layout.group(id);

    for &peer in &group.y {
        terms.homology += homology_force(layout.group_range(peer).start - own.start, cfg);
    }

    for side in [Side::Left, Side::Right] {
        let (Some(link), Some(gap)) = (group.x.get(side), layout.gap(id, side)) else {
            continue;
        };
        let expected = link.expected_gap;
        terms.tension += if sign(expected) != sign(gap) {
            warn!(group = id.0, ?side, gap, expected, heat, "order flipped");
            attracting_force(gap, expected, cfg)
        } else if gap.abs() < expected.abs() {
            repelling_force(gap, expected, cfg)
        } else {
            attracting_force(gap, expected, cfg)
        };
        terms.contraction += contraction_force(gap);
        terms.repulsion += natural_repulsion(gap);
    }
    terms
}

/// Net force on `id`, with the per-side normal-contact clamp applied.
///
/// A side whose neighbor is touching zeroes the force if it points into that
/// neighbor; each side is checked independently.
pub fn evaluate_forces(
    layout: &Layout,
    id: GroupId,
    heat: f64,
    tuning: &Tuning,
    cfg: &ForceCfg,
) -> Forces {
    let raw = force_terms(layout, id, heat, cfg).weighted(tuning);
    let mut with_normal = raw;
    for side in [Side::Left, Side::Right] {
        let Some(gap) = layout.gap(id, side) else {
            continue;
        };
        if is_touching(gap, tuning, cfg) && sign(with_normal) == side.direction() {
            with_normal = 0.0;
        }
    }
    Forces { with_normal, raw }
}

/// Force transmitted through chains of touching neighbors.
///
/// Walks each side iteratively, at most `max_depth` links, while consecutive
/// groups touch. Every chain member contributes the part of its own raw force
/// that pushes towards `id` (rightwards from the left chain, leftwards from
/// the right chain).
pub fn find_normal_forces(
    layout: &Layout,
    id: GroupId,
    heat: f64,
    tuning: &Tuning,
    cfg: &ForceCfg,
    max_depth: usize,
) -> f64 {
    let mut total = 0.0;
    for side in [Side::Left, Side::Right] {
        let mut current = id;
        for _ in 0..max_depth {
            let (Some(link), Some(gap)) = (layout.group(current).x.get(side), layout.gap(current, side))
            else {
                break;
            };
            if !is_touching(gap, tuning, cfg) {
                break;
            }
            let push = evaluate_forces(layout, link.neighbor, heat, tuning, cfg).raw;
            total += match side {
                Side::Left => push.max(0.0),
                Side::Right => push.min(0.0),
            };
            current = link.neighbor;
        }
    }
    total
}
