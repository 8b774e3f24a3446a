//! Tuning and schedule parameters, threaded explicitly through every call.
//!
//! Policy
//! - Defaults reproduce the reference behavior; every constant that shapes
//!   the force curves is a field here, not a literal in the formulas.
//! - All structs deserialize with `#[serde(default)]` so partial JSON files
//!   override only what they name.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// User-facing force weights and the spacing floor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Weight of the per-side string tension / compression repulsion.
    pub scale_x_force: f64,
    /// Weight of the homology alignment pull (dominant by default).
    pub scale_y_force: f64,
    /// Weight of the contraction ("gravity") term.
    pub scale_contraction: f64,
    /// Weight of the weak long-range repulsion.
    pub scale_repulsion: f64,
    /// Minimum boundary gap between neighbors on one sequence; also the
    /// touching distance for contact handling.
    pub minimum_distance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scale_x_force: 1.0,
            scale_y_force: 1000.0,
            scale_contraction: 100.0,
            scale_repulsion: 1.0,
            minimum_distance: 1000.0,
        }
    }
}

/// Shape constants of the individual force curves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceCfg {
    /// Multiplier on `log2(|Δ|)` for each homology peer.
    pub homology_gain: f64,
    /// Peak of the compression repulsion (at the expected gap).
    pub repulsion_gain: f64,
    /// Damping of the tension once a gap is stretched beyond twice its
    /// expected size.
    pub far_tension_damping: f64,
    /// Below this deviation from the expected gap the tension is linear.
    pub small_deviation: f64,
    /// Slack added to `minimum_distance` when deciding whether two
    /// neighbors touch.
    pub touch_tolerance: f64,
}

impl Default for ForceCfg {
    fn default() -> Self {
        Self {
            homology_gain: 100.0,
            repulsion_gain: 1e5,
            far_tension_damping: 1e-5,
            small_deviation: 10.0,
            touch_tolerance: 1e-6,
        }
    }
}

/// Annealing schedule, sampling, and termination caps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealCfg {
    pub from_heat: f64,
    /// Terminate once the heat falls below this.
    pub to_heat: f64,
    /// Heat multiplier applied every `ticks_per_heat_step` ticks.
    pub heat_decay: f64,
    pub ticks_per_heat_step: u32,
    /// Candidates drawn per tick (without replacement).
    pub sample_size: usize,
    pub seed: u64,
    /// A nonzero winning move smaller than this ends the run.
    pub min_displacement: f64,
    /// Moves below this count toward `low_movement_patience`.
    pub low_movement_threshold: f64,
    pub low_movement_patience: u32,
    pub max_iterations: u64,
    /// Wall-clock budget; `None` disables the check.
    pub time_budget_ms: Option<u64>,
    /// Maximum move per tick is `heat * max_move_per_heat`.
    pub max_move_per_heat: f64,
    /// Ceiling for the per-group adaptive temperature.
    pub max_temp_scale: f64,
    /// Depth bound for the contact-force walk on each side.
    pub contact_depth: usize,
    /// Run the order check after every tick (logs and counts inversions).
    pub check_order: bool,
}

impl Default for AnnealCfg {
    fn default() -> Self {
        Self {
            from_heat: 1000.0,
            to_heat: 0.1,
            heat_decay: 0.99,
            ticks_per_heat_step: 20,
            sample_size: 20,
            seed: 0,
            min_displacement: 1e-3,
            low_movement_threshold: 1.0,
            low_movement_patience: 2000,
            max_iterations: 1_000_000,
            time_budget_ms: Some(30_000),
            max_move_per_heat: 100.0,
            max_temp_scale: 1000.0,
            contact_depth: 16,
            check_order: true,
        }
    }
}

/// Everything one relaxation run needs besides the elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    pub tuning: Tuning,
    pub anneal: AnnealCfg,
    pub forces: ForceCfg,
}

impl LayoutParams {
    pub fn validate(&self) -> Result<()> {
        let bad = |field, reason| Err(Error::InvalidConfig { field, reason });
        let t = &self.tuning;
        for (field, v) in [
            ("tuning.scale_x_force", t.scale_x_force),
            ("tuning.scale_y_force", t.scale_y_force),
            ("tuning.scale_contraction", t.scale_contraction),
            ("tuning.scale_repulsion", t.scale_repulsion),
            ("tuning.minimum_distance", t.minimum_distance),
        ] {
            if !v.is_finite() || v < 0.0 {
                return bad(field, "must be finite and non-negative");
            }
        }
        let a = &self.anneal;
        if !(a.from_heat.is_finite() && a.from_heat > 0.0) {
            return bad("anneal.from_heat", "must be positive");
        }
        if !(a.to_heat >= 0.0 && a.to_heat <= a.from_heat) {
            return bad("anneal.to_heat", "must lie in [0, from_heat]");
        }
        if !(a.heat_decay > 0.0 && a.heat_decay < 1.0) {
            return bad("anneal.heat_decay", "must lie in (0, 1)");
        }
        if a.ticks_per_heat_step == 0 {
            return bad("anneal.ticks_per_heat_step", "must be positive");
        }
        if a.sample_size == 0 {
            return bad("anneal.sample_size", "must be positive");
        }
        if !(a.max_move_per_heat.is_finite() && a.max_move_per_heat > 0.0) {
            return bad("anneal.max_move_per_heat", "must be positive");
        }
        if !(a.max_temp_scale >= 1.0) {
            return bad("anneal.max_temp_scale", "must be at least 1");
        }
        if a.min_displacement < 0.0 || a.low_movement_threshold < 0.0 {
            return bad("anneal.min_displacement", "thresholds must be non-negative");
        }
        let f = &self.forces;
        if !(f.small_deviation >= 0.0 && f.touch_tolerance >= 0.0) {
            return bad("forces.small_deviation", "must be non-negative");
        }
        Ok(())
    }
}
