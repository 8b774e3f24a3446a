//! Annealing engine: the `Initialized → Annealing → Terminated` state machine.
//!
//! Each tick draws a bounded random sample of groups, computes their clamped
//! displacements, and moves only the single most stressed one. Heat decays
//! geometrically in steps; per-group temperatures adapt to damp oscillation.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::cfg::LayoutParams;
use super::clamp::clamp_displacement;
use super::forces::{evaluate_forces, find_normal_forces};
use super::spacing::enforce_minimum_distance;
use crate::diagnostics::check_node_order;
use crate::error::Result;
use crate::math::sign;
use crate::model::{GroupId, Layout, Side};

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Nothing to relax.
    Empty,
    /// No sampled candidate could move.
    NoMovement,
    /// The winning move fell below `min_displacement`.
    Converged,
    /// Heat dropped below `to_heat`.
    Cooled,
    /// `low_movement_patience` consecutive small moves.
    Stalled,
    IterationCap,
    TimeBudget,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Annealing,
    Terminated(Termination),
}

/// Summary of a finished (or interrupted) run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnealReport {
    pub iterations: u64,
    pub final_heat: f64,
    pub termination: Option<Termination>,
    /// Order inversions seen by the post-tick check (should stay 0).
    pub order_violations: u64,
    pub elapsed_ms: u64,
}

/// The move chosen in one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickMove {
    pub group: GroupId,
    pub displacement: f64,
}

/// Owns the layout for the duration of one relaxation run.
pub struct Annealer {
    layout: Layout,
    params: LayoutParams,
    rng: StdRng,
    heat: f64,
    phase: Phase,
    iterations: u64,
    ticks_at_heat: u32,
    low_streak: u32,
    order_violations: u64,
    started: Option<Instant>,
}

impl Annealer {
    pub fn new(layout: Layout, params: LayoutParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            layout,
            rng: StdRng::seed_from_u64(params.anneal.seed),
            heat: params.anneal.from_heat,
            params,
            phase: Phase::Initialized,
            iterations: 0,
            ticks_at_heat: 0,
            low_streak: 0,
            order_violations: 0,
            started: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn heat(&self) -> f64 {
        self.heat
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn into_layout(self) -> Layout {
        self.layout
    }

    pub fn report(&self) -> AnnealReport {
        AnnealReport {
            iterations: self.iterations,
            final_heat: self.heat,
            termination: match self.phase {
                Phase::Terminated(t) => Some(t),
                _ => None,
            },
            order_violations: self.order_violations,
            elapsed_ms: self
                .started
                .map(|s| s.elapsed().as_millis() as u64)
                .unwrap_or(0),
        }
    }

    /// Run to termination and hand back the relaxed layout.
    pub fn run(mut self) -> (Layout, AnnealReport) {
        debug!(
            groups = self.layout.groups.len(),
            heat = self.heat,
            seed = self.params.anneal.seed,
            "anneal_start"
        );
        while self.tick().is_none() {}
        let report = self.report();
        debug!(
            iterations = report.iterations,
            final_heat = report.final_heat,
            termination = ?report.termination,
            order_violations = report.order_violations,
            elapsed_ms = report.elapsed_ms,
            "anneal_done"
        );
        (self.layout, report)
    }

    /// Advance one tick. Returns the termination reason once the run is over.
    pub fn tick(&mut self) -> Option<Termination> {
        match self.phase {
            Phase::Terminated(t) => return Some(t),
            Phase::Initialized => self.begin(),
            Phase::Annealing => {}
        }
        if self.layout.groups.is_empty() {
            return self.terminate(Termination::Empty);
        }

        let Some(winner) = self.select_move() else {
            return self.terminate(Termination::NoMovement);
        };
        self.apply(winner);
        self.iterations += 1;

        self.ticks_at_heat += 1;
        let cfg = self.params.anneal;
        if self.ticks_at_heat >= cfg.ticks_per_heat_step {
            self.heat *= cfg.heat_decay;
            self.ticks_at_heat = 0;
        }

        enforce_minimum_distance(&mut self.layout, self.params.tuning.minimum_distance);
        if cfg.check_order {
            let violations = check_node_order(&self.layout);
            if !violations.is_empty() {
                warn!(
                    count = violations.len(),
                    first = ?violations[0],
                    "order inversion after tick"
                );
                self.order_violations += violations.len() as u64;
            }
        }
        trace!(
            iteration = self.iterations,
            group = winner.group.0,
            displacement = winner.displacement,
            heat = self.heat,
            "tick"
        );

        let step = winner.displacement.abs();
        if step < cfg.low_movement_threshold {
            self.low_streak += 1;
        } else {
            self.low_streak = 0;
        }

        if step < cfg.min_displacement {
            return self.terminate(Termination::Converged);
        }
        if self.heat < cfg.to_heat {
            return self.terminate(Termination::Cooled);
        }
        if self.low_streak >= cfg.low_movement_patience {
            return self.terminate(Termination::Stalled);
        }
        if self.iterations >= cfg.max_iterations {
            return self.terminate(Termination::IterationCap);
        }
        if let (Some(budget), Some(started)) = (cfg.time_budget_ms, self.started) {
            if started.elapsed() >= Duration::from_millis(budget) {
                return self.terminate(Termination::TimeBudget);
            }
        }
        None
    }

    fn begin(&mut self) {
        self.phase = Phase::Annealing;
        self.started = Some(Instant::now());
        enforce_minimum_distance(&mut self.layout, self.params.tuning.minimum_distance);
    }

    fn terminate(&mut self, reason: Termination) -> Option<Termination> {
        self.phase = Phase::Terminated(reason);
        Some(reason)
    }

    /// Clamped displacement a group would take at the current heat.
    pub fn proposed_displacement(&self, id: GroupId) -> f64 {
        let LayoutParams {
            tuning,
            anneal,
            forces,
        } = &self.params;
        let direct = evaluate_forces(&self.layout, id, self.heat, tuning, forces);
        let contact =
            find_normal_forces(&self.layout, id, self.heat, tuning, forces, anneal.contact_depth);
        let force = direct.with_normal + contact;
        let raw = force * self.layout.group(id).temp_scale * (self.heat / 1000.0);
        if !raw.is_finite() {
            warn!(group = id.0, force, "non-finite displacement dropped");
            return 0.0;
        }
        clamp_displacement(
            raw,
            self.layout.gap(id, Side::Left),
            self.layout.gap(id, Side::Right),
            self.heat,
            tuning.minimum_distance,
            anneal,
        )
    }

    /// Largest clamped nonzero displacement among a random sample of groups.
    fn select_move(&mut self) -> Option<TickMove> {
        let n = self.layout.groups.len();
        let amount = self.params.anneal.sample_size.min(n);
        let sample = rand::seq::index::sample(&mut self.rng, n, amount);
        let mut best: Option<TickMove> = None;
        for i in sample.iter() {
            let group = GroupId(i);
            let displacement = self.proposed_displacement(group);
            if displacement == 0.0 {
                continue;
            }
            if best.map_or(true, |b| displacement.abs() > b.displacement.abs()) {
                best = Some(TickMove {
                    group,
                    displacement,
                });
            }
        }
        best
    }

    fn apply(&mut self, m: TickMove) {
        let g = self.layout.group(m.group);
        let previous = sign(g.last_move);
        let current = sign(m.displacement);
        let mut temp = g.temp_scale;
        if previous != 0.0 {
            temp *= if previous == current { 1.5 } else { 0.5 };
        }
        let temp = temp.min(self.params.anneal.max_temp_scale);
        self.layout.shift_group(m.group, m.displacement);
        self.layout.record_move(m.group, m.displacement, temp);
    }
}
