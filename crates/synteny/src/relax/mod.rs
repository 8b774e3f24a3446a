//! Annealed force relaxation over rigid node groups.
//!
//! Purpose
//! - Pull homologous groups on different sequences into alignment while each
//!   sequence keeps its order and a minimum spacing.
//!
//! Pieces
//! - `cfg`: tuning weights, force-curve constants, annealing schedule.
//! - `forces`: per-group force evaluation and contact propagation.
//! - `clamp`: order-preserving displacement bound.
//! - `spacing`: minimum-distance post-pass.
//! - `anneal`: the tick loop and termination rules.

mod anneal;
mod cfg;
mod clamp;
mod forces;
mod spacing;

pub use anneal::{AnnealReport, Annealer, Phase, Termination, TickMove};
pub use cfg::{AnnealCfg, ForceCfg, LayoutParams, Tuning};
pub use clamp::{clamp_displacement, ORDER_FRACTION, UNBOUNDED_MOVE};
pub use forces::{
    attracting_force, contraction_force, evaluate_forces, find_normal_forces, force_terms,
    homology_force, natural_repulsion, repelling_force, ForceTerms, Forces,
};
pub use spacing::{enforce_minimum_distance, minimum_distance_shifts};
