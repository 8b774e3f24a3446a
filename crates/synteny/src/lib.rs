//! Annealed one-dimensional layout of genes across parallel sequence tracks.
//!
//! Elements (genes, transcripts) on several sequences are pulled towards
//! their homologs on the other sequences while every sequence keeps its
//! genomic order and a minimum visual spacing. The relaxed positions then
//! define piecewise-linear scales from genomic to compressed to viewport
//! coordinates.
//!
//! Map
//! - `model`: element/group arena and the grouping builder.
//! - `relax`: forces, order clamp, spacing pass, annealing engine.
//! - `scale`: linear scales and compression queries.
//! - `diagnostics`: order and crossing checks.
//! - `api`: curated surface and the one-call `run_layout`.
//!
//! The crate does no I/O; the `synteny` binary in `crates/cli` does.

pub mod api;
pub mod diagnostics;
pub mod error;
pub mod math;
pub mod model;
pub mod relax;
pub mod scale;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, Result};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{run_layout, sequence_scales, LayoutOutput, NamedScales};
    pub use crate::model::{GenomicElement, GroupSummary, Layout, PlacedElement, Span};
    pub use crate::relax::{
        AnnealCfg, AnnealReport, Annealer, ForceCfg, LayoutParams, Termination, Tuning,
    };
    pub use crate::scale::{build_scales, compression_factor, LinearScale, SequenceScales};
    pub use crate::{Error, Result};
}
