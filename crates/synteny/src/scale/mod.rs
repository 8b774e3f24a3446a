//! Piecewise-linear coordinate scales derived from a relaxed layout.
//!
//! Purpose
//! - Map genomic coordinates to compressed (relaxed) coordinates and from
//!   there into a viewport, per sequence.
//! - Answer renderer queries (compression ratio at a position, on-screen
//!   segment width) and re-window on zoom or pan without relaxing again.
//!
//! Degenerate input never errors: no features gives the identity, a single
//! breakpoint gives a translation, equal window bounds keep the old scale.

mod compress;
mod linear;

pub use compress::{
    build_scales, compression_factor, filter_unique_positions, gene_to_compression_scale,
    segment_window_width, update_viewport_range_bounds, Feature, SequenceScales,
};
pub use linear::LinearScale;

#[cfg(test)]
mod tests;
