//! Curated surface for callers (binary, benches, demos).
//!
//! - Re-exports the pieces a caller usually needs in one place.
//! - `run_layout` is the whole pipeline: validate, group, anneal, flatten.
//! - `sequence_scales` turns a finished layout into per-sequence scales.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use crate::diagnostics::{check_node_order, crossing_homology_groups, OrderViolation};
pub use crate::model::{
    center_on_homology_group, GenomicElement, GroupSummary, Layout, PlacedElement, Span,
};
pub use crate::relax::{
    enforce_minimum_distance, AnnealCfg, AnnealReport, Annealer, ForceCfg, LayoutParams, Phase,
    Termination, Tuning,
};
pub use crate::scale::{
    build_scales, compression_factor, segment_window_width, update_viewport_range_bounds,
    LinearScale, SequenceScales,
};

use crate::error::Result;

/// Result of one relaxation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutOutput {
    /// Elements in track order with their relaxed positions.
    pub elements: Vec<PlacedElement>,
    pub groups: Vec<GroupSummary>,
    pub report: AnnealReport,
}

/// Scales of one sequence, tagged with its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedScales {
    pub sequence_id: String,
    #[serde(flatten)]
    pub scales: SequenceScales,
}

/// Build the layout, relax it to termination and flatten the result.
///
/// `anchor` re-centers every sequence on the first element of that homology
/// group before relaxing.
pub fn run_layout(
    elements: &[GenomicElement],
    anchor: Option<&str>,
    params: LayoutParams,
) -> Result<LayoutOutput> {
    let layout = Layout::build(elements, anchor)?;
    let (layout, report) = Annealer::new(layout, params)?.run();
    debug!(
        elements = elements.len(),
        groups = layout.groups.len(),
        iterations = report.iterations,
        termination = ?report.termination,
        "layout_done"
    );
    Ok(LayoutOutput {
        elements: layout.placed_elements(),
        groups: layout.group_summaries(),
        report,
    })
}

/// Per-sequence scales from group summaries, in first-seen sequence order.
///
/// Every sequence shares the same compressed window and viewport.
pub fn sequence_scales(
    groups: &[GroupSummary],
    compressed_edges: [f64; 2],
    viewport_edges: [f64; 2],
) -> Vec<NamedScales> {
    let mut order: Vec<&str> = Vec::new();
    for g in groups {
        if !order.contains(&g.sequence_id.as_str()) {
            order.push(&g.sequence_id);
        }
    }
    order
        .into_iter()
        .map(|sequence_id| {
            let features: Vec<GroupSummary> = groups
                .iter()
                .filter(|g| g.sequence_id == sequence_id)
                .cloned()
                .collect();
            NamedScales {
                sequence_id: sequence_id.to_string(),
                scales: build_scales(&features, compressed_edges, viewport_edges),
            }
        })
        .collect()
}
