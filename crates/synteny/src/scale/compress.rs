//! Coordinate compression: genomic → compressed → viewport scales built from a
//! relaxed layout, plus the queries renderers run on zoom and pan.
//!
//! Model
//! - `gene_to_compression` maps each feature's genomic start/end to its
//!   relaxed start/end (features are rigid, so widths match).
//! - `gene_to_window` projects every compressed breakpoint linearly into the
//!   viewport and adds the genomic images of the window edges, pinned to the
//!   viewport edges. Off-screen features keep their real compressed spacing.
//! - `update_viewport_range_bounds` (zoom/pan) keeps only the breakpoints
//!   strictly inside the new window.

use serde::{Deserialize, Serialize};

use super::linear::LinearScale;
use crate::math::bracket;
use crate::model::{GroupSummary, PlacedElement, Span};

/// Anything with a genomic extent and a relaxed extent.
pub trait Feature {
    fn original(&self) -> Span;
    fn current(&self) -> Span;
}

impl Feature for GroupSummary {
    fn original(&self) -> Span {
        self.original
    }
    fn current(&self) -> Span {
        self.current
    }
}

impl Feature for PlacedElement {
    fn original(&self) -> Span {
        Span::new(self.start, self.end)
    }
    fn current(&self) -> Span {
        Span::new(self.position, self.position + self.width)
    }
}

/// The scale pair for one sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceScales {
    pub gene_to_compression: LinearScale,
    pub gene_to_window: LinearScale,
}

/// Keep the first feature per genomic start, ordered by that start.
pub fn filter_unique_positions<F: Feature>(features: &[F]) -> Vec<&F> {
    let mut unique: Vec<&F> = Vec::with_capacity(features.len());
    for f in features {
        if !unique.iter().any(|u| u.original().start == f.original().start) {
            unique.push(f);
        }
    }
    unique.sort_by(|a, b| a.original().start.total_cmp(&b.original().start));
    unique
}

/// Genomic → compressed scale of one sequence.
///
/// No features gives the identity; a single distinct breakpoint gives a
/// unit-slope translation through it.
pub fn gene_to_compression_scale<F: Feature>(features: &[F]) -> LinearScale {
    let unique = filter_unique_positions(features);
    let mut domain = Vec::with_capacity(unique.len() * 2);
    let mut range = Vec::with_capacity(unique.len() * 2);
    for f in &unique {
        let (o, c) = (f.original(), f.current());
        domain.extend([o.start, o.end]);
        range.extend([c.start, c.end]);
    }
    match (LinearScale::from_breakpoints(domain.clone(), range.clone()), unique.first()) {
        (Some(s), _) => s,
        (None, Some(f)) => LinearScale::translation(f.original().start, f.current().start),
        (None, None) => LinearScale::identity(),
    }
}

/// Build both scales for one sequence.
pub fn build_scales<F: Feature>(
    features: &[F],
    compressed_edges: [f64; 2],
    viewport_edges: [f64; 2],
) -> SequenceScales {
    let gene_to_compression = gene_to_compression_scale(features);
    let gene_to_window = window_scale(&gene_to_compression, compressed_edges, viewport_edges);
    SequenceScales {
        gene_to_compression,
        gene_to_window,
    }
}

/// Genomic → viewport scale over all breakpoints of `gene_to_compression`.
///
/// Equal or non-finite edges return `gene_to_compression` unchanged.
fn window_scale(
    gene_to_compression: &LinearScale,
    compressed_edges: [f64; 2],
    viewport_edges: [f64; 2],
) -> LinearScale {
    let [lo, hi] = compressed_edges;
    if lo == hi || !lo.is_finite() || !hi.is_finite() {
        return gene_to_compression.clone();
    }
    let to_window = LinearScale::linear(compressed_edges, viewport_edges);
    let mut domain = vec![gene_to_compression.invert(lo), gene_to_compression.invert(hi)];
    let mut range = viewport_edges.to_vec();
    for (&d, &c) in gene_to_compression
        .domain()
        .iter()
        .zip(gene_to_compression.range())
    {
        domain.push(d);
        range.push(to_window.apply(c));
    }
    LinearScale::from_breakpoints(domain, range).unwrap_or_else(|| gene_to_compression.clone())
}

/// Re-window a view without rerunning relaxation.
///
/// `reference` is the genomic → compressed scale; `new_edges` the compressed
/// interval now on screen; `window` the viewport interval (defaults to the
/// reference's range extent). Equal or non-finite edges return `current`
/// unchanged.
pub fn update_viewport_range_bounds(
    current: &LinearScale,
    reference: &LinearScale,
    new_edges: [f64; 2],
    window: Option<[f64; 2]>,
) -> LinearScale {
    let [lo, hi] = new_edges;
    if lo == hi || !lo.is_finite() || !hi.is_finite() {
        return current.clone();
    }
    let window = window.unwrap_or_else(|| reference.range_extent());
    let to_window = LinearScale::linear(new_edges, window);
    let (inner_lo, inner_hi) = (lo.min(hi), lo.max(hi));

    let mut domain = vec![reference.invert(lo)];
    let mut range = vec![window[0]];
    for (&d, &c) in reference.domain().iter().zip(reference.range()) {
        if c > inner_lo && c < inner_hi {
            domain.push(d);
            range.push(to_window.apply(c));
        }
    }
    domain.push(reference.invert(hi));
    range.push(window[1]);

    LinearScale::from_breakpoints(domain, range).unwrap_or_else(|| current.clone())
}

/// Genomic distance over compressed distance on the segment bracketing
/// `position`: `< 1` stretched, `> 1` compressed, `0` outside the domain.
pub fn compression_factor(scale: &LinearScale, position: f64) -> f64 {
    let d = scale.domain();
    let r = scale.range();
    if d.len() < 2 || position < d[0] || position > d[d.len() - 1] {
        return 0.0;
    }
    let i = bracket(d, position);
    let factor = (d[i] - d[i - 1]).abs() / (r[i] - r[i - 1]).abs();
    if factor.is_finite() {
        factor
    } else {
        0.0
    }
}

/// Viewport width of the breakpoint segment starting at the first genomic
/// breakpoint at or after `position`; `0` when there is no such segment or it
/// ends left of the viewport.
pub fn segment_window_width(
    gene_to_compression: &LinearScale,
    gene_to_window: &LinearScale,
    window: [f64; 2],
    position: f64,
) -> f64 {
    let d = gene_to_compression.domain();
    let Some(i) = d.iter().position(|&x| position <= x) else {
        return 0.0;
    };
    if i + 1 >= d.len() {
        return 0.0;
    }
    let next = gene_to_window.apply(d[i + 1]);
    if next < window[0] {
        return 0.0;
    }
    (next - gene_to_window.apply(d[i])).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(orig: (f64, f64), cur: f64) -> PlacedElement {
        PlacedElement {
            id: format!("g{}", orig.0),
            sequence_id: "s".into(),
            homology_group: None,
            start: orig.0,
            end: orig.1,
            position: cur,
            width: orig.1 - orig.0,
        }
    }

    fn relaxed() -> Vec<PlacedElement> {
        // 0..10 stays, 1000..1010 pulled to 100, 5000..5100 pulled to 300.
        vec![
            feature((0.0, 10.0), 0.0),
            feature((1000.0, 1010.0), 100.0),
            feature((5000.0, 5100.0), 300.0),
        ]
    }

    #[test]
    fn compression_scale_maps_features_rigidly() {
        let s = gene_to_compression_scale(&relaxed());
        assert_eq!(s.domain(), &[0.0, 10.0, 1000.0, 1010.0, 5000.0, 5100.0]);
        assert_eq!(s.range(), &[0.0, 10.0, 100.0, 110.0, 300.0, 400.0]);
        assert_eq!(s.apply(1005.0), 105.0);
        assert_eq!(s.invert(205.0), 3005.0);
    }

    #[test]
    fn compression_factor_reports_segment_ratio() {
        let s = gene_to_compression_scale(&relaxed());
        assert_eq!(compression_factor(&s, 5.0), 1.0);
        // 990 bp squeezed into 90 units.
        assert_eq!(compression_factor(&s, 500.0), 11.0);
        assert_eq!(compression_factor(&s, -1.0), 0.0);
        assert_eq!(compression_factor(&s, 6000.0), 0.0);
    }

    #[test]
    fn window_scale_pins_edges_and_projects_inner_points() {
        let scales = build_scales(&relaxed(), [0.0, 400.0], [0.0, 800.0]);
        let w = &scales.gene_to_window;
        assert_eq!(w.apply(0.0), 0.0);
        assert_eq!(w.apply(5100.0), 800.0);
        assert_eq!(w.apply(1000.0), 200.0);
        assert_eq!(w.range()[0], 0.0);
        assert_eq!(w.range()[w.len() - 1], 800.0);
    }

    #[test]
    fn sub_window_keeps_off_screen_features_at_their_compressed_spacing() {
        // Window shows compressed [100, 110]: 80 viewport units per compressed unit.
        let scales = build_scales(&relaxed(), [100.0, 110.0], [0.0, 800.0]);
        let w = &scales.gene_to_window;
        assert_eq!(w.apply(1000.0), 0.0);
        assert_eq!(w.apply(1010.0), 800.0);
        assert_eq!(w.apply(1005.0), 400.0);
        // Off-screen genes sit where their compressed position projects.
        assert_eq!(w.apply(5000.0), 16_000.0);
        assert_eq!(w.apply(5100.0), 24_000.0);
        assert_eq!(w.apply(0.0), -8_000.0);
        assert_eq!(w.domain(), scales.gene_to_compression.domain());
    }

    #[test]
    fn rewindowing_zooms_into_compressed_interval() {
        let scales = build_scales(&relaxed(), [0.0, 400.0], [0.0, 800.0]);
        let zoomed = update_viewport_range_bounds(
            &scales.gene_to_window,
            &scales.gene_to_compression,
            [100.0, 110.0],
            Some([0.0, 800.0]),
        );
        assert_eq!(zoomed.apply(1000.0), 0.0);
        assert_eq!(zoomed.apply(1010.0), 800.0);
        assert_eq!(zoomed.apply(1005.0), 400.0);
        // Equal bounds keep the current scale.
        let same = update_viewport_range_bounds(
            &scales.gene_to_window,
            &scales.gene_to_compression,
            [50.0, 50.0],
            None,
        );
        assert_eq!(same, scales.gene_to_window);
    }

    #[test]
    fn empty_feature_list_maps_into_viewport() {
        let scales = build_scales::<PlacedElement>(&[], [0.0, 1.0], [10.0, 20.0]);
        let w = &scales.gene_to_window;
        for x in [0.0, 0.25, 0.5, 1.0] {
            let y = w.apply(x);
            assert!((10.0..=20.0).contains(&y), "{y} outside viewport");
        }
        assert_eq!(scales.gene_to_compression, LinearScale::identity());
    }

    #[test]
    fn duplicate_positions_are_filtered() {
        let mut features = relaxed();
        features.push(feature((1000.0, 1010.0), 150.0));
        let unique = filter_unique_positions(&features);
        assert_eq!(unique.len(), 3);
        assert_eq!(unique[1].position, 100.0);
    }

    #[test]
    fn segment_width_in_window_space() {
        let scales = build_scales(&relaxed(), [0.0, 400.0], [0.0, 800.0]);
        let w = segment_window_width(
            &scales.gene_to_compression,
            &scales.gene_to_window,
            [0.0, 800.0],
            1000.0,
        );
        assert_eq!(w, 20.0);
        let past_end = segment_window_width(
            &scales.gene_to_compression,
            &scales.gene_to_window,
            [0.0, 800.0],
            9999.0,
        );
        assert_eq!(past_end, 0.0);
    }
}
