use super::*;
use crate::model::{GroupSummary, Span};
use proptest::prelude::*;

fn summary(original: (f64, f64), current: f64) -> GroupSummary {
    GroupSummary {
        sequence_id: "s".into(),
        members: vec![format!("g{}", original.0)],
        original: Span::new(original.0, original.1),
        current: Span::new(current, current + (original.1 - original.0)),
    }
}

/// Strictly increasing breakpoints with strictly increasing images.
fn arb_scale() -> impl Strategy<Value = LinearScale> {
    prop::collection::vec((1.0f64..1_000.0, 1.0f64..1_000.0), 1..12).prop_map(|steps| {
        let (mut x, mut y) = (0.0, 0.0);
        let mut domain = vec![x];
        let mut range = vec![y];
        for (dx, dy) in steps {
            x += dx;
            y += dy;
            domain.push(x);
            range.push(y);
        }
        LinearScale::from_breakpoints(domain, range).unwrap()
    })
}

#[test]
fn group_summaries_drive_scales() {
    let groups = vec![
        summary((0.0, 500.0), 0.0),
        summary((10_000.0, 10_500.0), 1_500.0),
    ];
    let scales = build_scales(&groups, [0.0, 2_000.0], [0.0, 1_000.0]);
    assert_eq!(scales.gene_to_compression.apply(10_000.0), 1_500.0);
    // 9500 bp between the groups shown as 1000 compressed units.
    assert_eq!(compression_factor(&scales.gene_to_compression, 5_000.0), 9.5);
    assert_eq!(scales.gene_to_window.apply(0.0), 0.0);
    assert_eq!(scales.gene_to_window.apply(10_500.0), 1_000.0);
}

#[test]
fn single_feature_gives_translation() {
    let groups = vec![summary((200.0, 200.0), 50.0)];
    let s = gene_to_compression_scale(&groups);
    assert_eq!(s.apply(200.0), 50.0);
    assert_eq!(s.apply(260.0), 110.0);
}

#[test]
fn reversed_viewport_is_supported() {
    let groups = vec![summary((0.0, 10.0), 0.0), summary((100.0, 110.0), 20.0)];
    let scales = build_scales(&groups, [0.0, 30.0], [300.0, 0.0]);
    let w = &scales.gene_to_window;
    assert_eq!(w.apply(0.0), 300.0);
    assert_eq!(w.apply(110.0), 0.0);
    assert!(w.apply(50.0) < 300.0 && w.apply(50.0) > 0.0);
}

#[test]
fn non_finite_window_keeps_current() {
    let groups = vec![summary((0.0, 10.0), 0.0), summary((100.0, 110.0), 20.0)];
    let scales = build_scales(&groups, [0.0, 30.0], [0.0, 300.0]);
    let kept = update_viewport_range_bounds(
        &scales.gene_to_window,
        &scales.gene_to_compression,
        [f64::NAN, 10.0],
        None,
    );
    assert_eq!(kept, scales.gene_to_window);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invert_undoes_apply(scale in arb_scale(), x in -500.0f64..15_000.0) {
        let y = scale.apply(x);
        let back = scale.invert(y);
        prop_assert!((back - x).abs() <= 1e-6 * x.abs().max(1.0), "{x} -> {y} -> {back}");
    }

    #[test]
    fn window_scale_stays_in_viewport(
        scale in arb_scale(),
        lo_frac in 0.0f64..0.5,
        hi_frac in 0.5f64..1.0,
        width in 10.0f64..5_000.0,
    ) {
        let [c0, c1] = scale.range_extent();
        let lo = c0 + (c1 - c0) * lo_frac;
        let hi = c0 + (c1 - c0) * hi_frac;
        prop_assume!(hi - lo > 1e-3);
        let w = update_viewport_range_bounds(&scale, &scale, [lo, hi], Some([0.0, width]));
        let (g0, g1) = (scale.invert(lo), scale.invert(hi));
        for k in 0..=20 {
            let g = g0 + (g1 - g0) * k as f64 / 20.0;
            let y = w.apply(g);
            prop_assert!(y >= -1e-6 && y <= width + 1e-6, "{g} -> {y}");
        }
    }

    #[test]
    fn compression_factor_never_negative(scale in arb_scale(), x in -100.0f64..15_000.0) {
        prop_assert!(compression_factor(&scale, x) >= 0.0);
    }
}
