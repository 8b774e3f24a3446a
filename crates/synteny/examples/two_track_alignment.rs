//! Relax two small tracks and print positions before and after.
//!
//! Usage:
//!   cargo run -p synteny --example two_track_alignment
//!   cargo run -p synteny --example two_track_alignment -- 7   # seed
//!
//! Track s2 has a long insertion between h2 and h3; relaxation pulls the
//! homologs together and the printed compression factor shows how much
//! genomic distance each segment of s2 absorbs.

use synteny::prelude::*;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0u64);
    let elements = vec![
        GenomicElement::new("a1", "s1", 0.0, 800.0, Some("h1")),
        GenomicElement::new("a2", "s1", 2_000.0, 2_900.0, Some("h2")),
        GenomicElement::new("a3", "s1", 5_000.0, 5_600.0, Some("h3")),
        GenomicElement::new("b1", "s2", 0.0, 800.0, Some("h1")),
        GenomicElement::new("b2", "s2", 1_500.0, 2_400.0, Some("h2")),
        GenomicElement::new("b3", "s2", 40_000.0, 40_600.0, Some("h3")),
    ];
    let mut params = LayoutParams::default();
    params.anneal.seed = seed;
    params.anneal.max_move_per_heat = 10.0;

    let out = match run_layout(&elements, None, params) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("layout failed: {e}");
            return;
        }
    };
    println!(
        "iterations={} termination={:?}",
        out.report.iterations, out.report.termination
    );
    for e in &out.elements {
        println!("{:>3} {} start={:>8} position={:>10.1}", e.id, e.sequence_id, e.start, e.position);
    }
    for named in sequence_scales(&out.groups, [0.0, 10_000.0], [0.0, 1_000.0]) {
        let g2c = &named.scales.gene_to_compression;
        let factors: Vec<String> = g2c
            .domain()
            .windows(2)
            .map(|w| format!("{:.1}", compression_factor(g2c, 0.5 * (w[0] + w[1]))))
            .collect();
        println!("{} compression per segment: [{}]", named.sequence_id, factors.join(", "));
    }
}
