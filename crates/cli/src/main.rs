use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use synteny::api::{
    crossing_homology_groups, run_layout, sequence_scales, LayoutOutput, LayoutParams,
};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "synteny")]
#[command(about = "Annealed gene layout across parallel sequence tracks")]
struct Cmd {
    /// Log verbosity: -v debug, -vv trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Relax an element table and write positions, groups and a run report
    Layout {
        /// Element table (.csv, .parquet or .json)
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Partial LayoutParams JSON; flags below override it
        #[arg(long)]
        tuning: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        from_heat: Option<f64>,
        #[arg(long)]
        to_heat: Option<f64>,
        #[arg(long)]
        minimum_distance: Option<f64>,
        /// Re-center every sequence on this homology group first
        #[arg(long)]
        anchor: Option<String>,
        /// Log homology groups whose order differs from this sequence
        #[arg(long)]
        reference: Option<String>,
    },
    /// Build per-sequence genomic → compressed → viewport scales from a layout
    Scales {
        /// Output of `synteny layout`
        #[arg(long)]
        layout: PathBuf,
        /// Compressed window `a,b` (defaults to the full relaxed extent)
        #[arg(long, value_parser = parse_edges)]
        compressed: Option<[f64; 2]>,
        /// Viewport interval `a,b`
        #[arg(long, value_parser = parse_edges, default_value = "0,1000")]
        viewport: [f64; 2],
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Layout {
            input,
            out,
            tuning,
            seed,
            from_heat,
            to_heat,
            minimum_distance,
            anchor,
            reference,
        } => {
            let mut params = match &tuning {
                Some(path) => input::load_params(path)?,
                None => LayoutParams::default(),
            };
            if let Some(seed) = seed {
                params.anneal.seed = seed;
            }
            if let Some(h) = from_heat {
                params.anneal.from_heat = h;
            }
            if let Some(h) = to_heat {
                params.anneal.to_heat = h;
            }
            if let Some(d) = minimum_distance {
                params.tuning.minimum_distance = d;
            }
            layout(&input, &out, params, anchor.as_deref(), reference.as_deref())
        }
        Action::Scales {
            layout,
            compressed,
            viewport,
            out,
        } => scales(&layout, compressed, viewport, &out),
        Action::Report => report(),
    }
}

fn layout(
    input: &Path,
    out: &Path,
    params: LayoutParams,
    anchor: Option<&str>,
    reference: Option<&str>,
) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), seed = params.anneal.seed, "layout");
    let elements = input::load_elements(input)?;
    let result = run_layout(&elements, anchor, params)
        .with_context(|| format!("relaxing {}", input.display()))?;
    tracing::info!(
        elements = result.elements.len(),
        groups = result.groups.len(),
        iterations = result.report.iterations,
        termination = ?result.report.termination,
        "relaxed"
    );
    if result.report.order_violations > 0 {
        tracing::warn!(count = result.report.order_violations, "order violations during run");
    }
    if let Some(reference) = reference {
        let crossing = crossing_homology_groups(&result.elements, Some(reference));
        tracing::info!(reference, crossing = ?crossing, "crossing homology groups");
    }

    write_json(out, &result)?;
    let payload = Payload::new(serde_json::to_value(params)?)
        .with_input(input)
        .with_report(serde_json::to_value(result.report)?);
    let prov = write_sidecar(out, payload)?;
    tracing::debug!(provenance = %prov.display(), "sidecar written");
    Ok(())
}

fn scales(layout: &Path, compressed: Option<[f64; 2]>, viewport: [f64; 2], out: &Path) -> Result<()> {
    let bytes = fs::read(layout).with_context(|| format!("reading {}", layout.display()))?;
    let relaxed: LayoutOutput = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing layout {}", layout.display()))?;
    let compressed = compressed.unwrap_or_else(|| relaxed_extent(&relaxed));
    tracing::info!(?compressed, ?viewport, sequences = relaxed.groups.len(), "scales");

    let scales = sequence_scales(&relaxed.groups, compressed, viewport);
    write_json(out, &scales)?;
    let payload = Payload::new(serde_json::json!({
        "compressed": compressed,
        "viewport": viewport,
    }))
    .with_input(layout);
    write_sidecar(out, payload)?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "version": synteny::VERSION,
        "params": LayoutParams::default(),
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Smallest interval covering every relaxed group; `[0, 1]` when empty.
fn relaxed_extent(layout: &LayoutOutput) -> [f64; 2] {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for g in &layout.groups {
        lo = lo.min(g.current.start);
        hi = hi.max(g.current.end);
    }
    if lo < hi {
        [lo, hi]
    } else {
        [0.0, 1.0]
    }
}

fn write_json<T: serde::Serialize>(out: &Path, value: &T) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn parse_edges(s: &str) -> Result<[f64; 2]> {
    let Some((a, b)) = s.split_once(',') else {
        bail!("expected two comma-separated numbers, got {s:?}");
    };
    let a: f64 = a.trim().parse().with_context(|| format!("bad number {a:?}"))?;
    let b: f64 = b.trim().parse().with_context(|| format!("bad number {b:?}"))?;
    if !a.is_finite() || !b.is_finite() {
        bail!("edges must be finite, got {s:?}");
    }
    Ok([a, b])
}
