//! Loading element tables and tuning files.
//!
//! - `.csv`: columns `id, sequence_id, start, end` and an optional
//!   `homology_group` (empty cells mean no group). Read with polars.
//! - `.parquet`: same columns, scanned lazily.
//! - `.json`: an array of element objects, same field names.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::fs;
use std::path::Path;
use synteny::api::{GenomicElement, LayoutParams};

pub fn load_elements(path: &Path) -> Result<Vec<GenomicElement>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_csv(path),
        Some("parquet") => load_parquet(path),
        Some("json") => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing elements from {}", path.display()))
        }
        _ => bail!("unsupported input {}: expected .csv, .parquet or .json", path.display()),
    }
}

fn load_csv(path: &Path) -> Result<Vec<GenomicElement>> {
    let lf = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(1000))
        .finish()?;
    element_rows(lf, path)
}

fn load_parquet(path: &Path) -> Result<Vec<GenomicElement>> {
    let lf = LazyFrame::scan_parquet(path, ScanArgsParquet::default())?;
    element_rows(lf, path)
}

fn element_rows(lf: LazyFrame, path: &Path) -> Result<Vec<GenomicElement>> {
    let df = lf
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "input_table_shape");

    let column = |name: &str| {
        df.column(name)
            .with_context(|| format!("{}: missing column {name:?}", path.display()))
    };
    let ids = column("id")?.cast(&DataType::String)?;
    let sequences = column("sequence_id")?.cast(&DataType::String)?;
    let starts = column("start")?.cast(&DataType::Float64)?;
    let ends = column("end")?.cast(&DataType::Float64)?;
    let homology = match df.column("homology_group") {
        Ok(h) => Some(h.cast(&DataType::String)?),
        Err(_) => None,
    };

    let ids = ids.str()?;
    let sequences = sequences.str()?;
    let starts = starts.f64()?;
    let ends = ends.f64()?;
    let homology = homology.as_ref().map(|s| s.str()).transpose()?;

    let mut out = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let (Some(id), Some(sequence_id)) = (ids.get(row), sequences.get(row)) else {
            bail!("{}: row {row} has an empty id or sequence_id", path.display());
        };
        let (Some(start), Some(end)) = (starts.get(row), ends.get(row)) else {
            bail!("{}: row {row} ({id}) has no start/end", path.display());
        };
        let group = homology
            .and_then(|h| h.get(row))
            .filter(|g| !g.is_empty());
        out.push(GenomicElement::new(id, sequence_id, start, end, group));
    }
    Ok(out)
}

/// Partial JSON is fine: missing fields keep their defaults.
pub fn load_params(path: &Path) -> Result<LayoutParams> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing tuning {}", path.display()))
}
