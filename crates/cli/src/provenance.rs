//! Run records for distance tables: `batch` leaves a `<table>.provenance.json`
//! beside every CSV it writes, naming the kernel build, the metric and
//! reference point, and the point file the rows came from.

use anyhow::{Context, Result};
use pgeom::Metric;
use serde::Serialize;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

/// How a distance table was produced.
#[derive(Debug, Serialize)]
pub struct RunRecord {
    code_rev: String,
    kernel_version: &'static str,
    callsite: Callsite,
    metric: String,
    reference: [f64; 4],
    inputs: Vec<String>,
    rows: usize,
    outputs: Vec<String>,
}

impl RunRecord {
    #[track_caller]
    pub fn new(metric: Metric, reference: [f64; 4]) -> Self {
        let caller = Location::caller();
        Self {
            code_rev: current_git_rev(),
            kernel_version: pgeom::VERSION,
            callsite: Callsite {
                file: caller.file(),
                line: caller.line(),
            },
            metric: metric.to_string(),
            reference,
            inputs: Vec::new(),
            rows: 0,
            outputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, path: impl Into<String>) -> Self {
        self.inputs.push(path.into());
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Record `table` as the output and write the record beside it.
    pub fn write_beside(mut self, table: &Path) -> Result<PathBuf> {
        self.outputs.push(table.to_string_lossy().into_owned());
        let path = record_path(table);
        let bytes = serde_json::to_vec_pretty(&self)?;
        std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), rows = self.rows, "run record");
        Ok(path)
    }
}

/// `dir/distances.csv` → `dir/distances.provenance.json`.
fn record_path(table: &Path) -> PathBuf {
    let stem = table
        .file_stem()
        .map_or_else(|| "table".into(), |s| s.to_string_lossy().into_owned());
    table.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit hash from `GIT_COMMIT` (build time, then run time) or `git rev-parse`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
