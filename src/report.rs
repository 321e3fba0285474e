//! Structured run report for downstream tool consumption.
//!
//! Writes a JSON file alongside the output containing the run
//! configuration and filter statistics.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use time::{OffsetDateTime, macros::format_description};

use crate::pipeline::{TallyConfig, TallySummary};

/// Complete report of an aggregation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Tool version
    pub version: String,
    /// Timestamp of run (ISO 8601)
    pub timestamp: String,

    pub input: InputInfo,
    pub output: OutputInfo,
    pub filters: FilterInfo,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputInfo {
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterInfo {
    pub min_vaf: f64,
    pub min_depth: u64,
    pub include_syn: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_records: usize,
    pub kept_records: usize,
    pub excluded_classification: usize,
    pub below_vaf: usize,
    pub undefined_vaf: usize,
    pub below_depth: usize,
    pub distinct_samples: usize,
    pub genes_reported: usize,
}

impl From<&TallySummary> for Statistics {
    fn from(s: &TallySummary) -> Self {
        Statistics {
            total_records: s.total_records,
            kept_records: s.kept_records,
            excluded_classification: s.excluded_classification,
            below_vaf: s.below_vaf,
            undefined_vaf: s.undefined_vaf,
            below_depth: s.below_depth,
            distinct_samples: s.distinct_samples,
            genes_reported: s.genes_reported,
        }
    }
}

impl RunReport {
    pub fn new(config: &TallyConfig, summary: &TallySummary) -> Self {
        let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
        let timestamp = OffsetDateTime::now_utc()
            .format(&format)
            .unwrap_or_else(|_| String::from("unknown"));

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp,
            input: InputInfo {
                path: config.maf.display().to_string(),
            },
            output: OutputInfo {
                path: config.outfile.display().to_string(),
            },
            filters: FilterInfo {
                min_vaf: config.params.min_vaf,
                min_depth: config.params.min_depth,
                include_syn: config.params.include_syn,
            },
            statistics: Statistics::from(summary),
        }
    }
}

pub fn write_report<P>(path: P, config: &TallyConfig, summary: &TallySummary) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let report = RunReport::new(config, summary);
    let file = File::create(path)
        .with_context(|| format!("failed to create report file at {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)
        .context("failed to serialize run report")?;
    Ok(())
}
