//! Linear pipeline: load, filter, aggregate twice, sort, write.
//!
//! Any stage failure aborts the run; there is no retry and no partial
//! output recovery.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    aggregate::{count_by_sample_gene, sort_gene_summaries, summarize_by_gene},
    filter::{self, FilterParams},
    maf,
    output::write_gene_counts,
    report,
    smart_reader::open_input,
};

/// Configuration required to drive one aggregation run.
#[derive(Debug, Clone)]
pub struct TallyConfig {
    pub maf: PathBuf,
    pub outfile: PathBuf,
    pub params: FilterParams,
    /// Optional JSON run report destination.
    pub report: Option<PathBuf>,
}

/// Counters accumulated across a run.
///
/// Predicates are counted independently, so a record failing several
/// filters contributes to several counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TallySummary {
    pub total_records: usize,
    pub kept_records: usize,
    pub excluded_classification: usize,
    pub below_vaf: usize,
    /// Records with zero reference and alternate counts.
    pub undefined_vaf: usize,
    pub below_depth: usize,
    pub distinct_samples: usize,
    pub genes_reported: usize,
}

/// Runs the full pipeline over one MAF file and writes the gene counts
/// table. Returns the run counters.
pub fn tally_maf_file(config: TallyConfig) -> Result<TallySummary> {
    tracing::info!(
        maf = %config.maf.display(),
        outfile = %config.outfile.display(),
        min_vaf = config.params.min_vaf,
        min_depth = config.params.min_depth,
        include_syn = config.params.include_syn,
        "starting tally",
    );

    config
        .params
        .validate()
        .context("invalid filter parameters")?;

    let input = open_input(&config.maf)?;
    let reader = maf::Reader::new(input)
        .with_context(|| format!("failed to read MAF header from {}", config.maf.display()))?;

    let inclusion = config.params.inclusion_set();
    let mut summary = TallySummary::default();
    let mut kept = Vec::new();

    for result in reader {
        let record = result
            .with_context(|| format!("invalid record in {}", config.maf.display()))?;
        summary.total_records += 1;

        let verdict = filter::evaluate(&record, &config.params, &inclusion);
        if !verdict.classification_ok {
            summary.excluded_classification += 1;
        }
        if verdict.undefined_vaf {
            summary.undefined_vaf += 1;
        } else if !verdict.vaf_ok {
            summary.below_vaf += 1;
        }
        if !verdict.depth_ok {
            summary.below_depth += 1;
        }

        if verdict.keep() {
            summary.kept_records += 1;
            kept.push(record);
        }
    }

    let per_sample_gene = count_by_sample_gene(&kept);
    summary.distinct_samples = per_sample_gene
        .iter()
        .map(|entry| entry.sample.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut genes = summarize_by_gene(&per_sample_gene);
    sort_gene_summaries(&mut genes);
    summary.genes_reported = genes.len();

    write_gene_counts(&config.outfile, &genes)?;

    if let Some(path) = &config.report {
        report::write_report(path, &config, &summary)
            .with_context(|| format!("failed to write run report to {}", path.display()))?;
    }

    tracing::info!(
        total = summary.total_records,
        kept = summary.kept_records,
        genes = summary.genes_reported,
        samples = summary.distinct_samples,
        "tally finished",
    );

    Ok(summary)
}
