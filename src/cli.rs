use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    filter::FilterParams,
    pipeline::{TallyConfig, TallySummary, tally_maf_file},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Filter a MAF table and tally per-gene mutation counts", long_about = None)]
struct Cli {
    /// Input MAF file, optionally gzip-compressed.
    #[arg(long, value_name = "PATH")]
    maf: PathBuf,

    /// Output TSV path.
    #[arg(long, value_name = "PATH", default_value = "gene_counts.tsv")]
    outfile: PathBuf,

    /// Minimum variant allele fraction for a mutation to count.
    #[arg(long, value_name = "FLOAT", default_value_t = 0.05)]
    vaf: f64,

    /// Minimum allele depth (t_ref_count + t_alt_count).
    #[arg(long = "min_depth", value_name = "INT", default_value_t = 0)]
    min_depth: u64,

    /// Also count synonymous-classified mutations.
    #[arg(long = "include_syn")]
    include_syn: bool,

    /// Write a JSON run report to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Logging verbosity (e.g. error, warn, info, debug).
    #[arg(long, default_value = "info")]
    log_level: String,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let params = FilterParams {
        min_vaf: cli.vaf,
        min_depth: cli.min_depth,
        include_syn: cli.include_syn,
    };
    // Reject bad thresholds before touching the input.
    params.validate().context("invalid command-line options")?;

    let config = TallyConfig {
        maf: cli.maf,
        outfile: cli.outfile,
        params,
        report: cli.report,
    };

    let summary = tally_maf_file(config)?;
    print_summary(&summary);

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
    Ok(())
}

fn print_summary(summary: &TallySummary) {
    println!(
        "Processed {total} records; kept {kept} across {samples} samples, reporting {genes} genes.",
        total = summary.total_records,
        kept = summary.kept_records,
        samples = summary.distinct_samples,
        genes = summary.genes_reported,
    );

    if summary.excluded_classification > 0 {
        println!(
            "Excluded {count} records with out-of-scope classifications.",
            count = summary.excluded_classification
        );
    }

    if summary.below_vaf > 0 {
        println!(
            "Excluded {count} records below the VAF threshold.",
            count = summary.below_vaf
        );
    }

    if summary.undefined_vaf > 0 {
        println!(
            "Excluded {count} records with zero allele counts (undefined VAF).",
            count = summary.undefined_vaf
        );
    }

    if summary.below_depth > 0 {
        println!(
            "Excluded {count} records below the depth threshold.",
            count = summary.below_depth
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::parse_from(["maf-tally", "--maf", "input.maf"]);
        assert_eq!(cli.maf, PathBuf::from("input.maf"));
        assert_eq!(cli.outfile, PathBuf::from("gene_counts.tsv"));
        assert_eq!(cli.vaf, 0.05);
        assert_eq!(cli.min_depth, 0);
        assert!(!cli.include_syn);
        assert_eq!(cli.report, None);
    }

    #[test]
    fn parses_underscore_flag_spellings() {
        let cli = Cli::parse_from([
            "maf-tally",
            "--maf",
            "cohort.maf.gz",
            "--vaf",
            "0.1",
            "--min_depth",
            "20",
            "--include_syn",
            "--outfile",
            "out.tsv",
        ]);
        assert_eq!(cli.vaf, 0.1);
        assert_eq!(cli.min_depth, 20);
        assert!(cli.include_syn);
        assert_eq!(cli.outfile, PathBuf::from("out.tsv"));
    }

    #[test]
    fn maf_argument_is_required() {
        assert!(Cli::try_parse_from(["maf-tally"]).is_err());
    }
}
