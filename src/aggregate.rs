//! Two-stage aggregation of qualifying mutations.
//!
//! Stage one counts records per (sample, gene) pair; stage two rolls those
//! counts up per gene. Both stages use ordered maps so intermediate output
//! is deterministic regardless of input order.

use std::collections::BTreeMap;

use crate::maf::MafRecord;

/// Qualifying mutation count for one (sample, gene) pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SampleGeneCount {
    pub sample: String,
    pub gene: String,
    pub count: u64,
}

/// Per-gene rollup of stage-one counts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneSummary {
    pub gene: String,
    /// Distinct samples carrying at least one qualifying mutation.
    pub mutated_samples: u64,
    /// Sum of qualifying mutation counts across all samples.
    pub total_muts: u64,
}

/// Stage one: group records by (sample, gene), counting group sizes.
/// Each pair appears at most once in the result.
pub fn count_by_sample_gene<'a, I>(records: I) -> Vec<SampleGeneCount>
where
    I: IntoIterator<Item = &'a MafRecord>,
{
    let mut counts: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for record in records {
        *counts
            .entry((record.sample.as_str(), record.gene.as_str()))
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((sample, gene), count)| SampleGeneCount {
            sample: sample.to_string(),
            gene: gene.to_string(),
            count,
        })
        .collect()
}

/// Stage two: roll stage-one counts up per gene. Each stage-one row is one
/// distinct sample, so `mutated_samples` is simply the number of rows seen.
pub fn summarize_by_gene(counts: &[SampleGeneCount]) -> Vec<GeneSummary> {
    let mut genes: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for entry in counts {
        let (samples, total) = genes.entry(entry.gene.as_str()).or_insert((0, 0));
        *samples += 1;
        *total += entry.count;
    }

    genes
        .into_iter()
        .map(|(gene, (mutated_samples, total_muts))| GeneSummary {
            gene: gene.to_string(),
            mutated_samples,
            total_muts,
        })
        .collect()
}

/// Orders summaries by `mutated_samples` descending, then `total_muts`
/// descending, then gene symbol ascending. The final key makes the output
/// reproducible across runs.
pub fn sort_gene_summaries(summaries: &mut [GeneSummary]) {
    summaries.sort_unstable_by(|a, b| {
        b.mutated_samples
            .cmp(&a.mutated_samples)
            .then_with(|| b.total_muts.cmp(&a.total_muts))
            .then_with(|| a.gene.cmp(&b.gene))
    });
}
