//! Row-level quality filters applied before aggregation.

use thiserror::Error;

use crate::classification::InclusionSet;
use crate::maf::MafRecord;

/// Thresholds and mode switches for the row filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterParams {
    /// Minimum variant allele fraction.
    pub min_vaf: f64,
    /// Minimum combined allele depth (`t_ref_count + t_alt_count`).
    pub min_depth: u64,
    /// Count synonymous-classified mutations as well.
    pub include_syn: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_vaf: 0.05,
            min_depth: 0,
            include_syn: false,
        }
    }
}

/// Errors raised by eager parameter validation.
#[derive(Debug, Error)]
pub enum InvalidParams {
    #[error("--vaf must be a finite value between 0 and 1, got {0}")]
    VafOutOfRange(f64),
}

impl FilterParams {
    pub fn validate(&self) -> Result<(), InvalidParams> {
        if !self.min_vaf.is_finite() || !(0.0..=1.0).contains(&self.min_vaf) {
            return Err(InvalidParams::VafOutOfRange(self.min_vaf));
        }
        Ok(())
    }

    pub fn inclusion_set(&self) -> InclusionSet {
        InclusionSet::new(self.include_syn)
    }
}

/// Outcome of the three filter predicates for one record.
///
/// Predicates are evaluated independently so the run summary can count
/// every failing predicate, not just the first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Verdict {
    pub classification_ok: bool,
    pub vaf_ok: bool,
    /// Both allele counts were zero; the VAF predicate fails by definition.
    pub undefined_vaf: bool,
    pub depth_ok: bool,
}

impl Verdict {
    pub fn keep(&self) -> bool {
        self.classification_ok && self.vaf_ok && self.depth_ok
    }
}

pub fn evaluate(record: &MafRecord, params: &FilterParams, inclusion: &InclusionSet) -> Verdict {
    let (vaf_ok, undefined_vaf) = match record.vaf() {
        Some(vaf) => (vaf >= params.min_vaf, false),
        None => (false, true),
    };

    Verdict {
        classification_ok: inclusion.contains(&record.classification),
        vaf_ok,
        undefined_vaf,
        depth_ok: record.allele_depth() >= params.min_depth,
    }
}
