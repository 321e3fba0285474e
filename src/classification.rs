//! Closed-world partition of MAF variant classifications.
//!
//! Labels outside both tables (e.g. `3'UTR`, `Intron`, `IGR`) are never
//! counted, under either mode.

/// Classifications that leave the protein sequence unchanged.
pub const SYNONYMOUS: [&str; 6] = [
    "Silent",
    "Start_Codon_Ins",
    "Start_Codon_SNP",
    "Stop_Codon_Del",
    "De_novo_Start_InFrame",
    "De_novo_Start_OutOfFrame",
];

/// Classifications with a predicted protein-level effect.
pub const NON_SYNONYMOUS: [&str; 9] = [
    "Missense_Mutation",
    "Frame_Shift_Del",
    "In_Frame_Ins",
    "Frame_Shift_Ins",
    "Splice_Site",
    "Nonsense_Mutation",
    "In_Frame_Del",
    "Nonstop_Mutation",
    "Translation_Start_Site",
];

/// Functional category of a variant classification label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Category {
    Synonymous,
    NonSynonymous,
}

impl Category {
    /// Case-sensitive lookup against the fixed classification tables.
    pub fn of(label: &str) -> Option<Self> {
        if NON_SYNONYMOUS.contains(&label) {
            Some(Self::NonSynonymous)
        } else if SYNONYMOUS.contains(&label) {
            Some(Self::Synonymous)
        } else {
            None
        }
    }
}

/// The set of classification labels the row filter retains:
/// non-synonymous always, synonymous only when requested.
#[derive(Clone, Copy, Debug)]
pub struct InclusionSet {
    include_syn: bool,
}

impl InclusionSet {
    pub fn new(include_syn: bool) -> Self {
        Self { include_syn }
    }

    pub fn contains(&self, label: &str) -> bool {
        match Category::of(label) {
            Some(Category::NonSynonymous) => true,
            Some(Category::Synonymous) => self.include_syn,
            None => false,
        }
    }
}
