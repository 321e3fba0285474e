#![doc = include_str!("../README.md")]

pub mod aggregate;
pub mod classification;
pub mod cli;
pub mod filter;
pub mod maf;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod smart_reader;

pub use aggregate::GeneSummary;
pub use filter::FilterParams;
pub use pipeline::{TallyConfig, TallySummary, tally_maf_file};
