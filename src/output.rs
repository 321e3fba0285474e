use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::aggregate::GeneSummary;

/// Tab-separated header of the gene counts table.
pub const OUTPUT_HEADER: &str = "Hugo_Symbol\tmutated_samples\ttotal_muts";

/// Serializes the gene summary table as TSV, overwriting any existing file.
pub fn write_gene_counts<P>(path: P, genes: &[GeneSummary]) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("failed to create output file at {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{OUTPUT_HEADER}")
        .with_context(|| format!("failed to write to {}", path.display()))?;
    for gene in genes {
        writeln!(
            writer,
            "{}\t{}\t{}",
            gene.gene, gene.mutated_samples, gene.total_muts
        )
        .with_context(|| format!("failed to write to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush output to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gene_counts.tsv");
        let genes = vec![
            GeneSummary {
                gene: String::from("TP53"),
                mutated_samples: 2,
                total_muts: 3,
            },
            GeneSummary {
                gene: String::from("KRAS"),
                mutated_samples: 1,
                total_muts: 1,
            },
        ];

        write_gene_counts(&path, &genes).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Hugo_Symbol\tmutated_samples\ttotal_muts\nTP53\t2\t3\nKRAS\t1\t1\n"
        );
    }

    #[test]
    fn empty_summary_yields_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.tsv");
        write_gene_counts(&path, &[]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Hugo_Symbol\tmutated_samples\ttotal_muts\n");
    }

    #[test]
    fn unwritable_destination_reports_path() {
        let err = write_gene_counts("/nonexistent/dir/out.tsv", &[]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dir/out.tsv"));
    }
}
