use std::io::Cursor;

use maf_tally::{
    aggregate::{count_by_sample_gene, sort_gene_summaries, summarize_by_gene},
    maf::{self, MafRecord},
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn reader_handles_arbitrary_input(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let cursor = Cursor::new(data);
        // Header resolution may fail; record parsing may fail; neither may panic.
        if let Ok(reader) = maf::Reader::new(cursor) {
            for record in reader.take(1000) {
                let _ = record;
            }
        }
    }
}

fn record(sample: u8, gene: u8) -> MafRecord {
    MafRecord {
        sample: format!("S{sample}"),
        gene: format!("G{gene}"),
        entrez_id: String::from("0"),
        classification: String::from("Missense_Mutation"),
        variant_type: String::from("SNP"),
        depth: 50,
        ref_count: 35,
        alt_count: 15,
    }
}

proptest! {
    #[test]
    fn aggregation_invariants_hold(
        pairs in proptest::collection::vec((0u8..8, 0u8..8), 0..64),
    ) {
        let records: Vec<MafRecord> = pairs
            .iter()
            .map(|&(sample, gene)| record(sample, gene))
            .collect();

        let counts = count_by_sample_gene(&records);
        let mut genes = summarize_by_gene(&counts);
        sort_gene_summaries(&mut genes);

        let distinct_samples = pairs
            .iter()
            .map(|&(sample, _)| sample)
            .collect::<std::collections::HashSet<_>>()
            .len() as u64;

        let mut total_across_genes = 0;
        for gene in &genes {
            // Each contributing sample carries at least one mutation.
            prop_assert!(gene.total_muts >= gene.mutated_samples);
            prop_assert!(gene.mutated_samples >= 1);
            prop_assert!(gene.mutated_samples <= distinct_samples);
            total_across_genes += gene.total_muts;
        }
        // Every qualifying record is counted exactly once.
        prop_assert_eq!(total_across_genes, records.len() as u64);

        // Adjacent rows respect the documented ordering.
        for window in genes.windows(2) {
            let (a, b) = (&window[0], &window[1]);
            prop_assert!(a.mutated_samples >= b.mutated_samples);
            if a.mutated_samples == b.mutated_samples {
                prop_assert!(a.total_muts >= b.total_muts);
                if a.total_muts == b.total_muts {
                    prop_assert!(a.gene < b.gene);
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn well_formed_rows_always_parse(
        samples in proptest::collection::vec("[A-Z][A-Z0-9]{1,6}", 1..16),
        depth_pairs in proptest::collection::vec((any::<u64>(), any::<u64>()), 1..16),
    ) {
        let mut data = String::from(
            "Hugo_Symbol\tEntrez_Gene_Id\tTumor_Sample_Barcode\tVariant_Classification\tVariant_Type\tt_depth\tt_ref_count\tt_alt_count\n",
        );
        let rows = samples.len().min(depth_pairs.len());
        for i in 0..rows {
            let (ref_count, alt_count) = depth_pairs[i];
            data.push_str(&format!(
                "TP53\t7157\t{}\tMissense_Mutation\tSNP\t{}\t{}\t{}\n",
                samples[i],
                ref_count.saturating_add(alt_count),
                ref_count,
                alt_count,
            ));
        }

        let reader = maf::Reader::new(data.as_bytes()).expect("header");
        let mut parsed = 0;
        for result in reader {
            let record = result.expect("well-formed row");
            if record.allele_depth() == 0 {
                prop_assert_eq!(record.vaf(), None);
            } else {
                let vaf = record.vaf().expect("defined VAF");
                prop_assert!((0.0..=1.0).contains(&vaf));
            }
            parsed += 1;
        }
        prop_assert_eq!(parsed, rows);
    }
}
