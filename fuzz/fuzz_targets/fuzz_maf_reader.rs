#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let cursor = Cursor::new(data);

    // Header resolution and record parsing should never panic.
    if let Ok(reader) = maf_tally::maf::Reader::new(cursor) {
        for result in reader.take(1000) {
            match result {
                Ok(record) => {
                    // Exercise the derived-field helpers
                    let _ = record.vaf();
                    let _ = record.allele_depth();
                }
                Err(_) => {
                    // Parse errors are expected for random input
                }
            }
        }
    }
});
