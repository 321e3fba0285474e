use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use flate2::read::MultiGzDecoder;

/// Opens an input file, transparently peeling off GZIP/BGZF layers detected
/// by magic bytes to expose the underlying text stream.
///
/// `MultiGzDecoder` handles BGZF and concatenated GZIP members. Nested
/// layers (e.g. a re-compressed `.maf.gz`) are unwrapped up to a fixed
/// depth to avoid looping on malformed input.
pub fn open_input(path: &Path) -> anyhow::Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open input file at {}", path.display()))?;
    let mut reader: Box<dyn BufRead + Send> = Box::new(BufReader::new(file));

    const MAX_DEPTH: usize = 4;
    let mut depth = 0;
    loop {
        let is_gzip = {
            let buf = reader.fill_buf()?;
            // GZIP magic: 1f 8b
            buf.len() >= 2 && buf[0] == 0x1f && buf[1] == 0x8b
        };
        if !is_gzip {
            break;
        }
        if depth == MAX_DEPTH {
            anyhow::bail!(
                "too many nested compression layers in {} (limit {MAX_DEPTH})",
                path.display()
            );
        }
        tracing::debug!("detected gzip layer");
        reader = Box::new(BufReader::new(MultiGzDecoder::new(reader)));
        depth += 1;
    }

    Ok(reader)
}
