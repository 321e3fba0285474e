use std::{
    io::{self, BufRead},
    num::ParseIntError,
};

use thiserror::Error;

/// One mutation call from a MAF table.
#[derive(Clone, Debug, PartialEq)]
pub struct MafRecord {
    pub sample: String,
    pub gene: String,
    pub entrez_id: String,
    pub classification: String,
    pub variant_type: String,
    pub depth: u64,
    pub ref_count: u64,
    pub alt_count: u64,
}

impl MafRecord {
    /// Variant allele fraction: `alt / (ref + alt)`.
    /// `None` when both allele counts are zero.
    pub fn vaf(&self) -> Option<f64> {
        let total = self.allele_depth();
        if total == 0 {
            None
        } else {
            Some(self.alt_count as f64 / total as f64)
        }
    }

    /// Combined allele depth used by the minimum-depth filter.
    /// The parser accepts the full `u64` range, so the sum saturates
    /// instead of wrapping.
    pub fn allele_depth(&self) -> u64 {
        self.ref_count.saturating_add(self.alt_count)
    }
}

const COL_HUGO_SYMBOL: &str = "Hugo_Symbol";
const COL_ENTREZ_GENE_ID: &str = "Entrez_Gene_Id";
const COL_SAMPLE: &str = "Tumor_Sample_Barcode";
const COL_CLASSIFICATION: &str = "Variant_Classification";
const COL_VARIANT_TYPE: &str = "Variant_Type";
const COL_DEPTH: &str = "t_depth";
const COL_REF_COUNT: &str = "t_ref_count";
const COL_ALT_COUNT: &str = "t_alt_count";

/// Column positions resolved from a MAF header row.
///
/// Columns are located by name; any extra columns in the input are ignored.
#[derive(Clone, Copy, Debug)]
struct Schema {
    gene: usize,
    entrez_id: usize,
    sample: usize,
    classification: usize,
    variant_type: usize,
    depth: usize,
    ref_count: usize,
    alt_count: usize,
    /// Minimum number of fields a data row must carry.
    width: usize,
}

impl Schema {
    fn from_header(header: &str) -> Result<Self, SchemaError> {
        let columns: Vec<&str> = header.split('\t').collect();
        let locate = |name: &'static str| {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or(SchemaError::MissingColumn(name))
        };

        let gene = locate(COL_HUGO_SYMBOL)?;
        let entrez_id = locate(COL_ENTREZ_GENE_ID)?;
        let sample = locate(COL_SAMPLE)?;
        let classification = locate(COL_CLASSIFICATION)?;
        let variant_type = locate(COL_VARIANT_TYPE)?;
        let depth = locate(COL_DEPTH)?;
        let ref_count = locate(COL_REF_COUNT)?;
        let alt_count = locate(COL_ALT_COUNT)?;

        let width = 1 + [
            gene,
            entrez_id,
            sample,
            classification,
            variant_type,
            depth,
            ref_count,
            alt_count,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        Ok(Self {
            gene,
            entrez_id,
            sample,
            classification,
            variant_type,
            depth,
            ref_count,
            alt_count,
            width,
        })
    }
}

/// Errors raised while resolving the MAF header.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("input is empty; expected a MAF header row")]
    MissingHeader,
    #[error("MAF header is missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Errors raised while opening a MAF reader.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("failed to read MAF header")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Errors raised while parsing a MAF data row.
#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: u64,
    #[source]
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("expected at least {expected} tab-delimited fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid value '{value}' in column '{column}': {source}")]
    InvalidNumber {
        column: &'static str,
        value: String,
        source: ParseIntError,
    },
}

/// Iterator over mutation records in a MAF table.
///
/// Skips leading `#` pragma lines, resolves the column schema from the
/// header row, then yields one [`MafRecord`] per data row. Malformed rows
/// surface as errors rather than being dropped.
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    schema: Schema,
    line: u64,
    buf: String,
}

impl<R> Reader<R>
where
    R: BufRead,
{
    pub fn new(mut inner: R) -> Result<Self, HeaderError> {
        let mut buf = String::new();
        let mut line = 0;

        let schema = loop {
            buf.clear();
            if inner.read_line(&mut buf)? == 0 {
                return Err(SchemaError::MissingHeader.into());
            }
            line += 1;
            let trimmed = buf.trim_end_matches(&['\n', '\r'][..]);
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            break Schema::from_header(trimmed)?;
        };

        Ok(Self {
            inner,
            schema,
            line,
            buf,
        })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R> Iterator for Reader<R>
where
    R: BufRead,
{
    type Item = Result<MafRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.inner.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    let trimmed = self.buf.trim_end_matches(&['\n', '\r'][..]);
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }

                    return Some(parse_record(trimmed, &self.schema).map_err(|kind| {
                        ParseError {
                            line: self.line,
                            kind,
                        }
                    }));
                }
                Err(e) => {
                    return Some(Err(ParseError {
                        line: self.line,
                        kind: ParseErrorKind::Io(e),
                    }));
                }
            }
        }
    }
}

fn parse_record(line: &str, schema: &Schema) -> Result<MafRecord, ParseErrorKind> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < schema.width {
        return Err(ParseErrorKind::FieldCount {
            expected: schema.width,
            found: fields.len(),
        });
    }

    let depth = parse_count(&fields, schema.depth, COL_DEPTH)?;
    let ref_count = parse_count(&fields, schema.ref_count, COL_REF_COUNT)?;
    let alt_count = parse_count(&fields, schema.alt_count, COL_ALT_COUNT)?;

    Ok(MafRecord {
        sample: fields[schema.sample].to_string(),
        gene: fields[schema.gene].to_string(),
        entrez_id: fields[schema.entrez_id].to_string(),
        classification: fields[schema.classification].to_string(),
        variant_type: fields[schema.variant_type].to_string(),
        depth,
        ref_count,
        alt_count,
    })
}

fn parse_count(
    fields: &[&str],
    index: usize,
    column: &'static str,
) -> Result<u64, ParseErrorKind> {
    let raw = fields[index].trim();
    raw.parse::<u64>()
        .map_err(|source| ParseErrorKind::InvalidNumber {
            column,
            value: raw.to_string(),
            source,
        })
}
