//! FASTA parsing into digested sequence records.

use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use md5::Md5;
use sha2::{Digest, Sha512};

use crate::errors::StoreError;
use crate::types::{SequenceMetadata, SequenceRecord};
use crate::utils::get_dynamic_reader;

/// Parse a FASTA header line (without the leading '>') into name and description.
///
/// Following FASTA standard: the sequence ID is the first word (up to first whitespace),
/// and everything after is the description.
///
/// # Examples
/// ```
/// use varnorm_refget::parse_fasta_header;
///
/// let (name, desc) = parse_fasta_header("NC_000007.14 Homo sapiens chromosome 7");
/// assert_eq!(name, "NC_000007.14");
/// assert_eq!(desc, Some("Homo sapiens chromosome 7".to_string()));
///
/// let (name, desc) = parse_fasta_header("chr1");
/// assert_eq!(name, "chr1");
/// assert_eq!(desc, None);
/// ```
pub fn parse_fasta_header(header: &str) -> (String, Option<String>) {
    let header = header.trim();
    match header.split_once(char::is_whitespace) {
        Some((id, desc)) => (id.to_string(), Some(desc.trim().to_string())),
        None => (header.to_string(), None),
    }
}

/// Sequence currently being accumulated by the parser.
struct PendingRecord {
    name: String,
    description: Option<String>,
    sha512: Sha512,
    md5: Md5,
    sequence: Vec<u8>,
}

impl PendingRecord {
    fn new(name: String, description: Option<String>) -> Self {
        Self {
            name,
            description,
            sha512: Sha512::new(),
            md5: Md5::new(),
            sequence: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        let upper = line.to_ascii_uppercase();
        self.sha512.update(upper.as_bytes());
        self.md5.update(upper.as_bytes());
        self.sequence.extend_from_slice(upper.as_bytes());
    }

    fn finish(self) -> SequenceRecord {
        let metadata = SequenceMetadata {
            name: self.name,
            description: self.description,
            length: self.sequence.len(),
            sha512t24u: base64_url::encode(&self.sha512.finalize()[0..24]),
            md5: format!("{:x}", self.md5.finalize()),
        };
        SequenceRecord {
            metadata,
            sequence: self.sequence,
        }
    }
}

/// Core FASTA parser that works with any `BufRead` implementation.
pub fn parse_fasta_reader<R: BufRead>(mut reader: R) -> Result<Vec<SequenceRecord>, StoreError> {
    let mut line = String::new();
    let mut line_num = 0;
    let mut current: Option<PendingRecord> = None;
    let mut records = Vec::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            break;
        }
        line_num += 1;

        if let Some(header) = line.strip_prefix('>') {
            if let Some(done) = current.take() {
                records.push(done.finish());
            }
            let (name, description) = parse_fasta_header(header);
            if name.is_empty() {
                return Err(StoreError::FastaFormat(format!(
                    "empty sequence name on line {}",
                    line_num
                )));
            }
            current = Some(PendingRecord::new(name, description));
        } else if !line.trim().is_empty() {
            match current.as_mut() {
                Some(pending) => pending.push_line(line.trim_end()),
                None => {
                    return Err(StoreError::FastaFormat(format!(
                        "sequence data before the first header on line {}",
                        line_num
                    )));
                }
            }
        }
    }

    if let Some(done) = current.take() {
        records.push(done.finish());
    }

    Ok(records)
}

/// Parse FASTA content held in memory. Gzipped content is detected by its magic bytes.
///
/// # Examples
///
/// ```
/// use varnorm_refget::load_fasta_bytes;
///
/// let records = load_fasta_bytes(b">chr1\nACGT\n>chr2\nTGCA\n").unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].metadata.name, "chr2");
/// ```
pub fn load_fasta_bytes(content: &[u8]) -> Result<Vec<SequenceRecord>, StoreError> {
    let is_gzipped = content.len() >= 2 && content[0] == 0x1f && content[1] == 0x8b;
    if is_gzipped {
        parse_fasta_reader(BufReader::new(MultiGzDecoder::new(content)))
    } else {
        parse_fasta_reader(content)
    }
}

/// Parse a FASTA file (plain or `.gz`) from disk.
pub fn load_fasta_file<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)?;
    let records =
        parse_fasta_reader(reader).with_context(|| format!("Failed to parse FASTA {:?}", path))?;
    Ok(records)
}
