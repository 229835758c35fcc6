use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Malformed FASTA: {0}")]
    FastaFormat(String),

    #[error("No sequence with digest: {0}")]
    UnknownDigest(String),

    #[error("Range {start}..{end} is outside sequence {digest} of length {length}")]
    RangeOutOfBounds {
        digest: String,
        start: usize,
        end: usize,
        length: usize,
    },

    #[error("Malformed alias line {line}: {content}")]
    AliasFormat { line: usize, content: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
