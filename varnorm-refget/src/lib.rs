//! # In-memory refget sequence store
//!
//! Reference sequences are loaded once (usually from a FASTA file), digested with the
//! GA4GH `sha512t24u` algorithm and kept in memory. Each sequence can then be addressed by
//! its digest, its MD5, or any number of namespaced aliases (`refseq:NC_000007.14`,
//! `GRCh38:7`, ...).
//!
//! - `digest` - Hash functions (sha512t24u, md5, canonicalize_json)
//! - `types` - Sequence records and their metadata
//! - `fasta` - FASTA parsing (plain or gzipped)
//! - `alias` - Namespaced alias bookkeeping
//! - `store` - The `SequenceStore` tying all of the above together

pub mod alias;
pub mod digest;
pub mod errors;
pub mod fasta;
pub mod store;
pub mod types;
pub mod utils;

pub use alias::AliasManager;
pub use digest::{canonicalize_json, md5, sha512t24u};
pub use errors::StoreError;
pub use fasta::{load_fasta_bytes, load_fasta_file, parse_fasta_header};
pub use store::SequenceStore;
pub use types::{SequenceMetadata, SequenceRecord, digest_sequence};
