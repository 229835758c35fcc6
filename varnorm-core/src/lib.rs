//! # Variant normalization engine
//!
//! Classifies variant descriptions (genomic HGVS, gnomAD VCF, free text, amplifications),
//! resolves ambiguous duplication/deletion ranges, validates coordinates against a
//! reference sequence authority and assembles GA4GH VRS variations.
//!
//! ```no_run
//! use varnorm_core::{GeneTable, Normalizer};
//! use varnorm_refget::SequenceStore;
//!
//! let store = SequenceStore::from_fasta("GRCh38.fa.gz", "GRCh38").unwrap();
//! let genes = GeneTable::from_tsv("genes.tsv").unwrap();
//! let normalizer = Normalizer::new(&store, &genes);
//! let result = normalizer.to_vrs("7-140753336-A-T").unwrap();
//! println!("{}", serde_json::to_string_pretty(&result).unwrap());
//! ```

pub mod ambiguity;
pub mod assemble;
pub mod authority;
pub mod classify;
pub mod config;
pub mod copy_number;
pub mod errors;
pub mod gene;
pub mod interval;
pub mod normalizer;
pub mod results;
mod translate;
pub mod validate;
pub mod warnings;

pub use ambiguity::{AmbiguityMode, UncertainBoundsPolicy};
pub use authority::{GeneAuthority, GeneLocation, GeneMatch, SequenceAuthority};
pub use classify::{Dialect, Expression, classify};
pub use config::{ConfigError, NormalizerConfig};
pub use copy_number::{AmplificationOverride, CopyNumberEngine};
pub use errors::{AuthorityError, NormalizerError};
pub use gene::GeneTable;
pub use interval::Interval;
pub use normalizer::{NormalizeOptions, Normalizer, Request, Response};
pub use results::{AmplificationResult, NormalizationResult};
pub use validate::{CoordinateValidator, ValidatedLocation, ValidationIssue};
pub use warnings::WarningSink;
