//! # GA4GH VRS 2.0 objects
//!
//! This crate holds the canonical variation shapes produced by the normalizer:
//!
//! - VRS data models (Allele, SequenceLocation, CopyNumberCount, CopyNumberChange)
//!   with their JSON serialization
//! - VRS digest computation (canonical JSON serialization + SHA-512/24u) and
//!   `ga4gh:` identifiers
//! - Allele normalization (fully-justified, producing literal or reference-length states)

pub mod digest;
pub mod models;
pub mod normalize;

pub use digest::{
    Identifiable, allele_digest, allele_identifier, copy_number_change_digest,
    copy_number_count_digest, sequence_location_digest,
};
pub use models::{
    Allele, AlleleState, CopyChange, CopyNumberChange, CopyNumberCount, MappableConcept,
    ParseCopyChangeError, SequenceLocation, SequenceReference, Variation,
};
pub use normalize::{NormalizeError, NormalizedAllele, normalize};
