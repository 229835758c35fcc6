//! VRS digest computation.
//!
//! Computes GA4GH VRS digests by canonical JSON serialization + SHA-512/24u. Nested
//! identifiable objects (the location of a variation) are replaced by their digest before
//! the enclosing object is hashed. Only the GA4GH key set of each object takes part.

use serde_json::{Value, json};
use varnorm_refget::{canonicalize_json, sha512t24u};

use crate::models::{
    Allele, AlleleState, CopyNumberChange, CopyNumberCount, MappableConcept, SequenceLocation,
};

fn digest_value(value: &Value) -> String {
    sha512t24u(canonicalize_json(value).as_bytes())
}

/// Compute the GA4GH digest for a SequenceLocation.
pub fn sequence_location_digest(loc: &SequenceLocation) -> String {
    let json_val = json!({
        "end": loc.end,
        "sequenceReference": {
            "refgetAccession": loc.sequence_reference.refget_accession,
            "type": "SequenceReference"
        },
        "start": loc.start,
        "type": "SequenceLocation"
    });
    digest_value(&json_val)
}

fn allele_state_json(state: &AlleleState) -> Value {
    match state {
        AlleleState::LiteralSequenceExpression { sequence } => json!({
            "sequence": sequence,
            "type": "LiteralSequenceExpression"
        }),
        // `sequence` is informative only and not part of the RLE digest
        AlleleState::ReferenceLengthExpression {
            length,
            repeat_subunit_length,
            ..
        } => json!({
            "length": length,
            "repeatSubunitLength": repeat_subunit_length,
            "type": "ReferenceLengthExpression"
        }),
    }
}

/// Compute the GA4GH digest for an Allele.
pub fn allele_digest(allele: &Allele) -> String {
    let json_val = json!({
        "location": sequence_location_digest(&allele.location),
        "state": allele_state_json(&allele.state),
        "type": "Allele"
    });
    digest_value(&json_val)
}

/// Compute the full GA4GH VRS identifier for an Allele.
pub fn allele_identifier(allele: &Allele) -> String {
    format!("ga4gh:VA.{}", allele_digest(allele))
}

/// Compute the GA4GH digest for a CopyNumberCount.
pub fn copy_number_count_digest(cn: &CopyNumberCount) -> String {
    let json_val = json!({
        "copies": cn.copies,
        "location": sequence_location_digest(&cn.location),
        "type": "CopyNumberCount"
    });
    digest_value(&json_val)
}

/// Compute the GA4GH digest for a CopyNumberChange.
pub fn copy_number_change_digest(cx: &CopyNumberChange) -> String {
    let concept = MappableConcept::from(cx.copy_change);
    let json_val = json!({
        "copyChange": {"primaryCode": concept.primary_code},
        "location": sequence_location_digest(&cx.location),
        "type": "CopyNumberChange"
    });
    digest_value(&json_val)
}

/// Objects carrying a GA4GH `id` and `digest`.
pub trait Identifiable: Sized {
    /// Type prefix used in `ga4gh:<PREFIX>.<digest>`.
    const PREFIX: &'static str;

    fn ga4gh_digest(&self) -> String;

    /// Full `ga4gh:` identifier.
    fn ga4gh_identifier(&self) -> String {
        format!("ga4gh:{}.{}", Self::PREFIX, self.ga4gh_digest())
    }

    /// Return the object with `id` and `digest` populated, nested objects included.
    fn identified(self) -> Self;
}

impl Identifiable for SequenceLocation {
    const PREFIX: &'static str = "SL";

    fn ga4gh_digest(&self) -> String {
        sequence_location_digest(self)
    }

    fn identified(mut self) -> Self {
        let digest = self.ga4gh_digest();
        self.id = Some(format!("ga4gh:{}.{}", Self::PREFIX, digest));
        self.digest = Some(digest);
        self
    }
}

impl Identifiable for Allele {
    const PREFIX: &'static str = "VA";

    fn ga4gh_digest(&self) -> String {
        allele_digest(self)
    }

    fn identified(mut self) -> Self {
        self.location = self.location.identified();
        let digest = self.ga4gh_digest();
        self.id = Some(format!("ga4gh:{}.{}", Self::PREFIX, digest));
        self.digest = Some(digest);
        self
    }
}

impl Identifiable for CopyNumberCount {
    const PREFIX: &'static str = "CN";

    fn ga4gh_digest(&self) -> String {
        copy_number_count_digest(self)
    }

    fn identified(mut self) -> Self {
        self.location = self.location.identified();
        let digest = self.ga4gh_digest();
        self.id = Some(format!("ga4gh:{}.{}", Self::PREFIX, digest));
        self.digest = Some(digest);
        self
    }
}

impl Identifiable for CopyNumberChange {
    const PREFIX: &'static str = "CX";

    fn ga4gh_digest(&self) -> String {
        copy_number_change_digest(self)
    }

    fn identified(mut self) -> Self {
        self.location = self.location.identified();
        let digest = self.ga4gh_digest();
        self.id = Some(format!("ga4gh:{}.{}", Self::PREFIX, digest));
        self.digest = Some(digest);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CopyChange, SequenceReference};
    use pretty_assertions::assert_eq;

    fn egfr_location() -> SequenceLocation {
        SequenceLocation::new(
            SequenceReference::new("SQ.F-LrLnMKIjgbR1HECnsl_VGjXfs3QHDE"),
            55181319,
            55181320,
        )
    }

    #[test]
    fn test_sequence_location_digest_deterministic() {
        let loc = egfr_location();
        let d1 = sequence_location_digest(&loc);
        let d2 = sequence_location_digest(&loc);
        assert_eq!(d1, d2);
        assert_eq!(d1.len(), 32);
    }

    #[test]
    fn test_digest_ignores_ids_and_aliases() {
        let plain = egfr_location();
        let mut decorated = egfr_location().identified();
        decorated.sequence_reference = decorated.sequence_reference.with_alias("NC_000007.13");
        assert_eq!(
            sequence_location_digest(&plain),
            sequence_location_digest(&decorated)
        );
    }

    #[test]
    fn test_allele_identifier_format() {
        let allele = Allele::new(egfr_location(), AlleleState::literal("T"));
        let id = allele_identifier(&allele);
        assert!(id.starts_with("ga4gh:VA."));
        assert_eq!(id.len(), 9 + 32);
    }

    #[test]
    fn test_rle_sequence_not_digested() {
        let with_seq = Allele::new(
            egfr_location(),
            AlleleState::ReferenceLengthExpression {
                length: 2,
                repeat_subunit_length: 1,
                sequence: Some("AA".to_string()),
            },
        );
        let without_seq = Allele::new(
            egfr_location(),
            AlleleState::ReferenceLengthExpression {
                length: 2,
                repeat_subunit_length: 1,
                sequence: None,
            },
        );
        assert_eq!(allele_digest(&with_seq), allele_digest(&without_seq));
    }

    #[test]
    fn test_identified_populates_nested_ids() {
        let cx = CopyNumberChange::new(egfr_location(), CopyChange::HighLevelGain).identified();

        let location_digest = sequence_location_digest(&cx.location);
        assert_eq!(cx.location.digest.as_deref(), Some(location_digest.as_str()));
        assert_eq!(
            cx.location.id,
            Some(format!("ga4gh:SL.{}", location_digest))
        );
        let id = cx.id.clone().unwrap();
        assert!(id.starts_with("ga4gh:CX."));
        assert_eq!(id, cx.ga4gh_identifier());
    }

    #[test]
    fn test_copy_change_and_copies_affect_digest() {
        let gain = CopyNumberChange::new(egfr_location(), CopyChange::Gain);
        let loss = CopyNumberChange::new(egfr_location(), CopyChange::Loss);
        assert_ne!(copy_number_change_digest(&gain), copy_number_change_digest(&loss));

        let two = CopyNumberCount::new(egfr_location(), 2);
        let three = CopyNumberCount::new(egfr_location(), 3);
        assert_ne!(copy_number_count_digest(&two), copy_number_count_digest(&three));
        assert!(two.ga4gh_identifier().starts_with("ga4gh:CN."));
    }
}
