//! VRS 2.0 compliance tests.
//!
//! Test vectors from the official GA4GH VRS specification:
//! - https://github.com/ga4gh/vrs/blob/2.0/validation/models.yaml
//! - https://github.com/ga4gh/vrs-python/blob/main/tests/test_vrs.py

use pretty_assertions::assert_eq;
use rstest::rstest;
use varnorm_vrs::digest::{Identifiable, allele_identifier, sequence_location_digest};
use varnorm_vrs::models::{Allele, AlleleState, SequenceLocation, SequenceReference};

fn location(accession: &str, start: u64, end: u64) -> SequenceLocation {
    SequenceLocation::new(SequenceReference::new(accession), start, end)
}

// ============================================================================
// sha512t24u primitive tests (already tested in varnorm-refget, but sanity check)
// ============================================================================

#[test]
fn test_sha512t24u_empty_string() {
    assert_eq!(varnorm_refget::sha512t24u(""), "z4PhNX7vuL3xVChQ1m2AB9Yg5AULVxXc");
}

#[test]
fn test_sha512t24u_acgt() {
    assert_eq!(varnorm_refget::sha512t24u("ACGT"), "aKF498dAxcJAqme6QYQ7EZ07-fiw8Kw2");
}

// ============================================================================
// VRS 2.0 SequenceLocation digest tests
// ============================================================================

#[rstest]
// rs7412 on chr19 (NC_000019.10)
#[case("SQ.IIB53T8CNeJJdUqzn9V_JnRtQadwWCbl", 44908821, 44908822, "wIlaGykfwHIpPY2Fcxtbx4TINbbODFVz")]
// chr7 location (NC_000007.14)
#[case("SQ.F-LrLMe1SRpfUZHkQmvkVKFEGaoDeHul", 44908821, 44908822, "4t6JnYWqHwYw9WzBT_lmWBb3tLQNalkT")]
// EGFR region on chr7
#[case("SQ.F-LrLMe1SRpfUZHkQmvkVKFEGaoDeHul", 55181319, 55181320, "_G2K0qSioM74l_u3OaKR0mgLYdeTL7Xd")]
fn test_sequence_location_digest(
    #[case] accession: &str,
    #[case] start: u64,
    #[case] end: u64,
    #[case] expected: &str,
) {
    let loc = location(accession, start, end);
    assert_eq!(sequence_location_digest(&loc), expected);

    let identified = loc.identified();
    assert_eq!(identified.id, Some(format!("ga4gh:SL.{}", expected)));
}

// ============================================================================
// VRS 2.0 Allele identifier tests
// ============================================================================

#[rstest]
// rs7412 C>T on chr19
#[case("SQ.IIB53T8CNeJJdUqzn9V_JnRtQadwWCbl", 44908821, 44908822, "ga4gh:VA.0AePZIWZUNsUlQTamyLrjm2HWUw2opLt")]
// EGFR SNV on chr7
#[case("SQ.F-LrLMe1SRpfUZHkQmvkVKFEGaoDeHul", 55181319, 55181320, "ga4gh:VA.Hy2XU_-rp4IMh6I_1NXNecBo8Qx8n0oE")]
// ClinVar 383650
#[case("SQ.KEO-4XBcm1cxeo_DIQ8_ofqGUkp4iZhI", 128325834, 128325835, "ga4gh:VA.SZIS2ua7AL-0YgUTAqyBsFPYK3vE8h_d")]
fn test_allele_identifier_literal(
    #[case] accession: &str,
    #[case] start: u64,
    #[case] end: u64,
    #[case] expected: &str,
) {
    let allele = Allele::new(location(accession, start, end), AlleleState::literal("T"));
    assert_eq!(allele_identifier(&allele), expected);
    assert_eq!(allele.identified().id.as_deref(), Some(expected));
}

#[rstest]
#[case(None)]
#[case(Some("GCAGCAGCAGC"))]
fn test_allele_identifier_reference_length_expression(#[case] sequence: Option<&str>) {
    // ReferenceLengthExpression allele on chr1; the literal sequence is informative only
    let allele = Allele::new(
        location("SQ.Ya6Rs7DHhDeg7YaOSg1EoNi3U_nQ9SvO", 40819438, 40819446),
        AlleleState::ReferenceLengthExpression {
            length: 11,
            repeat_subunit_length: 3,
            sequence: sequence.map(String::from),
        },
    );
    assert_eq!(
        allele_identifier(&allele),
        "ga4gh:VA.Oop4kjdTtKcg1kiZjIJAAR3bp7qi4aNT",
        "Allele identifier for RLE allele does not match VRS 2.0 spec"
    );
}
