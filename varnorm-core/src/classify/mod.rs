//! Lexical classification of variant descriptions.
//!
//! `classify` never consults an authority. Input it cannot place becomes
//! `Expression::Unrecognized`, which the normalizer turns into a warning.

mod amplification;
mod gnomad;
mod hgvs;

use std::fmt;

pub use gnomad::VcfToken;
pub use hgvs::parse_change;

use crate::ambiguity::AmbiguousRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DupDel {
    Deletion,
    Duplication,
}

impl DupDel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DupDel::Deletion => "del",
            DupDel::Duplication => "dup",
        }
    }
}

/// A genomic (`g.`) change. Positions are 1-based residues as written; single-position
/// forms have `end == start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenomicChange {
    Substitution {
        position: u64,
        reference: String,
        alternate: String,
    },
    Deletion {
        start: u64,
        end: u64,
        deleted: Option<String>,
    },
    /// Inserted between the flanking residues `start` and `end`.
    Insertion {
        start: u64,
        end: u64,
        inserted: String,
    },
    Duplication {
        start: u64,
        end: u64,
    },
    DeletionInsertion {
        start: u64,
        end: u64,
        inserted: String,
    },
    ReferenceAgree {
        start: u64,
        end: u64,
    },
    Ambiguous {
        kind: DupDel,
        range: AmbiguousRange,
    },
}

impl GenomicChange {
    /// Exact deletions and duplications, as `(kind, start, end)`.
    pub fn exact_dup_del(&self) -> Option<(DupDel, u64, u64)> {
        match *self {
            GenomicChange::Deletion { start, end, .. } => Some((DupDel::Deletion, start, end)),
            GenomicChange::Duplication { start, end } => Some((DupDel::Duplication, start, end)),
            _ => None,
        }
    }

    pub fn is_dup_del(&self) -> bool {
        self.exact_dup_del().is_some() || matches!(self, GenomicChange::Ambiguous { .. })
    }

    fn hgvs_dialect(&self) -> Dialect {
        match self {
            GenomicChange::Substitution { .. } => Dialect::HgvsSubstitution,
            GenomicChange::Deletion { .. } => Dialect::HgvsDeletion,
            GenomicChange::Insertion { .. } => Dialect::HgvsInsertion,
            GenomicChange::Duplication { .. } => Dialect::HgvsDuplication,
            GenomicChange::DeletionInsertion { .. } => Dialect::HgvsDeletionInsertion,
            GenomicChange::ReferenceAgree { .. } => Dialect::HgvsReferenceAgree,
            GenomicChange::Ambiguous {
                kind: DupDel::Deletion,
                ..
            } => Dialect::HgvsAmbiguousDeletion,
            GenomicChange::Ambiguous {
                kind: DupDel::Duplication,
                ..
            } => Dialect::HgvsAmbiguousDuplication,
        }
    }
}

/// The fixed set of dialect tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    HgvsSubstitution,
    HgvsDeletion,
    HgvsInsertion,
    HgvsDuplication,
    HgvsDeletionInsertion,
    HgvsReferenceAgree,
    HgvsAmbiguousDeletion,
    HgvsAmbiguousDuplication,
    GnomadVcf,
    FreeTextGenomic,
    AmplificationByGene,
    AmplificationByCoordinates,
    Unrecognized,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A classified input, carrying what was parsed out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Hgvs {
        accession: String,
        change: GenomicChange,
    },
    GnomadVcf(VcfToken),
    FreeTextGenomic {
        gene: String,
        change: GenomicChange,
    },
    AmplificationByGene {
        gene: String,
    },
    AmplificationByCoordinates {
        sequence: String,
        start: u64,
        end: u64,
    },
    Unrecognized,
}

impl Expression {
    pub fn dialect(&self) -> Dialect {
        match self {
            Expression::Hgvs { change, .. } => change.hgvs_dialect(),
            Expression::GnomadVcf(_) => Dialect::GnomadVcf,
            Expression::FreeTextGenomic { .. } => Dialect::FreeTextGenomic,
            Expression::AmplificationByGene { .. } => Dialect::AmplificationByGene,
            Expression::AmplificationByCoordinates { .. } => Dialect::AmplificationByCoordinates,
            Expression::Unrecognized => Dialect::Unrecognized,
        }
    }
}

/// Assign `input` to exactly one dialect.
pub fn classify(input: &str) -> Expression {
    let input = input.trim();
    let expression = hgvs::parse_hgvs(input)
        .or_else(|| gnomad::parse_gnomad_vcf(input).map(Expression::GnomadVcf))
        .or_else(|| amplification::parse_by_coordinates(input))
        .or_else(|| amplification::parse_by_gene(input))
        .or_else(|| hgvs::parse_free_text(input))
        .unwrap_or(Expression::Unrecognized);
    log::debug!("classified {:?} as {}", input, expression.dialect());
    expression
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("NC_000007.14:g.140753336A>T", Dialect::HgvsSubstitution)]
    #[case("NC_000007.14:g.140753336_140753338del", Dialect::HgvsDeletion)]
    #[case("NC_000007.14:g.140753336delA", Dialect::HgvsDeletion)]
    #[case("NC_000007.14:g.140753336_140753337insTT", Dialect::HgvsInsertion)]
    #[case("NC_000007.14:g.140753336dup", Dialect::HgvsDuplication)]
    #[case("NC_000007.14:g.140753336_140753338delinsGG", Dialect::HgvsDeletionInsertion)]
    #[case("NC_000007.14:g.140753336=", Dialect::HgvsReferenceAgree)]
    #[case("NC_000023.11:g.(31060227_31100351)_(33274278_33417151)dup", Dialect::HgvsAmbiguousDuplication)]
    #[case("NC_000023.11:g.(?_31120496)_(33339477_?)del", Dialect::HgvsAmbiguousDeletion)]
    #[case("NC_000023.11:g.(?_155980375)_156013167del", Dialect::HgvsAmbiguousDeletion)]
    #[case("7-140753336-A-T", Dialect::GnomadVcf)]
    #[case("chr7-140753336-A-T", Dialect::GnomadVcf)]
    #[case("BRAF g.140753336A>T", Dialect::FreeTextGenomic)]
    #[case("BRAF Amplification", Dialect::AmplificationByGene)]
    #[case("NC_000007.14:g.140719327-140924929 amplification", Dialect::AmplificationByCoordinates)]
    #[case("BRAF V600E", Dialect::Unrecognized)]
    #[case("NC_000007.14:c.1799T>A", Dialect::Unrecognized)]
    #[case("NC_000007.14:g.140753336_140753337ins", Dialect::Unrecognized)]
    #[case("", Dialect::Unrecognized)]
    fn classifies_dialects(#[case] input: &str, #[case] expected: Dialect) {
        assert_eq!(classify(input).dialect(), expected);
    }

    #[test]
    fn classification_is_deterministic() {
        let input = "NC_000007.14:g.140753336A>T";
        assert_eq!(classify(input), classify(input));
    }

    #[test]
    fn dup_del_helpers() {
        let Expression::Hgvs { change, .. } = classify("NC_000007.14:g.10_12dup") else {
            panic!("expected HGVS");
        };
        assert_eq!(change.exact_dup_del(), Some((DupDel::Duplication, 10, 12)));
        assert!(change.is_dup_del());
    }
}
