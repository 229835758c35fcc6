//! Translation of classified genomic changes into VRS variations.
//!
//! `Translator` works on one candidate sequence at a time. The normalizer decides which
//! candidates to try (an HGVS accession, the assemblies for a gnomAD chromosome, the
//! locations of a gene) and which warnings to keep.

use log::debug;
use varnorm_vrs::{
    AlleleState, CopyChange, SequenceLocation, Variation, normalize as vrs_normalize,
};

use crate::ambiguity::{self, AmbiguityMode, AmbiguousRange};
use crate::assemble::{AssemblyInput, assemble};
use crate::classify::{DupDel, GenomicChange, VcfToken};
use crate::config::NormalizerConfig;
use crate::copy_number::{dup_del_change, dup_del_count};
use crate::errors::{NormalizerError, Result};
use crate::interval::Interval;
use crate::validate::{CoordinateValidator, ValidatedLocation, ValidationIssue, within_gene};
use crate::warnings::WarningSink;

pub(crate) const POSITION_ORDER: &str =
    "Positions should contain two different positions and should be listed from 5' to 3'";

/// How a deletion or duplication should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DupDelTarget {
    Default {
        trim: bool,
        baseline: Option<i64>,
        copy_change: Option<CopyChange>,
    },
    Allele,
    CopyNumberCount {
        baseline: i64,
    },
    CopyNumberChange {
        copy_change: Option<CopyChange>,
    },
}

impl DupDelTarget {
    fn mode(&self) -> AmbiguityMode {
        match self {
            DupDelTarget::Default { trim: true, .. } => AmbiguityMode::Trim,
            DupDelTarget::Default { trim: false, .. } => AmbiguityMode::Default,
            DupDelTarget::Allele => AmbiguityMode::Allele,
            DupDelTarget::CopyNumberCount { .. } => AmbiguityMode::CopyNumberCount,
            DupDelTarget::CopyNumberChange { .. } => AmbiguityMode::CopyNumberChange,
        }
    }
}

/// A gene location that every position of a free-text change must fall in.
pub(crate) struct GeneBounds<'g> {
    pub symbol: &'g str,
    pub location: &'g SequenceLocation,
}

pub(crate) struct Translator<'a> {
    validator: CoordinateValidator<'a>,
    config: &'a NormalizerConfig,
}

/// Unwrap a validation outcome, recording the issue as a warning.
fn checked<T>(
    outcome: std::result::Result<T, ValidationIssue>,
    warnings: &mut WarningSink,
) -> Result<Option<T>> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(issue) => {
            warnings.record(issue)?;
            Ok(None)
        }
    }
}

/// The 0-based interval for residues `start..=end`, or a warning.
fn residues(start: u64, end: u64, warnings: &mut WarningSink) -> Option<Interval> {
    if start > end {
        warnings.push(POSITION_ORDER);
        return None;
    }
    match Interval::from_residues(start, end) {
        Ok(interval) => Some(interval),
        Err(NormalizerError::InvalidArgument(reason)) => {
            warnings.push(reason);
            None
        }
        Err(_) => None,
    }
}

impl<'a> Translator<'a> {
    pub fn new(validator: CoordinateValidator<'a>, config: &'a NormalizerConfig) -> Self {
        Self { validator, config }
    }

    /// Translate `change` on the sequence named by `alias`.
    pub fn translate(
        &self,
        alias: &str,
        change: &GenomicChange,
        target: DupDelTarget,
        gene: Option<&GeneBounds>,
        warnings: &mut WarningSink,
    ) -> Result<Option<Variation>> {
        let interval = match change {
            GenomicChange::Substitution { position, .. } => residues(*position, *position, warnings),
            GenomicChange::Insertion { start, end, .. } => {
                if start >= end {
                    warnings.push(POSITION_ORDER);
                    None
                } else if end - start != 1 {
                    warnings.push(format!(
                        "Insertion positions {} and {} should be adjacent",
                        start, end
                    ));
                    None
                } else {
                    Some(Interval::insertion_after(*start))
                }
            }
            GenomicChange::Deletion { start, end, .. }
            | GenomicChange::Duplication { start, end }
            | GenomicChange::DeletionInsertion { start, end, .. }
            | GenomicChange::ReferenceAgree { start, end } => residues(*start, *end, warnings),
            GenomicChange::Ambiguous { kind, range } => {
                return self.translate_ambiguous(alias, *kind, range, target, gene, warnings);
            }
        };
        let Some(interval) = interval else {
            return Ok(None);
        };

        if let Some(gene) = gene {
            if checked(within_gene(interval, gene.location, alias, gene.symbol), warnings)?.is_none() {
                return Ok(None);
            }
        }
        let Some(located) = checked(self.validator.validate(alias, interval), warnings)? else {
            return Ok(None);
        };

        match change {
            GenomicChange::Substitution {
                reference, alternate, ..
            } => {
                if checked(self.validator.validate_reference(&located, reference), warnings)?.is_none() {
                    return Ok(None);
                }
                self.normalized_allele(&located, alternate, warnings)
            }
            GenomicChange::Deletion { deleted, .. } => {
                if let Some(deleted) = deleted {
                    if checked(self.validator.validate_reference(&located, deleted), warnings)?
                        .is_none()
                    {
                        return Ok(None);
                    }
                }
                self.exact_dup_del(&located, DupDel::Deletion, target, warnings)
            }
            GenomicChange::Duplication { .. } => {
                self.exact_dup_del(&located, DupDel::Duplication, target, warnings)
            }
            GenomicChange::Insertion { inserted, .. }
            | GenomicChange::DeletionInsertion { inserted, .. } => {
                self.normalized_allele(&located, inserted, warnings)
            }
            GenomicChange::ReferenceAgree { .. } => {
                let Some(reference) =
                    checked(self.validator.subsequence(&located, located.interval), warnings)?
                else {
                    return Ok(None);
                };
                let state = AlleleState::literal(&reference);
                Ok(Some(assemble(located.location(), AssemblyInput::State(state))?))
            }
            GenomicChange::Ambiguous { .. } => Ok(None),
        }
    }

    /// A gnomAD VCF allele on one candidate sequence.
    pub fn translate_vcf(
        &self,
        alias: &str,
        token: &VcfToken,
        warnings: &mut WarningSink,
    ) -> Result<Option<Variation>> {
        // Saturates so an oversized position is reported as out of index.
        let last = token
            .position
            .saturating_add(token.reference.len() as u64 - 1);
        let Some(interval) = residues(token.position, last, warnings) else {
            return Ok(None);
        };
        let Some(located) = checked(self.validator.validate(alias, interval), warnings)? else {
            return Ok(None);
        };
        if checked(self.validator.validate_reference(&located, &token.reference), warnings)?.is_none() {
            return Ok(None);
        }
        self.normalized_allele(&located, &token.alternate, warnings)
    }

    fn exact_dup_del(
        &self,
        located: &ValidatedLocation,
        kind: DupDel,
        target: DupDelTarget,
        warnings: &mut WarningSink,
    ) -> Result<Option<Variation>> {
        match target {
            DupDelTarget::Default {
                baseline: Some(baseline),
                ..
            }
            | DupDelTarget::CopyNumberCount { baseline } => {
                Ok(Some(dup_del_count(located.location(), kind, baseline)?))
            }
            DupDelTarget::CopyNumberChange { copy_change } => {
                Ok(Some(dup_del_change(located.location(), kind, copy_change)?))
            }
            DupDelTarget::Default { baseline: None, .. } | DupDelTarget::Allele => {
                let alternate = match kind {
                    DupDel::Deletion => String::new(),
                    DupDel::Duplication => {
                        let Some(reference) = checked(
                            self.validator.subsequence(located, located.interval),
                            warnings,
                        )?
                        else {
                            return Ok(None);
                        };
                        reference.repeat(2)
                    }
                };
                self.normalized_allele(located, &alternate, warnings)
            }
        }
    }

    fn translate_ambiguous(
        &self,
        alias: &str,
        kind: DupDel,
        range: &AmbiguousRange,
        target: DupDelTarget,
        gene: Option<&GeneBounds>,
        warnings: &mut WarningSink,
    ) -> Result<Option<Variation>> {
        let expression = format!("{}{}", range, kind.as_str());
        let resolved =
            match ambiguity::resolve(range, target.mode(), self.config.uncertain_bounds) {
                Ok(resolved) => resolved,
                Err(err) => {
                    warnings.push(err.warning(&expression));
                    return Ok(None);
                }
            };
        debug!("{} resolved to {:?} on {}", expression, resolved.class, resolved.interval);

        if let Some(gene) = gene {
            let bounded = within_gene(resolved.interval, gene.location, alias, gene.symbol);
            if checked(bounded, warnings)?.is_none() {
                return Ok(None);
            }
        }
        let Some(located) = checked(self.validator.validate(alias, resolved.interval), warnings)?
        else {
            return Ok(None);
        };
        let location = located.location();

        let variation: Variation = match target {
            DupDelTarget::Allele => {
                let state = match kind {
                    DupDel::Deletion => AlleleState::literal(""),
                    DupDel::Duplication => AlleleState::ReferenceLengthExpression {
                        length: 2 * location.len(),
                        repeat_subunit_length: location.len(),
                        sequence: None,
                    },
                };
                assemble(location, AssemblyInput::State(state))?
            }
            DupDelTarget::Default {
                baseline: Some(baseline),
                ..
            }
            | DupDelTarget::CopyNumberCount { baseline } => {
                dup_del_count(location, kind, baseline)?
            }
            DupDelTarget::Default {
                baseline: None,
                copy_change,
                ..
            }
            | DupDelTarget::CopyNumberChange { copy_change } => {
                dup_del_change(location, kind, copy_change)?
            }
        };
        Ok(Some(variation))
    }

    /// Fully-justified normalization of `alternate` replacing the validated interval.
    ///
    /// Only a window around the allele is fetched. The window doubles while the
    /// normalized allele touches one of its edges that is not a sequence end.
    fn normalized_allele(
        &self,
        located: &ValidatedLocation,
        alternate: &str,
        warnings: &mut WarningSink,
    ) -> Result<Option<Variation>> {
        let mut flank = self.config.normalize_window.max(1);
        loop {
            let Some((window, residues)) = checked(self.validator.window(located, flank), warnings)?
            else {
                return Ok(None);
            };
            let offset = (located.interval.start() - window.start()) as usize;
            let reference = residues
                .get(offset..offset + located.interval.len() as usize)
                .unwrap_or_default();
            let normalized = vrs_normalize(
                residues.as_bytes(),
                offset as u64,
                reference.as_bytes(),
                alternate.to_ascii_uppercase().as_bytes(),
                self.config.rle_sequence_limit,
            )
            .map_err(|e| NormalizerError::InvalidArgument(e.to_string()))?;

            let touches_left = normalized.start == 0 && window.start() > 0;
            let touches_right =
                normalized.end == window.len() && window.end() < located.sequence_length;
            if touches_left || touches_right {
                debug!("normalization reached the edge of {}, widening", window);
                flank = flank.saturating_mul(2);
                continue;
            }

            let location = SequenceLocation::new(
                located.reference.clone(),
                window.start() + normalized.start,
                window.start() + normalized.end,
            );
            return Ok(Some(assemble(location, AssemblyInput::State(normalized.state))?));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambiguity::UncertainBoundsPolicy;
    use crate::classify::parse_change;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use varnorm_refget::{SequenceStore, digest_sequence};

    // 1-based:        1234567890123456789012345
    const SEQUENCE: &[u8] = b"GGGGCACACACATTTTGCATGCAAA";

    #[fixture]
    fn store() -> SequenceStore {
        let mut store = SequenceStore::new().with_name("SeqRepo");
        store.add_sequence(digest_sequence("NC_TEST.1", SEQUENCE), Some("refseq"));
        store
    }

    fn run(
        store: &SequenceStore,
        config: &NormalizerConfig,
        change: &str,
        target: DupDelTarget,
    ) -> (Option<Variation>, Vec<String>) {
        let translator = Translator::new(CoordinateValidator::new(store), config);
        let mut warnings = WarningSink::new();
        let change = parse_change(change).unwrap();
        let variation = translator
            .translate("NC_TEST.1", &change, target, None, &mut warnings)
            .unwrap();
        (variation, warnings.into_vec())
    }

    fn allele_parts(variation: Variation) -> (u64, u64, AlleleState) {
        match variation {
            Variation::Allele(allele) => (allele.location.start, allele.location.end, allele.state),
            other => panic!("expected an allele, got {:?}", other),
        }
    }

    const DEFAULT: DupDelTarget = DupDelTarget::Default {
        trim: false,
        baseline: None,
        copy_change: None,
    };

    #[rstest]
    fn substitution(store: SequenceStore) {
        let (variation, warnings) = run(&store, &NormalizerConfig::default(), "2G>T", DEFAULT);
        assert!(warnings.is_empty());
        assert_eq!(allele_parts(variation.unwrap()), (1, 2, AlleleState::literal("T")));
    }

    #[rstest]
    fn substitution_reference_mismatch(store: SequenceStore) {
        let (variation, warnings) = run(&store, &NormalizerConfig::default(), "2A>T", DEFAULT);
        assert_eq!(variation, None);
        assert_eq!(
            warnings,
            vec!["Expected to find A at positions (2, 2) on NC_TEST.1 but found G"]
        );
    }

    #[rstest]
    #[case(NormalizerConfig::default())]
    #[case(NormalizerConfig { normalize_window: 1, ..NormalizerConfig::default() })]
    fn repeat_deletion_rolls_through_window(store: SequenceStore, #[case] config: NormalizerConfig) {
        // deleting one CA unit of CACACACA (positions 5-12)
        let (variation, _) = run(&store, &config, "7_8del", DEFAULT);
        assert_eq!(
            allele_parts(variation.unwrap()),
            (
                4,
                12,
                AlleleState::ReferenceLengthExpression {
                    length: 6,
                    repeat_subunit_length: 2,
                    sequence: Some("CACACA".to_string()),
                }
            )
        );
    }

    #[rstest]
    fn duplication_allele(store: SequenceStore) {
        let (variation, _) = run(&store, &NormalizerConfig::default(), "13_16dup", DEFAULT);
        assert_eq!(
            allele_parts(variation.unwrap()),
            (
                12,
                16,
                AlleleState::ReferenceLengthExpression {
                    length: 8,
                    repeat_subunit_length: 4,
                    sequence: Some("TTTTTTTT".to_string()),
                }
            )
        );
    }

    #[rstest]
    fn insertion_needs_adjacent_flanks(store: SequenceStore) {
        let config = NormalizerConfig::default();
        let (variation, _) = run(&store, &config, "16_17insA", DEFAULT);
        assert_eq!(allele_parts(variation.unwrap()), (16, 16, AlleleState::literal("A")));

        let (variation, warnings) = run(&store, &config, "16_18insA", DEFAULT);
        assert_eq!(variation, None);
        assert_eq!(warnings, vec!["Insertion positions 16 and 18 should be adjacent"]);
    }

    #[rstest]
    fn reference_agree_is_not_normalized(store: SequenceStore) {
        let (variation, _) = run(&store, &NormalizerConfig::default(), "5_8=", DEFAULT);
        assert_eq!(allele_parts(variation.unwrap()), (4, 8, AlleleState::literal("CACA")));
    }

    #[rstest]
    fn exact_deletion_copy_number(store: SequenceStore) {
        let config = NormalizerConfig::default();
        let (variation, _) = run(
            &store,
            &config,
            "7_8del",
            DupDelTarget::CopyNumberCount { baseline: 2 },
        );
        match variation.unwrap() {
            Variation::CopyNumberCount(cn) => {
                assert_eq!((cn.location.start, cn.location.end, cn.copies), (6, 8, 1));
            }
            other => panic!("expected a CopyNumberCount, got {:?}", other),
        }

        let (variation, _) = run(
            &store,
            &config,
            "7_8del",
            DupDelTarget::CopyNumberChange { copy_change: None },
        );
        match variation.unwrap() {
            Variation::CopyNumberChange(cx) => assert_eq!(cx.copy_change, CopyChange::Loss),
            other => panic!("expected a CopyNumberChange, got {:?}", other),
        }
    }

    #[rstest]
    fn ambiguous_duplication(store: SequenceStore) {
        let config = NormalizerConfig::default();
        let (variation, _) = run(&store, &config, "(2_3)_(10_12)dup", DEFAULT);
        match variation.unwrap() {
            Variation::CopyNumberChange(cx) => {
                assert_eq!(cx.copy_change, CopyChange::Gain);
                assert_eq!((cx.location.start, cx.location.end), (1, 12));
            }
            other => panic!("expected a CopyNumberChange, got {:?}", other),
        }

        let (variation, _) = run(&store, &config, "(2_3)_(10_12)dup", DupDelTarget::Allele);
        assert_eq!(
            allele_parts(variation.unwrap()),
            (
                1,
                12,
                AlleleState::ReferenceLengthExpression {
                    length: 22,
                    repeat_subunit_length: 11,
                    sequence: None,
                }
            )
        );
    }

    #[rstest]
    fn ambiguous_range_warnings(store: SequenceStore) {
        let config = NormalizerConfig::default();
        let (variation, warnings) = run(&store, &config, "(?_3)_(12_?)del", DupDelTarget::Allele);
        assert_eq!(variation, None);
        assert_eq!(warnings, vec!["(?_3)_(12_?)del is not supported in allele mode"]);

        let (variation, warnings) = run(&store, &config, "(?_3)_12del", DupDelTarget::Allele);
        assert_eq!(allele_parts(variation.unwrap()), (2, 12, AlleleState::literal("")));
        assert!(warnings.is_empty());

        let reject = NormalizerConfig {
            uncertain_bounds: UncertainBoundsPolicy::Reject,
            ..NormalizerConfig::default()
        };
        let (variation, warnings) = run(&store, &reject, "(?_3)_(12_?)del", DEFAULT);
        assert_eq!(variation, None);
        assert_eq!(warnings, vec!["(?_3)_(12_?)del is an unsupported ambiguous expression"]);

        let (_, warnings) = run(&store, &config, "(3_?)_(?_12)del", DEFAULT);
        assert_eq!(warnings, vec!["(3_?)_(?_12)del is an unsupported ambiguous expression"]);

        let (_, warnings) = run(&store, &config, "(12_13)_(2_3)del", DEFAULT);
        assert_eq!(warnings, vec![POSITION_ORDER]);
    }

    #[rstest]
    fn positions_must_be_ordered(store: SequenceStore) {
        let (variation, warnings) = run(&store, &NormalizerConfig::default(), "8_7del", DEFAULT);
        assert_eq!(variation, None);
        assert_eq!(warnings, vec![POSITION_ORDER]);
    }

    #[rstest]
    fn out_of_range(store: SequenceStore) {
        let (variation, warnings) = run(&store, &NormalizerConfig::default(), "20_30del", DEFAULT);
        assert_eq!(variation, None);
        assert_eq!(
            warnings,
            vec!["End inter-residue coordinate (29) is out of index on NC_TEST.1"]
        );
    }
}
