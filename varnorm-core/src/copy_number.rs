//! Copy-number variations: gene amplifications and dup/del copy-number renderings.

use log::warn;
use varnorm_vrs::{CopyChange, SequenceLocation, Variation};

use crate::assemble::{AssemblyInput, assemble};
use crate::authority::{GeneAuthority, SequenceAuthority};
use crate::classify::DupDel;
use crate::errors::{AuthorityError, NormalizerError, Result};
use crate::interval::Interval;
use crate::results::NormalizationResult;
use crate::validate::{CoordinateValidator, ValidatedLocation};
use crate::warnings::WarningSink;

/// Caller-supplied location replacing the gene authority's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmplificationOverride {
    pub sequence: String,
    pub interval: Interval,
}

impl AmplificationOverride {
    /// `start` and `end` are 1-based residues, mapped to `[start - 1, end)`.
    pub fn new(sequence: &str, start: u64, end: u64) -> Result<Self> {
        Ok(Self {
            sequence: sequence.to_string(),
            interval: Interval::from_residues(start, end)?,
        })
    }

    /// All three parts or none of them.
    pub fn from_parts(
        sequence: Option<&str>,
        start: Option<u64>,
        end: Option<u64>,
    ) -> Result<Option<Self>> {
        match (sequence, start, end) {
            (Some(sequence), Some(start), Some(end)) => Self::new(sequence, start, end).map(Some),
            (None, None, None) => Ok(None),
            _ => Err(NormalizerError::InvalidArgument(
                "sequence, start and end must be given together".to_string(),
            )),
        }
    }
}

/// Copies left after a deletion or duplication on a `baseline`.
pub fn derived_copies(kind: DupDel, baseline: i64) -> Result<i64> {
    if baseline < 0 {
        return Err(NormalizerError::InvalidArgument(format!(
            "baseline_copies must be zero or greater, got {}",
            baseline
        )));
    }
    match kind {
        DupDel::Deletion if baseline == 0 => Err(NormalizerError::InvalidArgument(
            "a deletion on baseline_copies 0 leaves -1 copies".to_string(),
        )),
        DupDel::Deletion => Ok(baseline - 1),
        DupDel::Duplication => baseline.checked_add(1).ok_or_else(|| {
            NormalizerError::InvalidArgument(format!(
                "a duplication on baseline_copies {} overflows",
                baseline
            ))
        }),
    }
}

pub fn default_copy_change(kind: DupDel) -> CopyChange {
    match kind {
        DupDel::Deletion => CopyChange::Loss,
        DupDel::Duplication => CopyChange::Gain,
    }
}

pub fn dup_del_count(location: SequenceLocation, kind: DupDel, baseline: i64) -> Result<Variation> {
    assemble(location, AssemblyInput::Copies(derived_copies(kind, baseline)?))
}

pub fn dup_del_change(
    location: SequenceLocation,
    kind: DupDel,
    copy_change: Option<CopyChange>,
) -> Result<Variation> {
    let copy_change = copy_change.unwrap_or(default_copy_change(kind));
    assemble(location, AssemblyInput::CopyChange(copy_change))
}

pub struct CopyNumberEngine<'a> {
    sequences: &'a dyn SequenceAuthority,
    genes: &'a dyn GeneAuthority,
}

impl<'a> CopyNumberEngine<'a> {
    pub fn new(sequences: &'a dyn SequenceAuthority, genes: &'a dyn GeneAuthority) -> Self {
        Self { sequences, genes }
    }

    fn high_level_gain(&self, located: &ValidatedLocation) -> Result<NormalizationResult> {
        let cx = assemble(
            located.location(),
            AssemblyInput::CopyChange(CopyChange::HighLevelGain),
        )?;
        Ok(NormalizationResult::new(Some(cx), None, WarningSink::new()))
    }

    fn validated(
        &self,
        alias: &str,
        interval: Interval,
        warnings: &mut WarningSink,
    ) -> Result<Option<ValidatedLocation>> {
        match CoordinateValidator::new(self.sequences).validate(alias, interval) {
            Ok(located) => Ok(Some(located)),
            Err(issue) => {
                warnings.record(issue)?;
                Ok(None)
            }
        }
    }

    /// A high-level gain on the gene's priority location, or on `location_override`.
    pub fn amplification_by_gene(
        &self,
        gene: &str,
        location_override: Option<&AmplificationOverride>,
    ) -> Result<NormalizationResult> {
        let mut warnings = WarningSink::new();
        let found = match self.genes.lookup(gene) {
            Ok(found) => found,
            Err(AuthorityError::Unavailable(reason)) => {
                return Err(AuthorityError::unavailable(self.genes.name(), reason));
            }
            Err(AuthorityError::NotFound(_)) => None,
        };
        let Some(found) = found else {
            warn!("no gene match for {}", gene);
            warnings.push(format!(
                "{} returned no match for gene: {}",
                self.genes.name(),
                gene
            ));
            return Ok(NormalizationResult::empty(warnings));
        };
        let label = Some(format!("{} Amplification", found.symbol));

        let (alias, interval) = match location_override {
            Some(o) => (o.sequence.clone(), o.interval),
            None => match found.priority_location() {
                Some(location) => (
                    format!("ga4gh:{}", location.sequence_reference.refget_accession),
                    Interval::new(location.start, location.end)?,
                ),
                None => {
                    warnings.push(format!(
                        "{} could not find a priority sequence location for gene: {}",
                        self.genes.name(),
                        found.symbol.to_ascii_uppercase()
                    ));
                    return Ok(NormalizationResult::empty(warnings).with_label(label));
                }
            },
        };

        match self.validated(&alias, interval, &mut warnings)? {
            Some(located) => Ok(self.high_level_gain(&located)?.with_label(label)),
            None => Ok(NormalizationResult::empty(warnings).with_label(label)),
        }
    }

    /// A high-level gain on an explicit location; no gene is involved, so no label.
    pub fn amplification_by_coordinates(
        &self,
        location: &AmplificationOverride,
    ) -> Result<NormalizationResult> {
        let mut warnings = WarningSink::new();
        match self.validated(&location.sequence, location.interval, &mut warnings)? {
            Some(located) => self.high_level_gain(&located),
            None => Ok(NormalizationResult::empty(warnings)),
        }
    }
}
