//! Coordinate validation against the sequence authority.
//!
//! Every recoverable problem comes back as a `ValidationIssue`; callers push it into
//! their `WarningSink`. Only `ValidationIssue::Unavailable` turns into a hard error.

use varnorm_vrs::{SequenceLocation, SequenceReference};

use crate::authority::SequenceAuthority;
use crate::errors::{AuthorityError, Result};
use crate::interval::Interval;

/// A recoverable validation problem, or an unreachable authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    UnresolvedAlias {
        authority: String,
        alias: String,
    },
    OutOfRange {
        alias: String,
        end: u64,
    },
    ReferenceMismatch {
        alias: String,
        interval: Interval,
        expected: String,
        actual: String,
    },
    /// A position given relative to a gene falls outside the gene's location.
    GeneRange {
        alias: String,
        position: u64,
        gene: String,
    },
    Unavailable {
        authority: String,
        reason: String,
    },
}

impl ValidationIssue {
    pub fn into_warning(self) -> Result<String> {
        match self {
            ValidationIssue::UnresolvedAlias { authority, alias } => Ok(format!(
                "{} unable to get translated identifiers for {}",
                authority, alias
            )),
            ValidationIssue::OutOfRange { alias, end } => Ok(format!(
                "End inter-residue coordinate ({}) is out of index on {}",
                end.saturating_sub(1),
                alias
            )),
            ValidationIssue::ReferenceMismatch {
                alias,
                interval,
                expected,
                actual,
            } => Ok(format!(
                "Expected to find {} at positions ({}, {}) on {} but found {}",
                expected,
                interval.start() + 1,
                interval.end(),
                alias,
                actual
            )),
            ValidationIssue::GeneRange {
                alias,
                position,
                gene,
            } => Ok(format!(
                "Position {} out of index on {} on gene, {}",
                position,
                alias,
                gene.to_ascii_uppercase()
            )),
            ValidationIssue::Unavailable { authority, reason } => {
                Err(AuthorityError::unavailable(&authority, reason))
            }
        }
    }
}

/// A location whose sequence resolved and whose interval lies within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLocation {
    /// The accession string as the caller wrote it.
    pub alias: String,
    /// Canonical reference as the authority returned it.
    pub reference: SequenceReference,
    pub interval: Interval,
    pub sequence_length: u64,
}

impl ValidatedLocation {
    /// An unidentified VRS location for this interval.
    pub fn location(&self) -> SequenceLocation {
        SequenceLocation::new(
            self.reference.clone(),
            self.interval.start(),
            self.interval.end(),
        )
    }

    /// The same sequence with a different interval. The caller keeps it in bounds.
    pub fn with_interval(&self, interval: Interval) -> Self {
        Self {
            interval,
            ..self.clone()
        }
    }
}

pub struct CoordinateValidator<'a> {
    sequences: &'a dyn SequenceAuthority,
}

impl<'a> CoordinateValidator<'a> {
    pub fn new(sequences: &'a dyn SequenceAuthority) -> Self {
        Self { sequences }
    }

    fn issue(&self, alias: &str, err: AuthorityError) -> ValidationIssue {
        match err {
            AuthorityError::NotFound(_) => ValidationIssue::UnresolvedAlias {
                authority: self.sequences.name().to_string(),
                alias: alias.to_string(),
            },
            AuthorityError::Unavailable(reason) => ValidationIssue::Unavailable {
                authority: self.sequences.name().to_string(),
                reason,
            },
        }
    }

    /// Resolve `alias` and check that `interval` fits on the sequence.
    pub fn validate(
        &self,
        alias: &str,
        interval: Interval,
    ) -> std::result::Result<ValidatedLocation, ValidationIssue> {
        let reference = self
            .sequences
            .resolve_accession(alias)
            .map_err(|e| self.issue(alias, e))?;
        let sequence_length = self
            .sequences
            .sequence_length(&reference)
            .map_err(|e| self.issue(alias, e))?;

        if interval.end() > sequence_length {
            log::debug!(
                "{} is past the end of {} (length {})",
                interval,
                alias,
                sequence_length
            );
            return Err(ValidationIssue::OutOfRange {
                alias: alias.to_string(),
                end: interval.end(),
            });
        }

        Ok(ValidatedLocation {
            alias: alias.to_string(),
            reference,
            interval,
            sequence_length,
        })
    }

    /// Residues on `interval` of an already validated sequence.
    pub fn subsequence(
        &self,
        located: &ValidatedLocation,
        interval: Interval,
    ) -> std::result::Result<String, ValidationIssue> {
        if interval.end() > located.sequence_length {
            return Err(ValidationIssue::OutOfRange {
                alias: located.alias.clone(),
                end: interval.end(),
            });
        }
        self.sequences
            .subsequence(&located.reference, interval.start(), interval.end())
            .map_err(|e| self.issue(&located.alias, e))
    }

    /// The validated interval widened by `flank` residues each side, clipped to the
    /// sequence. Returns the window's interval and its residues.
    pub fn window(
        &self,
        located: &ValidatedLocation,
        flank: u64,
    ) -> std::result::Result<(Interval, String), ValidationIssue> {
        let start = located.interval.start().saturating_sub(flank);
        let end = located
            .interval
            .end()
            .saturating_add(flank)
            .min(located.sequence_length);
        let window = Interval::new(start, end).map_err(|_| ValidationIssue::OutOfRange {
            alias: located.alias.clone(),
            end: located.interval.end(),
        })?;
        let residues = self.subsequence(located, window)?;
        Ok((window, residues))
    }

    /// Check that the validated interval holds `expected` (case-insensitive).
    pub fn validate_reference(
        &self,
        located: &ValidatedLocation,
        expected: &str,
    ) -> std::result::Result<String, ValidationIssue> {
        let actual = self.subsequence(located, located.interval)?;
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(ValidationIssue::ReferenceMismatch {
                alias: located.alias.clone(),
                interval: located.interval,
                expected: expected.to_ascii_uppercase(),
                actual,
            });
        }
        Ok(actual)
    }
}

/// Check that `interval` falls within `gene_location`, a location of `gene`.
///
/// The first offending 1-based position is reported.
pub fn within_gene(
    interval: Interval,
    gene_location: &SequenceLocation,
    alias: &str,
    gene: &str,
) -> std::result::Result<(), ValidationIssue> {
    let offending = if interval.start() < gene_location.start {
        Some(interval.start() + 1)
    } else if interval.end() > gene_location.end {
        Some(interval.end())
    } else {
        None
    };
    match offending {
        Some(position) => Err(ValidationIssue::GeneRange {
            alias: alias.to_string(),
            position,
            gene: gene.to_string(),
        }),
        None => Ok(()),
    }
}
