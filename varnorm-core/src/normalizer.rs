//! Endpoint operations.
//!
//! A `Normalizer` borrows the two authorities and owns its configuration. It keeps no
//! per-request state, so one instance can serve many threads at once.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use varnorm_vrs::{CopyChange, Variation};

use crate::ambiguity::AmbiguityMode;
use crate::authority::{GeneAuthority, SequenceAuthority};
use crate::classify::{DupDel, Expression, GenomicChange, classify};
use crate::config::NormalizerConfig;
use crate::copy_number::{AmplificationOverride, CopyNumberEngine, derived_copies};
use crate::errors::{AuthorityError, Result};
use crate::results::{AmplificationResult, NormalizationResult};
use crate::translate::{DupDelTarget, GeneBounds, POSITION_ORDER, Translator};
use crate::validate::CoordinateValidator;
use crate::warnings::WarningSink;

/// Options for `Normalizer::normalize_with`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub mode: AmbiguityMode,
    pub baseline_copies: Option<i64>,
    pub copy_change: Option<CopyChange>,
}

impl From<AmbiguityMode> for NormalizeOptions {
    fn from(mode: AmbiguityMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

/// One request to any endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "endpoint", rename_all = "snake_case")]
pub enum Request {
    ToVrs {
        expression: String,
    },
    Normalize {
        expression: String,
        #[serde(default)]
        options: NormalizeOptions,
    },
    HgvsToCopyNumberCount {
        expression: String,
        baseline_copies: i64,
    },
    HgvsToCopyNumberChange {
        expression: String,
        copy_change: Option<CopyChange>,
    },
    AmplificationToCopyNumberChange {
        gene: String,
        sequence: Option<String>,
        start: Option<u64>,
        end: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Normalization(NormalizationResult),
    Amplification(AmplificationResult),
}

/// Try candidates in order. Warnings from failed candidates are only kept when no
/// candidate succeeds.
fn first_success<I, F>(
    candidates: I,
    mut warnings: WarningSink,
    mut attempt: F,
) -> Result<NormalizationResult>
where
    I: IntoIterator,
    F: FnMut(I::Item, &mut WarningSink) -> Result<Option<Variation>>,
{
    let mut failed = WarningSink::new();
    for candidate in candidates {
        let mut local = WarningSink::new();
        if let Some(variation) = attempt(candidate, &mut local)? {
            debug!("translated on {}", variation.location().sequence_reference.refget_accession);
            return Ok(NormalizationResult::new(Some(variation), None, warnings));
        }
        failed.extend(local.into_vec());
    }
    warnings.extend(failed.into_vec());
    Ok(NormalizationResult::empty(warnings))
}

pub struct Normalizer<'a> {
    sequences: &'a dyn SequenceAuthority,
    genes: &'a dyn GeneAuthority,
    config: NormalizerConfig,
}

impl<'a> Normalizer<'a> {
    pub fn new(sequences: &'a dyn SequenceAuthority, genes: &'a dyn GeneAuthority) -> Self {
        Self {
            sequences,
            genes,
            config: NormalizerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: NormalizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    fn translator(&self) -> Translator<'_> {
        Translator::new(CoordinateValidator::new(self.sequences), &self.config)
    }

    fn copy_number_engine(&self) -> CopyNumberEngine<'_> {
        CopyNumberEngine::new(self.sequences, self.genes)
    }

    /// Translate using the configured default mode.
    pub fn to_vrs(&self, expression: &str) -> Result<NormalizationResult> {
        self.normalize(expression, self.config.default_mode)
    }

    pub fn normalize(&self, expression: &str, mode: AmbiguityMode) -> Result<NormalizationResult> {
        self.normalize_with(expression, &NormalizeOptions::from(mode))
    }

    pub fn normalize_with(
        &self,
        expression: &str,
        options: &NormalizeOptions,
    ) -> Result<NormalizationResult> {
        let classified = classify(expression);
        let mut warnings = WarningSink::new();

        let target = match options.mode {
            AmbiguityMode::Default | AmbiguityMode::Trim => DupDelTarget::Default {
                trim: options.mode == AmbiguityMode::Trim,
                baseline: options.baseline_copies,
                copy_change: options.copy_change,
            },
            AmbiguityMode::Allele => DupDelTarget::Allele,
            AmbiguityMode::CopyNumberCount => match options.baseline_copies {
                Some(baseline) => DupDelTarget::CopyNumberCount { baseline },
                None => {
                    if !matches!(classified, Expression::GnomadVcf(_)) {
                        warnings.push(format!("{} mode requires `baseline_copies`", options.mode));
                        return Ok(NormalizationResult::empty(warnings));
                    }
                    DupDelTarget::Allele
                }
            },
            AmbiguityMode::CopyNumberChange => DupDelTarget::CopyNumberChange {
                copy_change: options.copy_change,
            },
        };
        self.run(expression, classified, target, warnings)
    }

    /// Check caller-supplied copy numbers before any authority is consulted.
    fn check_copies(&self, expression: &Expression, target: DupDelTarget) -> Result<()> {
        let baseline = match target {
            DupDelTarget::Default {
                baseline: Some(baseline),
                ..
            }
            | DupDelTarget::CopyNumberCount { baseline } => baseline,
            _ => return Ok(()),
        };
        let kind = match expression {
            Expression::Hgvs { change, .. } | Expression::FreeTextGenomic { change, .. } => {
                match change {
                    GenomicChange::Ambiguous { kind, .. } => Some(*kind),
                    other => other.exact_dup_del().map(|(kind, _, _)| kind),
                }
            }
            _ => None,
        };
        // a duplication only checks the baseline itself
        derived_copies(kind.unwrap_or(DupDel::Duplication), baseline).map(|_| ())
    }

    fn run(
        &self,
        expression: &str,
        classified: Expression,
        target: DupDelTarget,
        mut warnings: WarningSink,
    ) -> Result<NormalizationResult> {
        self.check_copies(&classified, target)?;

        let result = match classified {
            Expression::Unrecognized => {
                warnings.push(format!("Unable to find classification for: {}", expression.trim()));
                NormalizationResult::empty(warnings)
            }
            Expression::Hgvs { accession, change } => {
                let variation =
                    self.translator()
                        .translate(&accession, &change, target, None, &mut warnings)?;
                NormalizationResult::new(variation, None, warnings)
            }
            Expression::GnomadVcf(token) => {
                let translator = self.translator();
                first_success(&self.config.assemblies, warnings, |assembly, sink| {
                    let alias = format!("{}:{}", assembly, token.chromosome);
                    translator.translate_vcf(&alias, &token, sink)
                })?
            }
            Expression::FreeTextGenomic { gene, change } => {
                self.free_text(&gene, &change, target, warnings)?
            }
            Expression::AmplificationByGene { gene } => {
                self.copy_number_engine().amplification_by_gene(&gene, None)?
            }
            Expression::AmplificationByCoordinates {
                sequence,
                start,
                end,
            } => {
                if start > end {
                    warnings.push(POSITION_ORDER);
                    NormalizationResult::empty(warnings)
                } else {
                    match AmplificationOverride::new(&sequence, start, end) {
                        Ok(location) => self
                            .copy_number_engine()
                            .amplification_by_coordinates(&location)?,
                        Err(err) => {
                            warnings.push(err.to_string());
                            NormalizationResult::empty(warnings)
                        }
                    }
                }
            }
        };
        Ok(result.or_unable_to_translate(expression.trim()))
    }

    fn free_text(
        &self,
        gene: &str,
        change: &GenomicChange,
        target: DupDelTarget,
        mut warnings: WarningSink,
    ) -> Result<NormalizationResult> {
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
        let locations = found.locations_by_priority();
        if locations.is_empty() {
            warnings.push(format!(
                "{} could not find a priority sequence location for gene: {}",
                self.genes.name(),
                found.symbol.to_ascii_uppercase()
            ));
            return Ok(NormalizationResult::empty(warnings));
        }

        let translator = self.translator();
        first_success(locations, warnings, |location, sink| {
            let alias = format!("ga4gh:{}", location.sequence_reference.refget_accession);
            let bounds = GeneBounds {
                symbol: &found.symbol,
                location,
            };
            translator.translate(&alias, change, target, Some(&bounds), sink)
        })
    }

    fn dup_del_only(&self, expression: &str) -> Option<NormalizationResult> {
        let supported = match classify(expression) {
            Expression::Hgvs { change, .. } => change.is_dup_del(),
            _ => false,
        };
        if supported {
            return None;
        }
        let mut warnings = WarningSink::new();
        warnings.push(format!(
            "{} is not a supported HGVS genomic duplication or deletion",
            expression.trim()
        ));
        Some(NormalizationResult::empty(warnings))
    }

    /// Copy number count for an HGVS duplication or deletion.
    pub fn hgvs_to_copy_number_count(
        &self,
        expression: &str,
        baseline_copies: i64,
    ) -> Result<NormalizationResult> {
        if let Some(unsupported) = self.dup_del_only(expression) {
            return Ok(unsupported);
        }
        self.run(
            expression,
            classify(expression),
            DupDelTarget::CopyNumberCount {
                baseline: baseline_copies,
            },
            WarningSink::new(),
        )
    }

    /// Copy number change for an HGVS duplication or deletion. Without `copy_change`,
    /// deletions are a loss and duplications a gain.
    pub fn hgvs_to_copy_number_change(
        &self,
        expression: &str,
        copy_change: Option<CopyChange>,
    ) -> Result<NormalizationResult> {
        if let Some(unsupported) = self.dup_del_only(expression) {
            return Ok(unsupported);
        }
        self.run(
            expression,
            classify(expression),
            DupDelTarget::CopyNumberChange { copy_change },
            WarningSink::new(),
        )
    }

    pub fn amplification_to_copy_number_change(
        &self,
        gene: &str,
        sequence: Option<&str>,
        start: Option<u64>,
        end: Option<u64>,
    ) -> Result<AmplificationResult> {
        let location_override = AmplificationOverride::from_parts(sequence, start, end)?;
        let result = self
            .copy_number_engine()
            .amplification_by_gene(gene, location_override.as_ref())?;
        Ok(result.or_unable_to_translate(gene).into())
    }

    pub fn amplification_by_coordinates(
        &self,
        sequence: &str,
        start: u64,
        end: u64,
    ) -> Result<AmplificationResult> {
        let location = AmplificationOverride::new(sequence, start, end)?;
        let result = self
            .copy_number_engine()
            .amplification_by_coordinates(&location)?;
        Ok(result.or_unable_to_translate(sequence).into())
    }

    /// Dispatch a request to its endpoint.
    pub fn handle(&self, request: &Request) -> Result<Response> {
        let response = match request {
            Request::ToVrs { expression } => Response::Normalization(self.to_vrs(expression)?),
            Request::Normalize {
                expression,
                options,
            } => Response::Normalization(self.normalize_with(expression, options)?),
            Request::HgvsToCopyNumberCount {
                expression,
                baseline_copies,
            } => Response::Normalization(
                self.hgvs_to_copy_number_count(expression, *baseline_copies)?,
            ),
            Request::HgvsToCopyNumberChange {
                expression,
                copy_change,
            } => Response::Normalization(self.hgvs_to_copy_number_change(expression, *copy_change)?),
            Request::AmplificationToCopyNumberChange {
                gene,
                sequence,
                start,
                end,
            } => Response::Amplification(self.amplification_to_copy_number_change(
                gene,
                sequence.as_deref(),
                *start,
                *end,
            )?),
        };
        Ok(response)
    }
}
