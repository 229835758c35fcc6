use serde::{Deserialize, Serialize};
use varnorm_vrs::{CopyNumberChange, Variation};

use crate::warnings::WarningSink;

/// Outcome of a normalization request.
///
/// `variation == None` with warnings is a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<Variation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub warnings: WarningSink,
}

impl NormalizationResult {
    pub fn new(variation: Option<Variation>, label: Option<String>, warnings: WarningSink) -> Self {
        Self {
            variation,
            label,
            warnings,
        }
    }

    pub fn empty(warnings: WarningSink) -> Self {
        Self::new(None, None, warnings)
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    /// Guarantee the caller gets either a variation or a reason why not.
    pub(crate) fn or_unable_to_translate(mut self, input: &str) -> Self {
        if self.variation.is_none() && self.warnings.is_empty() {
            self.warnings.push(format!("Unable to translate {}", input));
        }
        self
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.warnings.iter().map(String::as_str).collect()
    }
}

/// Outcome of an amplification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmplificationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_number_change: Option<CopyNumberChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplification_label: Option<String>,
    #[serde(default)]
    pub warnings: WarningSink,
}

impl AmplificationResult {
    pub fn warnings(&self) -> Vec<&str> {
        self.warnings.iter().map(String::as_str).collect()
    }
}

impl From<NormalizationResult> for AmplificationResult {
    fn from(value: NormalizationResult) -> Self {
        let copy_number_change = match value.variation {
            Some(Variation::CopyNumberChange(cx)) => Some(cx),
            _ => None,
        };
        Self {
            copy_number_change,
            amplification_label: value.label,
            warnings: value.warnings,
        }
    }
}
