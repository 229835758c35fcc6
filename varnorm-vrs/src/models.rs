//! VRS data models.
//!
//! Structs representing GA4GH VRS 2.0 objects. They serialize to the VRS JSON schema:
//! camelCase field names, a leading `type` tag, and `id`/`digest` on identifiable objects.
//! Absent optional fields are omitted so identical variants always serialize identically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A reference to a specific sequence identified by its refget accession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct SequenceReference {
    /// GA4GH refget accession, e.g. "SQ.F-LrL..."
    pub refget_accession: String,
    /// Other names for the sequence. Not part of the digest.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl SequenceReference {
    pub fn new(refget_accession: &str) -> Self {
        Self {
            refget_accession: refget_accession.to_string(),
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }
}

/// A location on a sequence defined by start/end coordinates (interbase, 0-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct SequenceLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    pub sequence_reference: SequenceReference,
    pub start: u64,
    pub end: u64,
}

impl SequenceLocation {
    pub fn new(sequence_reference: SequenceReference, start: u64, end: u64) -> Self {
        Self {
            id: None,
            digest: None,
            sequence_reference,
            start,
            end,
        }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The state (alternate allele) of a VRS Allele.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AlleleState {
    /// A literal sequence expression (SNV, indel, MNV).
    LiteralSequenceExpression { sequence: String },
    /// A reference-length expression (repeat expansions and contractions).
    ReferenceLengthExpression {
        length: u64,
        #[serde(rename = "repeatSubunitLength")]
        repeat_subunit_length: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sequence: Option<String>,
    },
}

impl AlleleState {
    pub fn literal(sequence: &str) -> Self {
        AlleleState::LiteralSequenceExpression {
            sequence: sequence.to_string(),
        }
    }
}

/// A VRS Allele: a specific sequence state at a specific genomic location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Allele {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    pub location: SequenceLocation,
    pub state: AlleleState,
}

impl Allele {
    pub fn new(location: SequenceLocation, state: AlleleState) -> Self {
        Self {
            id: None,
            digest: None,
            location,
            state,
        }
    }
}

/// An absolute number of copies of a location within a genome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct CopyNumberCount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    pub location: SequenceLocation,
    pub copies: u64,
}

impl CopyNumberCount {
    pub fn new(location: SequenceLocation, copies: u64) -> Self {
        Self {
            id: None,
            digest: None,
            location,
            copies,
        }
    }
}

/// A relative assessment of the copy number of a location within a genome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct CopyNumberChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    pub location: SequenceLocation,
    pub copy_change: CopyChange,
}

impl CopyNumberChange {
    pub fn new(location: SequenceLocation, copy_change: CopyChange) -> Self {
        Self {
            id: None,
            digest: None,
            location,
            copy_change,
        }
    }
}

/// A concept reference as it appears in serialized VRS objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappableConcept {
    pub primary_code: String,
}

/// EFO copy-change categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "MappableConcept", try_from = "MappableConcept")]
pub enum CopyChange {
    CompleteGenomicLoss,
    HighLevelLoss,
    LowLevelLoss,
    Loss,
    RegionalBasePloidy,
    Gain,
    LowLevelGain,
    HighLevelGain,
}

const COPY_CHANGES: [CopyChange; 8] = [
    CopyChange::CompleteGenomicLoss,
    CopyChange::HighLevelLoss,
    CopyChange::LowLevelLoss,
    CopyChange::Loss,
    CopyChange::RegionalBasePloidy,
    CopyChange::Gain,
    CopyChange::LowLevelGain,
    CopyChange::HighLevelGain,
];

impl CopyChange {
    /// The EFO code, e.g. `EFO:0030072`.
    pub fn code(&self) -> &'static str {
        match self {
            CopyChange::CompleteGenomicLoss => "EFO:0030069",
            CopyChange::HighLevelLoss => "EFO:0020073",
            CopyChange::LowLevelLoss => "EFO:0030068",
            CopyChange::Loss => "EFO:0030067",
            CopyChange::RegionalBasePloidy => "EFO:0030064",
            CopyChange::Gain => "EFO:0030070",
            CopyChange::LowLevelGain => "EFO:0030071",
            CopyChange::HighLevelGain => "EFO:0030072",
        }
    }

    /// The EFO label, e.g. `high-level gain`.
    pub fn label(&self) -> &'static str {
        match self {
            CopyChange::CompleteGenomicLoss => "complete genomic loss",
            CopyChange::HighLevelLoss => "high-level loss",
            CopyChange::LowLevelLoss => "low-level loss",
            CopyChange::Loss => "loss",
            CopyChange::RegionalBasePloidy => "regional base ploidy",
            CopyChange::Gain => "gain",
            CopyChange::LowLevelGain => "low-level gain",
            CopyChange::HighLevelGain => "high-level gain",
        }
    }

    pub fn all() -> &'static [CopyChange] {
        &COPY_CHANGES
    }
}

impl fmt::Display for CopyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a string names no known copy-change category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCopyChangeError(pub String);

impl fmt::Display for ParseCopyChangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized copy change: {}", self.0)
    }
}

impl std::error::Error for ParseCopyChangeError {}

impl FromStr for CopyChange {
    type Err = ParseCopyChangeError;

    /// Accepts `EFO:0030072`, `efo:0030072`, `high-level gain`, `high_level_gain`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let as_label = wanted.replace('_', " ").replace('-', " ").to_ascii_lowercase();
        COPY_CHANGES
            .iter()
            .find(|cc| {
                cc.code().eq_ignore_ascii_case(wanted) || cc.label().replace('-', " ") == as_label
            })
            .copied()
            .ok_or_else(|| ParseCopyChangeError(s.to_string()))
    }
}

impl From<CopyChange> for MappableConcept {
    fn from(value: CopyChange) -> Self {
        MappableConcept {
            primary_code: value.code().to_string(),
        }
    }
}

impl TryFrom<MappableConcept> for CopyChange {
    type Error = ParseCopyChangeError;

    fn try_from(value: MappableConcept) -> Result<Self, Self::Error> {
        value.primary_code.parse()
    }
}

/// Any of the variation shapes the normalizer can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variation {
    Allele(Allele),
    CopyNumberCount(CopyNumberCount),
    CopyNumberChange(CopyNumberChange),
}

impl Variation {
    /// The `ga4gh:` identifier, when the variation has been identified.
    pub fn id(&self) -> Option<&str> {
        match self {
            Variation::Allele(v) => v.id.as_deref(),
            Variation::CopyNumberCount(v) => v.id.as_deref(),
            Variation::CopyNumberChange(v) => v.id.as_deref(),
        }
    }

    pub fn location(&self) -> &SequenceLocation {
        match self {
            Variation::Allele(v) => &v.location,
            Variation::CopyNumberCount(v) => &v.location,
            Variation::CopyNumberChange(v) => &v.location,
        }
    }

    /// The VRS type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Variation::Allele(_) => "Allele",
            Variation::CopyNumberCount(_) => "CopyNumberCount",
            Variation::CopyNumberChange(_) => "CopyNumberChange",
        }
    }
}

impl From<Allele> for Variation {
    fn from(value: Allele) -> Self {
        Variation::Allele(value)
    }
}

impl From<CopyNumberCount> for Variation {
    fn from(value: CopyNumberCount) -> Self {
        Variation::CopyNumberCount(value)
    }
}

impl From<CopyNumberChange> for Variation {
    fn from(value: CopyNumberChange) -> Self {
        Variation::CopyNumberChange(value)
    }
}
