//! Ambiguous (uncertain-boundary) HGVS ranges.
//!
//! HGVS writes an imprecisely known breakpoint as a parenthesised pair, e.g.
//! `(31775822_31775823)_(31775900_31775901)del`. Either side may be `?`. Only three
//! shapes are supported:
//!
//! | class                 | shape                 | interval       |
//! |-----------------------|-----------------------|----------------|
//! | `RangedBoundaries`    | `(a_b)_(c_d)`         | outer `[a-1, d)`, inner `[b-1, c)` |
//! | `OneSidedRange`       | `(?_a)_b` or `a_(b_?)` | `[a-1, b)`    |
//! | `UncertainBoundaries` | `(?_a)_(b_?)`         | `[a-1, b)`, subject to the configured policy |
//!
//! Everything else is reported as unsupported.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// One end of a parenthesised range; `?` is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Known(u64),
    Unknown,
}

impl Bound {
    fn known(&self) -> Option<u64> {
        match self {
            Bound::Known(pos) => Some(*pos),
            Bound::Unknown => None,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Known(pos) => write!(f, "{}", pos),
            Bound::Unknown => write!(f, "?"),
        }
    }
}

impl FromStr for Bound {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "?" {
            Ok(Bound::Unknown)
        } else {
            s.parse().map(Bound::Known)
        }
    }
}

/// A breakpoint, either exactly known or somewhere inside a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Exact(u64),
    Range(Bound, Bound),
}

impl Boundary {
    /// Parse `123`, `(123_456)`, `(?_456)` or `(123_?)`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
            Some(inner) => {
                let (left, right) = inner.split_once('_')?;
                Some(Boundary::Range(left.parse().ok()?, right.parse().ok()?))
            }
            None => text.parse().ok().map(Boundary::Exact),
        }
    }

    fn positions(&self) -> Vec<u64> {
        match self {
            Boundary::Exact(pos) => vec![*pos],
            Boundary::Range(left, right) => left.known().into_iter().chain(right.known()).collect(),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Exact(pos) => write!(f, "{}", pos),
            Boundary::Range(left, right) => write!(f, "({}_{})", left, right),
        }
    }
}

/// The two breakpoints of an ambiguous deletion or duplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbiguousRange {
    pub start: Boundary,
    pub end: Boundary,
}

impl fmt::Display for AmbiguousRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.start, self.end)
    }
}

/// The supported shapes of ambiguous range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityClass {
    /// `(a_b)_(c_d)`
    RangedBoundaries { a: u64, b: u64, c: u64, d: u64 },
    /// `(?_a)_b` or `a_(b_?)`
    OneSidedRange { start: u64, end: u64 },
    /// `(?_a)_(b_?)`
    UncertainBoundaries { start: u64, end: u64 },
}

/// How a dup/del request should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityMode {
    #[default]
    Default,
    Trim,
    Allele,
    CopyNumberCount,
    CopyNumberChange,
}

impl AmbiguityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmbiguityMode::Default => "default",
            AmbiguityMode::Trim => "trim",
            AmbiguityMode::Allele => "allele",
            AmbiguityMode::CopyNumberCount => "copy_number_count",
            AmbiguityMode::CopyNumberChange => "copy_number_change",
        }
    }
}

impl fmt::Display for AmbiguityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmbiguityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "default" => Ok(AmbiguityMode::Default),
            "trim" => Ok(AmbiguityMode::Trim),
            "allele" => Ok(AmbiguityMode::Allele),
            "copy_number_count" | "cnc" => Ok(AmbiguityMode::CopyNumberCount),
            "copy_number_change" | "cx" => Ok(AmbiguityMode::CopyNumberChange),
            other => Err(format!("unknown normalization mode: {}", other)),
        }
    }
}

/// What to do with `UncertainBoundaries` ranges, whose unknown side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UncertainBoundsPolicy {
    /// Use the known positions as the interval.
    #[default]
    Inner,
    /// Report as unsupported.
    Reject,
}

/// A supported ambiguous range and the interval it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub class: AmbiguityClass,
    pub interval: Interval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmbiguityError {
    /// Known positions are not strictly increasing.
    PositionOrder,
    /// The range is not one of the supported shapes.
    Unsupported,
    /// A supported shape that cannot be rendered in the requested mode.
    UnsupportedForMode(AmbiguityMode),
}

impl AmbiguityError {
    pub fn warning(&self, input: &str) -> String {
        match self {
            AmbiguityError::PositionOrder => {
                "Positions should contain two different positions and should be listed from 5' to 3'"
                    .to_string()
            }
            AmbiguityError::Unsupported => {
                format!("{} is an unsupported ambiguous expression", input)
            }
            AmbiguityError::UnsupportedForMode(mode) => {
                format!("{} is not supported in {} mode", input, mode)
            }
        }
    }
}

/// Classify an ambiguous range and work out its interval.
pub fn classify(range: &AmbiguousRange) -> Result<AmbiguityClass, AmbiguityError> {
    let positions: Vec<u64> = range
        .start
        .positions()
        .into_iter()
        .chain(range.end.positions())
        .collect();
    if positions.windows(2).any(|w| w[0] >= w[1]) {
        return Err(AmbiguityError::PositionOrder);
    }

    use Bound::{Known, Unknown};
    match (range.start, range.end) {
        (Boundary::Range(Known(a), Known(b)), Boundary::Range(Known(c), Known(d))) => {
            Ok(AmbiguityClass::RangedBoundaries { a, b, c, d })
        }
        (Boundary::Range(Unknown, Known(start)), Boundary::Range(Known(end), Unknown)) => {
            Ok(AmbiguityClass::UncertainBoundaries { start, end })
        }
        (Boundary::Range(Unknown, Known(start)), Boundary::Exact(end))
        | (Boundary::Exact(start), Boundary::Range(Known(end), Unknown)) => {
            Ok(AmbiguityClass::OneSidedRange { start, end })
        }
        _ => Err(AmbiguityError::Unsupported),
    }
}

/// Classify `range` and map it to an interval for `mode`.
///
/// Ranged boundaries use the outer bounds, or the inner ones in `Trim` mode. Allele mode cannot express an unbounded side,
/// so uncertain boundaries are rejected there, as they are under the `Reject` policy.
pub fn resolve(
    range: &AmbiguousRange,
    mode: AmbiguityMode,
    policy: UncertainBoundsPolicy,
) -> Result<ResolvedRange, AmbiguityError> {
    let class = classify(range)?;
    let (first, last) = match class {
        AmbiguityClass::RangedBoundaries { b, c, .. } if mode == AmbiguityMode::Trim => (b, c),
        AmbiguityClass::RangedBoundaries { a, d, .. } => (a, d),
        AmbiguityClass::OneSidedRange { start, end } => (start, end),
        AmbiguityClass::UncertainBoundaries { start, end } => {
            if mode == AmbiguityMode::Allele {
                return Err(AmbiguityError::UnsupportedForMode(mode));
            }
            if policy == UncertainBoundsPolicy::Reject {
                return Err(AmbiguityError::Unsupported);
            }
            (start, end)
        }
    };
    let interval = Interval::from_residues(first, last).map_err(|_| AmbiguityError::PositionOrder)?;
    Ok(ResolvedRange { class, interval })
}
