//! Pure construction of identified VRS variations. No authority is consulted here.

use varnorm_vrs::{
    Allele, AlleleState, CopyChange, CopyNumberChange, CopyNumberCount, Identifiable,
    SequenceLocation, Variation,
};

use crate::errors::{NormalizerError, Result};

/// The kind-specific part of a variation. The variant picks the kind that is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyInput {
    /// An Allele with this state.
    State(AlleleState),
    /// A CopyNumberCount with this many copies.
    Copies(i64),
    /// A CopyNumberChange of this category.
    CopyChange(CopyChange),
}

fn allele(location: SequenceLocation, state: AlleleState) -> Allele {
    Allele::new(location, state).identified()
}

fn copy_number_count(location: SequenceLocation, copies: i64) -> Result<CopyNumberCount> {
    let copies = u64::try_from(copies).map_err(|_| {
        NormalizerError::InvalidArgument(format!(
            "copy count must be zero or greater, got {}",
            copies
        ))
    })?;
    Ok(CopyNumberCount::new(location, copies).identified())
}

fn copy_number_change(location: SequenceLocation, copy_change: CopyChange) -> CopyNumberChange {
    CopyNumberChange::new(location, copy_change).identified()
}

/// Parse a copy change category (`EFO:0030072`, `high-level gain`, ...).
pub fn parse_copy_change(value: &str) -> Result<CopyChange> {
    value
        .parse::<CopyChange>()
        .map_err(|e| NormalizerError::InvalidArgument(e.to_string()))
}

/// Build an identified variation on `location`.
///
/// A negative copy count is `InvalidArgument`.
pub fn assemble(location: SequenceLocation, input: AssemblyInput) -> Result<Variation> {
    let variation = match input {
        AssemblyInput::State(state) => allele(location, state).into(),
        AssemblyInput::Copies(copies) => copy_number_count(location, copies)?.into(),
        AssemblyInput::CopyChange(copy_change) => copy_number_change(location, copy_change).into(),
    };
    Ok(variation)
}
