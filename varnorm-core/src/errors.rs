use thiserror::Error;

/// Hard failures of a normalization request.
///
/// Data-quality problems (unrecognized input, unknown accessions, out-of-range
/// coordinates) are never reported here; they become warnings on the result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{authority} is unavailable: {reason}")]
    AuthorityUnavailable { authority: String, reason: String },
}

pub type Result<T> = std::result::Result<T, NormalizerError>;

/// Failure reported by a sequence or gene authority.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl AuthorityError {
    pub(crate) fn unavailable(authority: &str, reason: String) -> NormalizerError {
        NormalizerError::AuthorityUnavailable {
            authority: authority.to_string(),
            reason,
        }
    }
}
