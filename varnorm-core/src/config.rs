use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ambiguity::{AmbiguityMode, UncertainBoundsPolicy};
use varnorm_vrs::normalize::DEFAULT_RLE_SEQUENCE_LIMIT;

pub const DEFAULT_NORMALIZE_WINDOW: u64 = 128;

/// Engine settings. Every field has a default, so an empty TOML file is valid.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Mode used by `to_vrs`.
    pub default_mode: AmbiguityMode,
    /// Assemblies tried, in order, when resolving a gnomAD VCF chromosome.
    pub assemblies: Vec<String>,
    pub uncertain_bounds: UncertainBoundsPolicy,
    pub rle_sequence_limit: usize,
    /// Flank (in residues) fetched on each side of an allele before normalizing.
    pub normalize_window: u64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_mode: AmbiguityMode::Default,
            assemblies: vec!["GRCh38".to_string(), "GRCh37".to_string()],
            uncertain_bounds: UncertainBoundsPolicy::Inner,
            rle_sequence_limit: DEFAULT_RLE_SEQUENCE_LIMIT,
            normalize_window: DEFAULT_NORMALIZE_WINDOW,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("normalize_window must be at least 1")]
    InvalidWindow,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl NormalizerConfig {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: NormalizerConfig = toml::from_str(content)?;
        if config.normalize_window == 0 {
            return Err(ConfigError::InvalidWindow);
        }
        Ok(config)
    }
}

impl TryFrom<&Path> for NormalizerConfig {
    type Error = ConfigError;

    ///
    /// Read a configuration from a TOML file.
    /// # Arguments
    /// * `value` - path to the TOML file
    ///
    fn try_from(value: &Path) -> ConfigResult<Self> {
        let content = read_to_string(value)?;
        NormalizerConfig::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn empty_file_gives_defaults() {
        let config = NormalizerConfig::from_toml_str("").unwrap();
        assert_eq!(config, NormalizerConfig::default());
        assert_eq!(config.rle_sequence_limit, 50);
        assert_eq!(config.assemblies, vec!["GRCh38", "GRCh37"]);
    }

    #[rstest]
    fn reads_overrides() {
        let config = NormalizerConfig::from_toml_str(
            r#"
default_mode = "copy_number_change"
assemblies = ["GRCh37"]
uncertain_bounds = "reject"
normalize_window = 16
"#,
        )
        .unwrap();
        assert_eq!(config.default_mode, AmbiguityMode::CopyNumberChange);
        assert_eq!(config.assemblies, vec!["GRCh37"]);
        assert_eq!(config.uncertain_bounds, UncertainBoundsPolicy::Reject);
        assert_eq!(config.normalize_window, 16);
        assert_eq!(config.rle_sequence_limit, 50);
    }

    #[rstest]
    #[case("default_mode = \"sideways\"")]
    #[case("normalize_window = 0")]
    fn rejects_bad_values(#[case] content: &str) {
        assert!(NormalizerConfig::from_toml_str(content).is_err());
    }

    #[rstest]
    fn reads_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("varnorm.toml");
        std::fs::write(&path, "rle_sequence_limit = 10\n").unwrap();
        let config = NormalizerConfig::try_from(path.as_path()).unwrap();
        assert_eq!(config.rle_sequence_limit, 10);
    }
}
