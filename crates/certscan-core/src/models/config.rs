//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CertScanError, Result};

/// Main configuration for certscan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertScanConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of trailing lines inspected by the trailing-date passes.
    pub trailing_window: usize,

    /// Derive a missing expiry date from the issue date.
    pub derive_expiry: bool,

    /// Months added to an issue date when deriving the expiry date.
    pub expiry_offset_months: u32,

    /// Minimum length of an unlabeled code token.
    pub min_code_length: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            trailing_window: 7,
            derive_expiry: true,
            expiry_offset_months: 24,
            min_code_length: 6,
        }
    }
}

/// Output format for extracted records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Text,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Keep the joined OCR text in JSON output.
    pub include_raw_text: bool,
}

impl CertScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the extractor cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.trailing_window == 0 {
            return Err(CertScanError::Config("extraction.trailing_window must be at least 1".into()));
        }
        if self.extraction.min_code_length == 0 {
            return Err(CertScanError::Config("extraction.min_code_length must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CertScanConfig =
            serde_json::from_str(r#"{"extraction": {"trailing_window": 10}}"#).unwrap();

        assert_eq!(config.extraction.trailing_window, 10);
        assert!(config.extraction.derive_expiry);
        assert_eq!(config.extraction.expiry_offset_months, 24);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CertScanConfig::default();
        config.extraction.derive_expiry = false;
        config.output.format = OutputFormat::Csv;
        config.save(&path).unwrap();

        assert_eq!(CertScanConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extraction": {"trailing_window": 0}}"#).unwrap();

        assert!(matches!(CertScanConfig::from_file(&path), Err(CertScanError::Config(_))));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(CertScanConfig::from_file(&path), Err(CertScanError::Json(_))));

        let missing = dir.path().join("missing.json");
        assert!(matches!(CertScanConfig::from_file(&missing), Err(CertScanError::Io(_))));
    }
}
