//! Extraction orchestrator: classify, extract fields, gate, assemble.

use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::certificate::{DocumentCategory, ExtractionResult};
use crate::models::config::ExtractionConfig;

use super::classifier::classify;
use super::normalizer::OcrLines;
use super::rules::{CodeExtractor, DateExtractor, FieldExtractor, IssuerResolver};
use super::validity::is_plausible_certificate;
use super::Result;

/// Trait for certificate parsing.
pub trait CertificateParser {
    /// Parse a certificate from normalized OCR lines.
    fn parse(&self, lines: &OcrLines) -> Result<ExtractionResult>;

    /// Parse a certificate from a text blob with one OCR line per line.
    fn parse_text(&self, text: &str) -> Result<ExtractionResult> {
        self.parse(&OcrLines::from_text(text))
    }
}

/// Rule-based certificate extractor.
#[derive(Debug, Clone)]
pub struct CertificateExtractor {
    trailing_window: usize,
    derive_expiry: bool,
    expiry_offset_months: u32,
    min_code_length: usize,
}

impl CertificateExtractor {
    /// Create a new extractor with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            trailing_window: config.trailing_window,
            derive_expiry: config.derive_expiry,
            expiry_offset_months: config.expiry_offset_months,
            min_code_length: config.min_code_length,
        }
    }

    /// Set the number of trailing lines searched for dates.
    pub fn with_trailing_window(mut self, lines: usize) -> Self {
        self.trailing_window = lines;
        self
    }

    /// Enable or disable expiry date derivation.
    pub fn with_expiry_derivation(mut self, derive: bool) -> Self {
        self.derive_expiry = derive;
        self
    }

    /// Set the expiry offset in months.
    pub fn with_expiry_offset_months(mut self, months: u32) -> Self {
        self.expiry_offset_months = months;
        self
    }

    /// Set the minimum length of unlabeled codes.
    pub fn with_min_code_length(mut self, length: usize) -> Self {
        self.min_code_length = length;
        self
    }

    /// Extract from raw OCR lines.
    pub fn extract_lines<I, S>(&self, lines: I) -> Result<ExtractionResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse(&OcrLines::new(lines))
    }

    fn date_extractor(&self) -> DateExtractor {
        DateExtractor::new()
            .with_trailing_window(self.trailing_window)
            .with_expiry_derivation(self.derive_expiry)
            .with_expiry_offset_months(self.expiry_offset_months)
    }
}

impl Default for CertificateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CertificateParser for CertificateExtractor {
    fn parse(&self, lines: &OcrLines) -> Result<ExtractionResult> {
        let mut warnings = Vec::new();

        info!("Extracting certificate fields from {} OCR lines", lines.len());

        let category = classify(lines);
        if category == DocumentCategory::Unknown {
            warnings.push("No document signature matched, generic rules applied".to_string());
        }

        let code = CodeExtractor::new()
            .with_min_code_length(self.min_code_length)
            .extract(lines, category);
        if code.is_none() {
            warnings.push("Could not extract identifying code".to_string());
        }

        let issuer = IssuerResolver::new().extract(lines, category);
        if issuer.is_none() {
            warnings.push("Could not resolve issuing organization".to_string());
        }

        let dates = self.date_extractor().extract(lines, category);

        if !is_plausible_certificate(category, code.as_deref(), &dates, lines.text()) {
            debug!("Rejected {} document with code {:?} and {} dates", category, code, dates.len());
            return Err(ExtractionError::NotACertificate);
        }

        let result = ExtractionResult::new(category, code, issuer, dates, lines.text().to_string(), warnings);
        if result.issue_date().is_none() {
            debug!("No issue date accepted for {} document", category);
        }

        info!(
            "Extracted {} document, code {:?}, {} date candidates",
            result.category(),
            result.code(),
            result.dates().len()
        );

        Ok(result)
    }
}

/// Extract certificate fields from OCR lines with default settings.
pub fn extract<I, S>(lines: I) -> Result<ExtractionResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    CertificateExtractor::new().extract_lines(lines)
}
