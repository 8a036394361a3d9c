//! Error types for the certscan-core library.

use thiserror::Error;

/// Main error type for the certscan library.
#[derive(Error, Debug)]
pub enum CertScanError {
    /// Certificate extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to certificate field extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The extracted bundle does not look like a certificate or license.
    #[error("document does not look like a certificate or license")]
    NotACertificate,

    /// A date-like token did not form a valid calendar date.
    ///
    /// Never surfaced by the extractor; the offending candidate is dropped.
    #[error("malformed date: {value}")]
    MalformedDate { value: String },
}

/// Result type for the certscan library.
pub type Result<T> = std::result::Result<T, CertScanError>;
