//! Certificate field extraction module.

mod parser;
pub mod classifier;
pub mod keywords;
pub mod normalizer;
pub mod rules;
pub mod validity;

pub use classifier::classify;
pub use normalizer::OcrLines;
pub use parser::{extract, CertificateExtractor, CertificateParser};
pub use validity::is_plausible_certificate;

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
