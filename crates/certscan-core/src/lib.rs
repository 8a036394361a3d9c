//! Core library for certificate and license OCR processing.
//!
//! This crate provides:
//! - OCR line normalization
//! - Document classification (TOEFL, TOEIC, IELTS, driver license)
//! - Field extraction (identifying code, issuer, issue and expiry dates)
//! - A plausibility gate that rejects documents that are not certificates

pub mod error;
pub mod models;
pub mod extraction;

pub use error::{CertScanError, ExtractionError, Result};
pub use models::certificate::{DateCandidate, DateKind, DateValue, DocumentCategory, ExtractionResult};
pub use models::config::CertScanConfig;
pub use extraction::{classify, extract, CertificateExtractor, CertificateParser, OcrLines};
