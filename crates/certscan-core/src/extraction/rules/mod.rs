//! Rule-based field extractors for certificates and licenses.

pub mod code;
pub mod dates;
pub mod issuer;
pub mod patterns;

pub use code::{extract_code, group_digits, CodeExtractor};
pub use dates::{extract_dates, find_dates, month_from_name, DateExtractor, DateToken};
pub use issuer::{extract_issuer, IssuerResolver};

use crate::extraction::normalizer::OcrLines;
use crate::models::certificate::DocumentCategory;

/// Trait for single-valued field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field using the rule chain for `category`.
    fn extract(&self, lines: &OcrLines, category: DocumentCategory) -> Option<Self::Output>;
}
