//! Locale keyword tables (Vietnamese and English).
//!
//! Fixed answers and plain substring sets used by the extraction rules live
//! here, so another locale or document type only needs new table entries.
//! Bump [`KEYWORD_TABLE_VERSION`] whenever an entry changes meaning.

/// Version of the keyword tables.
pub const KEYWORD_TABLE_VERSION: u32 = 1;

/// Canonical text of a non-expiring license.
pub const NO_EXPIRATION_LITERAL: &str = "Không thời hạn";

/// Organization that administers TOEFL.
pub const TOEFL_ISSUER: &str = "ETS (Educational Testing Service)";

/// Global TOEIC body.
pub const TOEIC_GLOBAL_ISSUER: &str = "ETS (Educational Testing Service)";

/// Regional TOEIC representative.
pub const TOEIC_REGIONAL_ISSUER: &str = "IIG Vietnam";

/// IELTS co-owners, keyed by the lowercase needle that identifies each one.
pub const IELTS_ISSUERS: &[(&str, &str)] = &[
    ("british council", "British Council"),
    ("idp", "IDP: IELTS Australia"),
    ("cambridge", "Cambridge Assessment English"),
];

/// Returned when no single IELTS body is named.
pub const IELTS_COMBINED_ISSUER: &str =
    "British Council / IDP: IELTS Australia / Cambridge Assessment English";

/// National transport ministry, the default driver license issuer.
pub const TRANSPORT_MINISTRY_ISSUER: &str = "Bộ Giao thông Vận tải";

/// Words that make a document plausible even without a category or dates.
pub const CERTIFICATE_KEYWORDS: &[&str] = &[
    "certificate",
    "certification",
    "diploma",
    "license",
    "licence",
    "toefl",
    "toeic",
    "ielts",
    "chứng chỉ",
    "chứng nhận",
    "văn bằng",
    "bằng tốt nghiệp",
    "giấy phép",
];

/// Minimum length (in characters) of an institutional issuer line.
pub const INSTITUTION_LINE_MIN_CHARS: usize = 5;

/// Maximum length (in characters) of an institutional issuer line.
pub const INSTITUTION_LINE_MAX_CHARS: usize = 50;

/// Returns true if the lowercase `text` contains any of the `keywords`.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}
