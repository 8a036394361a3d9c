//! Certificate extraction data models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::extraction::keywords::NO_EXPIRATION_LITERAL;

/// Kind of document recognized from the OCR text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    /// TOEFL score report.
    Toefl,
    /// TOEIC score report.
    Toeic,
    /// IELTS Test Report Form.
    Ielts,
    /// Driver license (giấy phép lái xe).
    DriverLicense,
    /// No signature matched; generic rules apply.
    #[default]
    Unknown,
}

impl DocumentCategory {
    /// Short stable name used in CSV/text output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toefl => "toefl",
            Self::Toeic => "toeic",
            Self::Ielts => "ielts",
            Self::DriverLicense => "driver_license",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a specific signature matched.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a date candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
    IssueDate,
    ExpiryDate,
    Unknown,
}

/// A date read from (or derived for) a document.
///
/// Serialized as `YYYY-MM-DD`, or as the localized no-expiration literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DateValue {
    Calendar(NaiveDate),
    /// The document states it never expires.
    NoExpiration,
}

impl DateValue {
    /// Calendar date, if this is not the no-expiration marker.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Calendar(date) => Some(*date),
            Self::NoExpiration => None,
        }
    }

    pub fn is_no_expiration(&self) -> bool {
        matches!(self, Self::NoExpiration)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calendar(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::NoExpiration => f.write_str(NO_EXPIRATION_LITERAL),
        }
    }
}

impl From<DateValue> for String {
    fn from(value: DateValue) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for DateValue {
    type Error = ExtractionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.to_lowercase() == NO_EXPIRATION_LITERAL.to_lowercase() {
            return Ok(Self::NoExpiration);
        }

        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self::Calendar)
            .map_err(|_| ExtractionError::MalformedDate { value })
    }
}

/// A tentative date proposed by one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCandidate {
    /// Role of the date.
    pub kind: DateKind,

    /// Normalized value.
    pub value: DateValue,

    /// Rank among candidates of the same kind; higher wins.
    pub priority: u8,

    /// Computed by the expiry offset rule rather than read from text.
    pub derived: bool,

    /// Raw OCR token the value was read from.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
}

impl DateCandidate {
    /// A date read directly from the text.
    pub fn read(kind: DateKind, date: NaiveDate, priority: u8, source: impl Into<String>) -> Self {
        Self {
            kind,
            value: DateValue::Calendar(date),
            priority,
            derived: false,
            source: source.into(),
        }
    }

    /// A literal "no expiration" expiry read from the text.
    pub fn no_expiration(priority: u8, source: impl Into<String>) -> Self {
        Self {
            kind: DateKind::ExpiryDate,
            value: DateValue::NoExpiration,
            priority,
            derived: false,
            source: source.into(),
        }
    }

    /// An expiry computed from an issue date.
    pub fn derived_expiry(date: NaiveDate, priority: u8) -> Self {
        Self {
            kind: DateKind::ExpiryDate,
            value: DateValue::Calendar(date),
            priority,
            derived: true,
            source: String::new(),
        }
    }
}

/// Highest-priority candidate of `kind`; the earliest one wins ties.
pub fn accepted_candidate(dates: &[DateCandidate], kind: DateKind) -> Option<&DateCandidate> {
    dates.iter().filter(|c| c.kind == kind).fold(None, |best, c| match best {
        Some(b) if b.priority >= c.priority => Some(b),
        _ => Some(c),
    })
}

/// Fields extracted from one OCR line sequence.
///
/// Built once by the extractor; exposes read-only accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    category: DocumentCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issuer: Option<String>,
    dates: Vec<DateCandidate>,
    #[serde(skip_serializing_if = "String::is_empty")]
    raw_text: String,
    is_plausible: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

impl ExtractionResult {
    pub(crate) fn new(
        category: DocumentCategory,
        code: Option<String>,
        issuer: Option<String>,
        dates: Vec<DateCandidate>,
        raw_text: String,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            category,
            code,
            issuer,
            dates,
            raw_text,
            is_plausible: true,
            warnings,
        }
    }

    pub fn category(&self) -> DocumentCategory {
        self.category
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// All date candidates, highest priority first.
    pub fn dates(&self) -> &[DateCandidate] {
        &self.dates
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn is_plausible(&self) -> bool {
        self.is_plausible
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The accepted issue date candidate.
    pub fn issue_date(&self) -> Option<&DateCandidate> {
        accepted_candidate(&self.dates, DateKind::IssueDate)
    }

    /// The accepted expiry date candidate.
    pub fn expiry_date(&self) -> Option<&DateCandidate> {
        accepted_candidate(&self.dates, DateKind::ExpiryDate)
    }

    /// Drop the raw OCR text, e.g. before writing compact output.
    pub fn without_raw_text(mut self) -> Self {
        self.raw_text.clear();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_accepted_candidate_prefers_priority() {
        let dates = vec![
            DateCandidate::read(DateKind::IssueDate, date(2020, 1, 1), 5, "01/01/2020"),
            DateCandidate::read(DateKind::IssueDate, date(2021, 1, 1), 9, "01/01/2021"),
            DateCandidate::read(DateKind::Unknown, date(2022, 1, 1), 10, "01/01/2022"),
        ];

        let accepted = accepted_candidate(&dates, DateKind::IssueDate).unwrap();
        assert_eq!(accepted.value, DateValue::Calendar(date(2021, 1, 1)));
        assert!(accepted_candidate(&dates, DateKind::ExpiryDate).is_none());
    }

    #[test]
    fn test_accepted_candidate_tie_keeps_first() {
        let dates = vec![
            DateCandidate::read(DateKind::IssueDate, date(2020, 1, 1), 7, "a"),
            DateCandidate::read(DateKind::IssueDate, date(2021, 1, 1), 7, "b"),
        ];

        assert_eq!(accepted_candidate(&dates, DateKind::IssueDate).unwrap().source, "a");
    }

    #[test]
    fn test_date_value_serde() {
        let value = DateValue::Calendar(date(2023, 2, 18));
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"2023-02-18\"");

        let literal = serde_json::to_string(&DateValue::NoExpiration).unwrap();
        assert_eq!(literal, "\"Không thời hạn\"");

        let parsed: DateValue = serde_json::from_str(&literal).unwrap();
        assert!(parsed.is_no_expiration());
        assert!(serde_json::from_str::<DateValue>("\"2023-02-30\"").is_err());
    }

    #[test]
    fn test_category_serde() {
        assert_eq!(
            serde_json::to_string(&DocumentCategory::DriverLicense).unwrap(),
            "\"driver_license\""
        );
        assert!(!DocumentCategory::Unknown.is_known());
    }
}
