//! Plausibility gate for extracted bundles.

use crate::models::certificate::{accepted_candidate, DateCandidate, DateKind, DocumentCategory};

use super::keywords::{contains_any, CERTIFICATE_KEYWORDS};

/// Decide whether the extracted fields plausibly describe a certificate or license.
pub fn is_plausible_certificate(
    category: DocumentCategory,
    code: Option<&str>,
    dates: &[DateCandidate],
    raw_text: &str,
) -> bool {
    if category.is_known() {
        return true;
    }

    let has_accepted_date = accepted_candidate(dates, DateKind::IssueDate).is_some()
        || accepted_candidate(dates, DateKind::ExpiryDate).is_some();
    if code.is_some() && has_accepted_date {
        return true;
    }

    contains_any(raw_text, CERTIFICATE_KEYWORDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn issue() -> DateCandidate {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        DateCandidate::read(DateKind::IssueDate, date, 7, "01/01/2020")
    }

    #[test]
    fn test_known_category_is_plausible() {
        assert!(is_plausible_certificate(DocumentCategory::Toeic, None, &[], ""));
    }

    #[test]
    fn test_code_requires_accepted_date() {
        let unknown = DateCandidate {
            kind: DateKind::Unknown,
            ..issue()
        };

        assert!(is_plausible_certificate(DocumentCategory::Unknown, Some("AB1234"), &[issue()], "memo"));
        assert!(!is_plausible_certificate(DocumentCategory::Unknown, Some("AB1234"), &[unknown], "memo"));
        assert!(!is_plausible_certificate(DocumentCategory::Unknown, None, &[issue()], "memo"));
    }

    #[test]
    fn test_keyword_boundary() {
        assert!(is_plausible_certificate(DocumentCategory::Unknown, None, &[], "Bachelor Diploma"));
        assert!(!is_plausible_certificate(DocumentCategory::Unknown, None, &[], "Bachelor memo"));
    }
}
