//! Issuing organization resolution.

use tracing::debug;

use crate::extraction::keywords::{
    IELTS_COMBINED_ISSUER, IELTS_ISSUERS, INSTITUTION_LINE_MAX_CHARS, INSTITUTION_LINE_MIN_CHARS,
    TOEFL_ISSUER, TOEIC_GLOBAL_ISSUER, TOEIC_REGIONAL_ISSUER, TRANSPORT_MINISTRY_ISSUER,
};
use crate::extraction::normalizer::OcrLines;
use crate::models::certificate::DocumentCategory;

use super::patterns::{
    INSTITUTION_KEYWORD, ISSUER_LABELS, PROVINCIAL_TRANSPORT_DEPARTMENT, TOEIC_REGIONAL_BODY,
    TRANSPORT_MINISTRY,
};
use super::FieldExtractor;

/// Issuing organization resolver.
#[derive(Debug, Default)]
pub struct IssuerResolver;

impl IssuerResolver {
    pub fn new() -> Self {
        Self
    }

    fn toeic(lines: &OcrLines) -> String {
        if lines.iter().any(|l| TOEIC_REGIONAL_BODY.is_match(l)) {
            TOEIC_REGIONAL_ISSUER.to_string()
        } else {
            TOEIC_GLOBAL_ISSUER.to_string()
        }
    }

    fn ielts(lines: &OcrLines) -> String {
        let text = lines.text().to_lowercase();

        IELTS_ISSUERS
            .iter()
            .find(|(needle, _)| text.contains(needle))
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| IELTS_COMBINED_ISSUER.to_string())
    }

    fn driver_license(lines: &OcrLines) -> String {
        if lines.iter().any(|l| TRANSPORT_MINISTRY.is_match(l)) {
            return TRANSPORT_MINISTRY_ISSUER.to_string();
        }

        lines
            .iter()
            .find(|l| PROVINCIAL_TRANSPORT_DEPARTMENT.is_match(l))
            .map(str::to_string)
            .unwrap_or_else(|| TRANSPORT_MINISTRY_ISSUER.to_string())
    }

    fn generic(lines: &OcrLines) -> Option<String> {
        let labeled = ISSUER_LABELS.iter().find_map(|pattern| {
            lines.iter().find_map(|l| {
                pattern
                    .captures(l)
                    .map(|caps| caps[1].trim().to_string())
                    .filter(|issuer| !issuer.is_empty())
            })
        });

        labeled.or_else(|| {
            lines
                .iter()
                .find(|l| {
                    let chars = l.chars().count();
                    (INSTITUTION_LINE_MIN_CHARS..=INSTITUTION_LINE_MAX_CHARS).contains(&chars)
                        && INSTITUTION_KEYWORD.is_match(l)
                })
                .map(str::to_string)
        })
    }
}

impl FieldExtractor for IssuerResolver {
    type Output = String;

    fn extract(&self, lines: &OcrLines, category: DocumentCategory) -> Option<String> {
        let issuer = match category {
            DocumentCategory::Toefl => Some(TOEFL_ISSUER.to_string()),
            DocumentCategory::Toeic => Some(Self::toeic(lines)),
            DocumentCategory::Ielts => Some(Self::ielts(lines)),
            DocumentCategory::DriverLicense => Some(Self::driver_license(lines)),
            DocumentCategory::Unknown => Self::generic(lines),
        };

        debug!("Resolved issuer {:?} for {}", issuer, category);
        issuer
    }
}

/// Resolve the issuing organization of a document.
pub fn extract_issuer(lines: &OcrLines, category: DocumentCategory) -> Option<String> {
    IssuerResolver::new().extract(lines, category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(lines: &[&str], category: DocumentCategory) -> Option<String> {
        extract_issuer(&OcrLines::new(lines), category)
    }

    #[test]
    fn test_fixed_issuers() {
        assert_eq!(issuer(&[], DocumentCategory::Toefl).as_deref(), Some(TOEFL_ISSUER));
        assert_eq!(issuer(&["TOEIC"], DocumentCategory::Toeic).as_deref(), Some(TOEIC_GLOBAL_ISSUER));
        assert_eq!(
            issuer(&["TOEIC", "IIG Việt Nam"], DocumentCategory::Toeic).as_deref(),
            Some(TOEIC_REGIONAL_ISSUER)
        );
    }

    #[test]
    fn test_ielts_issuers() {
        assert_eq!(
            issuer(&["IELTS", "British Council"], DocumentCategory::Ielts).as_deref(),
            Some("British Council")
        );
        assert_eq!(
            issuer(&["IELTS", "IDP Education"], DocumentCategory::Ielts).as_deref(),
            Some("IDP: IELTS Australia")
        );
        assert_eq!(
            issuer(&["IELTS Test Report Form"], DocumentCategory::Ielts).as_deref(),
            Some(IELTS_COMBINED_ISSUER)
        );
    }

    #[test]
    fn test_driver_license_issuers() {
        assert_eq!(
            issuer(&["Bằng lái xe"], DocumentCategory::DriverLicense).as_deref(),
            Some(TRANSPORT_MINISTRY_ISSUER)
        );
        assert_eq!(
            issuer(&["Bằng lái xe", "Sở GTVT Hà Nội"], DocumentCategory::DriverLicense).as_deref(),
            Some("Sở GTVT Hà Nội")
        );
        assert_eq!(
            issuer(
                &["Sở Giao thông Vận tải TP.HCM", "BỘ GIAO THÔNG VẬN TẢI"],
                DocumentCategory::DriverLicense
            )
            .as_deref(),
            Some(TRANSPORT_MINISTRY_ISSUER)
        );
    }

    #[test]
    fn test_generic_issuers() {
        assert_eq!(
            issuer(&["Certificate", "Issued by: Acme Academy"], DocumentCategory::Unknown).as_deref(),
            Some("Acme Academy")
        );
        assert_eq!(
            issuer(&["Chứng nhận", "Cơ quan cấp: Sở Y tế"], DocumentCategory::Unknown).as_deref(),
            Some("Sở Y tế")
        );
        assert_eq!(
            issuer(&["Diploma", "Ministry of Education"], DocumentCategory::Unknown).as_deref(),
            Some("Ministry of Education")
        );
        assert_eq!(issuer(&["Random memo"], DocumentCategory::Unknown), None);
    }
}
