//! Document category classification.

use tracing::debug;

use crate::models::certificate::DocumentCategory;

use super::normalizer::OcrLines;
use super::rules::patterns::{
    DRIVER_LICENSE_SIGNATURE, IELTS_SIGNATURE, TEST_OF_ENGLISH, TOEFL_SIGNATURE, TOEFL_TITLE,
    TOEIC_SIGNATURE,
};

/// Line-level signature test.
type Signature = fn(&str) -> bool;

/// Category signatures in priority order; the first one matching any line wins.
const SIGNATURES: &[(DocumentCategory, Signature)] = &[
    (DocumentCategory::DriverLicense, is_driver_license_line),
    (DocumentCategory::Ielts, is_ielts_line),
    (DocumentCategory::Toeic, is_toeic_line),
    (DocumentCategory::Toefl, is_toefl_line),
];

/// Classify an OCR line sequence into a single document category.
pub fn classify(lines: &OcrLines) -> DocumentCategory {
    for (category, signature) in SIGNATURES {
        if let Some(line) = lines.iter().find(|l| signature(l)) {
            debug!("Classified as {} from line {:?}", category, line);
            return *category;
        }
    }

    debug!("No category signature matched");
    DocumentCategory::Unknown
}

fn is_driver_license_line(line: &str) -> bool {
    DRIVER_LICENSE_SIGNATURE.is_match(line)
}

fn is_ielts_line(line: &str) -> bool {
    IELTS_SIGNATURE.is_match(line)
}

// "Test of English" alone is TOEIC; "Test of English as a Foreign Language" is the TOEFL title.
// TOEIC is checked before TOEFL, so without this exclusion the full TOEFL
// title could never reach the TOEFL signature.
fn is_toeic_line(line: &str) -> bool {
    TOEIC_SIGNATURE.is_match(line) || (TEST_OF_ENGLISH.is_match(line) && !TOEFL_TITLE.is_match(line))
}

fn is_toefl_line(line: &str) -> bool {
    TOEFL_SIGNATURE.is_match(line) || TOEFL_TITLE.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_lines(lines: &[&str]) -> DocumentCategory {
        classify(&OcrLines::new(lines))
    }

    #[test]
    fn test_single_signatures() {
        assert_eq!(classify_lines(&["Bằng lái xe"]), DocumentCategory::DriverLicense);
        assert_eq!(classify_lines(&["DRIVER'S LICENSE"]), DocumentCategory::DriverLicense);
        assert_eq!(classify_lines(&["IELTS Test Report Form"]), DocumentCategory::Ielts);
        assert_eq!(classify_lines(&["TOEIC Listening and Reading"]), DocumentCategory::Toeic);
        assert_eq!(classify_lines(&["TOEFL iBT Score Report"]), DocumentCategory::Toefl);
        assert_eq!(classify_lines(&["Random memo"]), DocumentCategory::Unknown);
    }

    #[test]
    fn test_priority_order() {
        let ielts_and_toeic = ["Listening and Reading", "Test Report Form"];
        assert_eq!(classify_lines(&ielts_and_toeic), DocumentCategory::Ielts);

        let all = ["TOEIC", "IELTS", "Giấy phép lái xe"];
        assert_eq!(classify_lines(&all), DocumentCategory::DriverLicense);

        assert_eq!(classify_lines(&["TOEFL", "TOEIC"]), DocumentCategory::Toeic);
    }

    #[test]
    fn test_toefl_title_is_not_toeic() {
        assert_eq!(
            classify_lines(&["Test of English as a Foreign Language"]),
            DocumentCategory::Toefl
        );
        assert_eq!(classify_lines(&["Test of English for International Communication"]), DocumentCategory::Toeic);
    }

    #[test]
    fn test_registration_number_implies_toefl() {
        let lines = ["Registration Number 1234 5678 9012 3456", "Test Date: 19 Sep 2015"];
        assert_eq!(classify_lines(&lines), DocumentCategory::Toefl);
    }
}
