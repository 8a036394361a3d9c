//! Identifying code extraction (registration, candidate and license numbers).

use regex::Regex;
use tracing::debug;

use crate::extraction::normalizer::OcrLines;
use crate::models::certificate::DocumentCategory;

use super::patterns::{
    BARE_16_DIGITS, BARE_CODE, CERT_CODE, DIGIT_RUN, GROUPED_16_DIGITS, IELTS_CANDIDATE_LABEL,
    IELTS_TRF_LABEL, LABELED_CODE, LICENSE_LABEL, LICENSE_NUMBER_NO, LICENSE_NUMBER_SO,
    LICENSE_NUMBER_SO_DIGITS, LICENSE_NUMBER_SO_NO, LOCALIZED_LICENSE_NUMBER, SEVEN_DIGITS,
    SHORT_ALNUM_TOKEN, SIX_OR_SEVEN_DIGITS, TOEFL_CODE_LABEL, TRF_NUMBER, TRF_NUMBER_VN,
};
use super::FieldExtractor;

/// One step of a code rule chain.
type CodeRule = fn(&CodeExtractor, &OcrLines) -> Option<String>;

const TOEFL_RULES: &[CodeRule] = &[
    CodeExtractor::toefl_labeled_line,
    CodeExtractor::toefl_anywhere,
];

const TOEIC_RULES: &[CodeRule] = &[
    CodeExtractor::toeic_seven_digits,
    CodeExtractor::toeic_short_token,
];

const IELTS_RULES: &[CodeRule] = &[
    CodeExtractor::ielts_candidate_number,
    CodeExtractor::ielts_trf_number,
    CodeExtractor::ielts_any_number,
];

const DRIVER_LICENSE_RULES: &[CodeRule] = &[CodeExtractor::license_number];

const GENERIC_RULES: &[CodeRule] = &[CodeExtractor::generic_code];

/// Identifying code extractor.
pub struct CodeExtractor {
    min_code_length: usize,
}

impl CodeExtractor {
    /// Create a new code extractor.
    pub fn new() -> Self {
        Self { min_code_length: 6 }
    }

    /// Set the minimum length of codes captured without a label.
    pub fn with_min_code_length(mut self, min_code_length: usize) -> Self {
        self.min_code_length = min_code_length;
        self
    }

    fn rules_for(category: DocumentCategory) -> &'static [CodeRule] {
        match category {
            DocumentCategory::Toefl => TOEFL_RULES,
            DocumentCategory::Toeic => TOEIC_RULES,
            DocumentCategory::Ielts => IELTS_RULES,
            DocumentCategory::DriverLicense => DRIVER_LICENSE_RULES,
            DocumentCategory::Unknown => &[],
        }
    }

    fn toefl_labeled_line(&self, lines: &OcrLines) -> Option<String> {
        let line = lines.iter().find(|l| TOEFL_CODE_LABEL.is_match(l))?;

        if let Some(caps) = GROUPED_16_DIGITS.captures(line) {
            return Some(format!("{} {} {} {}", &caps[1], &caps[2], &caps[3], &caps[4]));
        }

        if let Some(caps) = BARE_16_DIGITS.captures(line) {
            return Some(group_digits(&caps[1]));
        }

        let digits: String = DIGIT_RUN
            .find_iter(line)
            .flat_map(|m| m.as_str().chars())
            .take(16)
            .collect();
        if digits.chars().count() == 16 {
            return Some(group_digits(&digits));
        }

        None
    }

    fn toefl_anywhere(&self, lines: &OcrLines) -> Option<String> {
        if let Some(caps) = lines.iter().find_map(|l| BARE_16_DIGITS.captures(l)) {
            return Some(group_digits(&caps[1]));
        }

        lines.iter().find_map(|l| {
            GROUPED_16_DIGITS
                .captures(l)
                .map(|caps| format!("{} {} {} {}", &caps[1], &caps[2], &caps[3], &caps[4]))
        })
    }

    fn toeic_seven_digits(&self, lines: &OcrLines) -> Option<String> {
        first_capture(&SEVEN_DIGITS, lines)
    }

    fn toeic_short_token(&self, lines: &OcrLines) -> Option<String> {
        lines.iter().find_map(|l| {
            SHORT_ALNUM_TOKEN
                .captures_iter(l)
                .map(|caps| caps[1].to_string())
                .find(|token| has_digit(token))
        })
    }

    fn ielts_candidate_number(&self, lines: &OcrLines) -> Option<String> {
        let line = lines.iter().find(|l| IELTS_CANDIDATE_LABEL.is_match(l))?;
        SIX_OR_SEVEN_DIGITS.captures(line).map(|caps| caps[1].to_string())
    }

    fn ielts_trf_number(&self, lines: &OcrLines) -> Option<String> {
        let line = lines.iter().find(|l| IELTS_TRF_LABEL.is_match(l))?;
        TRF_NUMBER_VN
            .captures(line)
            .or_else(|| TRF_NUMBER.captures(line))
            .map(|caps| caps[1].to_uppercase())
    }

    fn ielts_any_number(&self, lines: &OcrLines) -> Option<String> {
        first_capture(&SIX_OR_SEVEN_DIGITS, lines)
    }

    fn license_number(&self, lines: &OcrLines) -> Option<String> {
        [
            &*LICENSE_NUMBER_SO_NO,
            &*LICENSE_NUMBER_SO,
            &*LICENSE_NUMBER_NO,
            &*LICENSE_NUMBER_SO_DIGITS,
        ]
        .into_iter()
        .find_map(|pattern| first_capture(pattern, lines))
    }

    fn generic_code(&self, lines: &OcrLines) -> Option<String> {
        // (pattern, anchored by a label)
        let patterns: [(&Regex, bool); 5] = [
            (&*CERT_CODE, false),
            (&*LABELED_CODE, true),
            (&*BARE_CODE, false),
            (&*LOCALIZED_LICENSE_NUMBER, true),
            (&*LICENSE_LABEL, true),
        ];

        patterns.into_iter().find_map(|(pattern, labeled)| {
            lines.iter().find_map(|l| {
                pattern
                    .captures_iter(l)
                    .map(|caps| caps[1].to_string())
                    .find(|code| labeled || self.is_plausible_bare_code(code))
            })
        })
    }

    fn is_plausible_bare_code(&self, code: &str) -> bool {
        code.chars().count() >= self.min_code_length && has_digit(code)
    }
}

impl Default for CodeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CodeExtractor {
    type Output = String;

    fn extract(&self, lines: &OcrLines, category: DocumentCategory) -> Option<String> {
        let rules = Self::rules_for(category).iter().chain(GENERIC_RULES);

        for rule in rules {
            if let Some(code) = rule(self, lines) {
                debug!("Extracted code {:?} for {}", code, category);
                return Some(code);
            }
        }

        None
    }
}

/// Extract the identifying code of a document.
pub fn extract_code(lines: &OcrLines, category: DocumentCategory) -> Option<String> {
    CodeExtractor::new().extract(lines, category)
}

/// Format a digit run in blocks of four separated by single spaces.
pub fn group_digits(digits: &str) -> String {
    digits
        .chars()
        .collect::<Vec<_>>()
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_capture(pattern: &Regex, lines: &OcrLines) -> Option<String> {
    lines
        .iter()
        .find_map(|l| pattern.captures(l).map(|caps| caps[1].to_string()))
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}
