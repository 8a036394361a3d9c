//! Common regex patterns for certificate and license extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Document signatures
    pub static ref DRIVER_LICENSE_SIGNATURE: Regex = Regex::new(
        r"(?i)driver['’]?s?\s*licen[sc]e|driving\s+licen[sc]e|giấy\s+phép\s+lái\s+xe|bằng\s+lái"
    ).unwrap();

    pub static ref IELTS_SIGNATURE: Regex = Regex::new(
        r"(?i)ielts|test\s+report\s+form|international\s+english\s+language\s+testing\s+system"
    ).unwrap();

    pub static ref TOEIC_SIGNATURE: Regex = Regex::new(
        r"(?i)toeic|listening\s+and\s+reading"
    ).unwrap();

    pub static ref TEST_OF_ENGLISH: Regex = Regex::new(
        r"(?i)test\s+of\s+english"
    ).unwrap();

    pub static ref TOEFL_TITLE: Regex = Regex::new(
        r"(?i)test\s+of\s+english\s+as\s+a\s+foreign\s+language"
    ).unwrap();

    pub static ref TOEFL_SIGNATURE: Regex = Regex::new(
        r"(?i)toefl|registration\s+number|appointment\s+number"
    ).unwrap();

    // TOEFL registration / appointment numbers
    pub static ref TOEFL_CODE_LABEL: Regex = Regex::new(
        r"(?i)registration\s+number|appointment\s+number"
    ).unwrap();

    pub static ref GROUPED_16_DIGITS: Regex = Regex::new(
        r"\b([0-9]{4})\s+([0-9]{4})\s+([0-9]{4})\s+([0-9]{4})\b"
    ).unwrap();

    pub static ref BARE_16_DIGITS: Regex = Regex::new(
        r"\b([0-9]{16})\b"
    ).unwrap();

    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"[0-9]+"
    ).unwrap();

    // TOEIC
    pub static ref SEVEN_DIGITS: Regex = Regex::new(
        r"\b([0-9]{7})\b"
    ).unwrap();

    pub static ref SHORT_ALNUM_TOKEN: Regex = Regex::new(
        r"\b([A-Z0-9]{6,8})\b"
    ).unwrap();

    // IELTS
    pub static ref IELTS_CANDIDATE_LABEL: Regex = Regex::new(
        r"(?i)candidate\s+number"
    ).unwrap();

    pub static ref SIX_OR_SEVEN_DIGITS: Regex = Regex::new(
        r"\b([0-9]{6,7})\b"
    ).unwrap();

    pub static ref IELTS_TRF_LABEL: Regex = Regex::new(
        r"(?i)test\s+report\s+form\s+number"
    ).unwrap();

    pub static ref TRF_NUMBER_VN: Regex = Regex::new(
        r"(?i)\b([0-9]{2}VN[0-9]+)"
    ).unwrap();

    pub static ref TRF_NUMBER: Regex = Regex::new(
        r"(?i)\b([0-9]{2}[A-Z]{2}[0-9]+)"
    ).unwrap();

    // Driver license numbers
    pub static ref LICENSE_NUMBER_SO_NO: Regex = Regex::new(
        r"(?i)số\s*/\s*no\.?\s*[:.]?\s*([A-Z0-9]+)"
    ).unwrap();

    pub static ref LICENSE_NUMBER_SO: Regex = Regex::new(
        r"(?i)số\s*[:.]\s*([A-Z0-9]+)"
    ).unwrap();

    pub static ref LICENSE_NUMBER_NO: Regex = Regex::new(
        r"(?i)\bno\s*[:.]\s*([A-Z0-9]+)"
    ).unwrap();

    pub static ref LICENSE_NUMBER_SO_DIGITS: Regex = Regex::new(
        r"(?i)số\s+([0-9]{8,})"
    ).unwrap();

    // Generic codes
    pub static ref CERT_CODE: Regex = Regex::new(
        r"(?i:cert(?:ificate)?)\s*[#:]?\s*([A-Z0-9][A-Z0-9\-]*)"
    ).unwrap();

    pub static ref LABELED_CODE: Regex = Regex::new(
        r"(?i)\b(?:no|number|id)[:.]+\s*([A-Z0-9][A-Z0-9\-/]*)"
    ).unwrap();

    pub static ref BARE_CODE: Regex = Regex::new(
        r"\b([A-Z0-9]{6,})\b"
    ).unwrap();

    pub static ref LOCALIZED_LICENSE_NUMBER: Regex = Regex::new(
        r"(?i)số\s+(?:giấy\s+phép|chứng\s+chỉ)\s*[:.]?\s*([A-Z0-9][A-Z0-9\-/]*)"
    ).unwrap();

    pub static ref LICENSE_LABEL: Regex = Regex::new(
        r"(?i)licen[sc]e\s*[:#]\s*([A-Z0-9][A-Z0-9\-/]*)"
    ).unwrap();

    // Issuers
    pub static ref TOEIC_REGIONAL_BODY: Regex = Regex::new(
        r"(?i)\biig\b"
    ).unwrap();

    pub static ref TRANSPORT_MINISTRY: Regex = Regex::new(
        r"(?i)bộ\s+giao\s+thông\s+vận\s+tải|bộ\s+gtvt|ministry\s+of\s+transport"
    ).unwrap();

    pub static ref PROVINCIAL_TRANSPORT_DEPARTMENT: Regex = Regex::new(
        r"(?i)sở\s+giao\s+thông\s+vận\s+tải|sở\s+gtvt|department\s+of\s+transport"
    ).unwrap();

    pub static ref ISSUER_LABELS: Vec<Regex> = vec![
        Regex::new(r"(?i)issued\s+by\s*:\s*(.+)").unwrap(),
        Regex::new(r"(?i)provider\s*:\s*(.+)").unwrap(),
        Regex::new(r"(?i)certifying\s+authority\s*:\s*(.+)").unwrap(),
        Regex::new(r"(?i)organi[sz]ation\s*:\s*(.+)").unwrap(),
        Regex::new(r"(?i)(?:cấp|ký)\s+bởi\s*:?\s*(.+)").unwrap(),
        Regex::new(r"(?i)(?:cơ\s+quan|đơn\s+vị)\s+cấp\s*:?\s*(.+)").unwrap(),
    ];

    pub static ref INSTITUTION_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:ministry|department|bureau|authority|bộ|sở|cục)\b"
    ).unwrap();

    // Date tokens
    pub static ref NUMERIC_DATE: Regex = Regex::new(
        r"\b([0-9]{1,2})[/\-.]([0-9]{1,2})[/\-.]([0-9]{4})\b"
    ).unwrap();

    pub static ref MONTH_NAME_DATE: Regex = Regex::new(
        r"(?i)\b([0-9]{1,2})[\s/\-.]+([a-z]{3})[a-z]*\.?[\s/\-.,]+([0-9]{4})\b"
    ).unwrap();

    // Localized day/month/year phrasing, most explicit first
    pub static ref DAY_MONTH_YEAR_FULL: Regex = Regex::new(
        r"(?i)(?:ngày|date)\s*([0-9]{1,2})\s*(?:tháng|month)\s*([0-9]{1,2})\s*(?:năm|year)\s*([0-9]{4})"
    ).unwrap();

    pub static ref DAY_MONTH_YEAR_PARTIAL: Regex = Regex::new(
        r"(?i)([0-9]{1,2})\s*(?:tháng|month)\s*([0-9]{1,2})\s*(?:năm|year)\s*([0-9]{4})"
    ).unwrap();

    pub static ref DAY_MONTH_YEAR_BARE: Regex = Regex::new(
        r"(?i)(?:ngày|date)\s*:?\s*([0-9]{1,2})[\s,]+([0-9]{1,2})[\s,]+([0-9]{4})\b"
    ).unwrap();

    // Date labels
    pub static ref TEST_DATE_LABEL: Regex = Regex::new(
        r"(?i)test\s+date"
    ).unwrap();

    pub static ref DATE_LABEL_LINE: Regex = Regex::new(
        r"(?i)^date\b"
    ).unwrap();

    pub static ref ISSUE_DATE_LABEL: Regex = Regex::new(
        r"(?i)issue\s+date|issued\s+on|date\s+of\s+issue|ngày\s+cấp|cấp\s+ngày"
    ).unwrap();

    pub static ref GENERIC_ISSUE_DATE_LABEL: Regex = Regex::new(
        r"(?i)\bngày\b|issue\s+date|issued\s+on|date\s+of\s+issue"
    ).unwrap();

    pub static ref EXPIRY_DATE_LABEL: Regex = Regex::new(
        r"(?i)valid\s+until|expires|expiry\s+date|expiration\s+date|giá\s+trị\s+đến|ngày\s+hết\s+hạn"
    ).unwrap();

    pub static ref NO_EXPIRATION_MARKER: Regex = Regex::new(
        r"(?i)không\s+(?:có\s+)?thời\s+hạn|no\s+expir(?:y|ation)|does\s+not\s+expire|unlimited"
    ).unwrap();
}
