//! Issue and expiry date extraction.
//!
//! Dates are collected by a fixed sequence of passes into one candidate
//! list. Each candidate carries a priority; after the last pass the list is
//! sorted once and the highest-priority candidate of each kind is the
//! accepted one (see [`accepted_candidate`]). Lower-ranked candidates stay in
//! the list for diagnostics.

use chrono::{Months, NaiveDate};
use regex::{Captures, Regex};
use tracing::debug;

use crate::error::ExtractionError;
use crate::extraction::normalizer::OcrLines;
use crate::models::certificate::{accepted_candidate, DateCandidate, DateKind, DocumentCategory};

use super::patterns::{
    DATE_LABEL_LINE, DAY_MONTH_YEAR_BARE, DAY_MONTH_YEAR_FULL, DAY_MONTH_YEAR_PARTIAL,
    EXPIRY_DATE_LABEL, GENERIC_ISSUE_DATE_LABEL, ISSUE_DATE_LABEL, MONTH_NAME_DATE,
    NO_EXPIRATION_MARKER, NUMERIC_DATE, TEST_DATE_LABEL,
};

const PRIORITY_LABELED: u8 = 10;
const PRIORITY_DATE_LABEL: u8 = 9;
const PRIORITY_MOST_RECENT: u8 = 8;
const PRIORITY_HEURISTIC: u8 = 7;
const PRIORITY_EXPIRY_KEYWORD: u8 = 6;
const PRIORITY_ISSUE_KEYWORD: u8 = 5;
const PRIORITY_DERIVED: u8 = 2;
const PRIORITY_UNCLASSIFIED: u8 = 1;

/// A date found in a line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken {
    /// Parsed calendar date.
    pub date: NaiveDate,
    /// Matched text.
    pub source: String,
    /// Byte offset of the match in its line.
    pub start: usize,
}

/// One date collection pass.
type DatePass = fn(&DateExtractor, &mut CandidateList, &OcrLines, DocumentCategory);

/// Passes in execution order.
const PASSES: &[(&str, DatePass)] = &[
    ("category", DateExtractor::category_pass),
    ("date label", DateExtractor::date_label_pass),
    ("trailing lines", DateExtractor::trailing_lines_pass),
    ("day/month/year phrasing", DateExtractor::day_month_year_pass),
    ("issue keywords", DateExtractor::issue_keyword_pass),
    ("expiry keywords", DateExtractor::expiry_keyword_pass),
    ("unclassified", DateExtractor::unclassified_pass),
    ("derivation", DateExtractor::derivation_pass),
];

/// Growable candidate list shared by all passes.
#[derive(Debug, Default)]
struct CandidateList {
    candidates: Vec<DateCandidate>,
}

impl CandidateList {
    fn push(&mut self, candidate: DateCandidate) {
        debug!(
            "Date candidate {:?} = {} (priority {}, derived: {})",
            candidate.kind, candidate.value, candidate.priority, candidate.derived
        );
        self.candidates.push(candidate);
    }

    fn has(&self, kind: DateKind) -> bool {
        self.candidates.iter().any(|c| c.kind == kind)
    }

    fn has_read_expiry(&self) -> bool {
        self.candidates
            .iter()
            .any(|c| c.kind == DateKind::ExpiryDate && !c.derived)
    }

    fn accepted_issue_date(&self) -> Option<NaiveDate> {
        accepted_candidate(&self.candidates, DateKind::IssueDate).and_then(|c| c.value.as_date())
    }

    fn contains_source(&self, source: &str) -> bool {
        self.candidates.iter().any(|c| c.source == source)
    }

    fn into_sorted(mut self) -> Vec<DateCandidate> {
        self.candidates.sort_by(|a, b| b.priority.cmp(&a.priority));
        self.candidates
    }
}

/// Date extractor.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    trailing_window: usize,
    derive_expiry: bool,
    expiry_offset_months: u32,
}

impl DateExtractor {
    /// Create a new date extractor.
    pub fn new() -> Self {
        Self {
            trailing_window: 7,
            derive_expiry: true,
            expiry_offset_months: 24,
        }
    }

    /// Set how many trailing lines the trailing-date passes inspect.
    pub fn with_trailing_window(mut self, lines: usize) -> Self {
        self.trailing_window = lines;
        self
    }

    /// Enable or disable deriving a missing expiry date.
    pub fn with_expiry_derivation(mut self, derive: bool) -> Self {
        self.derive_expiry = derive;
        self
    }

    /// Set the months added to the issue date when deriving the expiry date.
    pub fn with_expiry_offset_months(mut self, months: u32) -> Self {
        self.expiry_offset_months = months;
        self
    }

    /// Extract all date candidates, highest priority first.
    pub fn extract(&self, lines: &OcrLines, category: DocumentCategory) -> Vec<DateCandidate> {
        let mut list = CandidateList::default();

        for (name, pass) in PASSES {
            let before = list.candidates.len();
            pass(self, &mut list, lines, category);
            debug!("Date pass '{}' added {} candidates", name, list.candidates.len() - before);
        }

        list.into_sorted()
    }

    /// Issue date plus the configured offset; `None` on calendar overflow.
    pub fn derive_expiry(&self, issue: NaiveDate) -> Option<NaiveDate> {
        issue.checked_add_months(Months::new(self.expiry_offset_months))
    }

    fn push_issue(&self, list: &mut CandidateList, token: DateToken, priority: u8) {
        list.push(DateCandidate::read(DateKind::IssueDate, token.date, priority, token.source));
        self.derive_missing_expiry(list);
    }

    fn derive_missing_expiry(&self, list: &mut CandidateList) {
        if !self.derive_expiry || list.has(DateKind::ExpiryDate) {
            return;
        }

        if let Some(expiry) = list.accepted_issue_date().and_then(|d| self.derive_expiry(d)) {
            list.push(DateCandidate::derived_expiry(expiry, PRIORITY_DERIVED));
        }
    }

    fn category_pass(&self, list: &mut CandidateList, lines: &OcrLines, category: DocumentCategory) {
        match category {
            DocumentCategory::Toefl => self.toefl_issue_date(list, lines),
            DocumentCategory::Ielts => self.ielts_issue_date(list, lines),
            DocumentCategory::DriverLicense => self.driver_license_dates(list, lines),
            DocumentCategory::Toeic | DocumentCategory::Unknown => {}
        }
    }

    fn toefl_issue_date(&self, list: &mut CandidateList, lines: &OcrLines) {
        let labeled = lines
            .iter()
            .filter(|l| TEST_DATE_LABEL.is_match(l))
            .find_map(first_date);

        if let Some(token) = labeled {
            list.push(DateCandidate::read(DateKind::IssueDate, token.date, PRIORITY_LABELED, token.source));
            return;
        }

        // The earliest date on a score report is usually the birth date.
        let mut dates = distinct_dates(lines);
        let pick = if dates.len() >= 2 { Some(dates.swap_remove(1)) } else { dates.pop() };

        if let Some(token) = pick {
            list.push(DateCandidate::read(DateKind::IssueDate, token.date, PRIORITY_HEURISTIC, token.source));
        }
    }

    fn ielts_issue_date(&self, list: &mut CandidateList, lines: &OcrLines) {
        // The result date is the latest date printed on a Test Report Form.
        if let Some(token) = distinct_dates(lines).pop() {
            list.push(DateCandidate::read(DateKind::IssueDate, token.date, PRIORITY_MOST_RECENT, token.source));
        }
    }

    fn driver_license_dates(&self, list: &mut CandidateList, lines: &OcrLines) {
        if let Some(expiry) = lines.iter().find_map(|l| expiry_on_line(l, PRIORITY_LABELED)) {
            list.push(expiry);
        }

        let issue = lines
            .iter()
            .filter(|l| ISSUE_DATE_LABEL.is_match(l))
            .find_map(first_date);
        if let Some(token) = issue {
            list.push(DateCandidate::read(DateKind::IssueDate, token.date, PRIORITY_LABELED, token.source));
        }

        let has_issue = list.has(DateKind::IssueDate);
        let has_expiry = list.has(DateKind::ExpiryDate);
        if has_issue && has_expiry {
            return;
        }

        let mut dates = distinct_dates(lines);
        if dates.len() >= 2 {
            let latest = dates.pop();
            let earliest = dates.swap_remove(0);

            if !has_issue {
                list.push(DateCandidate::read(DateKind::IssueDate, earliest.date, PRIORITY_HEURISTIC, earliest.source));
            }

            let issued = list.accepted_issue_date();
            if let Some(latest) = latest.filter(|t| !has_expiry && issued.is_none_or(|d| t.date > d)) {
                list.push(DateCandidate::read(DateKind::ExpiryDate, latest.date, PRIORITY_HEURISTIC, latest.source));
            }
        } else if let (Some(only), false) = (dates.pop(), has_issue) {
            list.push(DateCandidate::read(DateKind::IssueDate, only.date, PRIORITY_HEURISTIC, only.source));
        }
    }

    fn date_label_pass(&self, list: &mut CandidateList, lines: &OcrLines, _: DocumentCategory) {
        let trailing = lines.trailing(self.trailing_window);

        let token = trailing
            .iter()
            .enumerate()
            .filter(|(_, l)| DATE_LABEL_LINE.is_match(l))
            .find_map(|(i, _)| trailing.get(i + 1).and_then(|next| first_numeric_date(next)));

        if let Some(token) = token {
            self.push_issue(list, token, PRIORITY_DATE_LABEL);
        }
    }

    fn trailing_lines_pass(&self, list: &mut CandidateList, lines: &OcrLines, _: DocumentCategory) {
        if list.has(DateKind::IssueDate) {
            return;
        }

        let token = lines
            .trailing(self.trailing_window)
            .iter()
            .find_map(|l| first_numeric_date(l));

        if let Some(token) = token {
            self.push_issue(list, token, PRIORITY_HEURISTIC);
        }
    }

    fn day_month_year_pass(&self, list: &mut CandidateList, lines: &OcrLines, category: DocumentCategory) {
        if category != DocumentCategory::DriverLicense || list.has(DateKind::IssueDate) {
            return;
        }

        let phrasings: [(&Regex, u8); 3] = [
            (&*DAY_MONTH_YEAR_FULL, 9),
            (&*DAY_MONTH_YEAR_PARTIAL, 8),
            (&*DAY_MONTH_YEAR_BARE, 7),
        ];
        let trailing = lines.trailing(self.trailing_window);

        let found = phrasings.into_iter().find_map(|(pattern, priority)| {
            trailing
                .iter()
                .find_map(|l| day_month_year(pattern, l))
                .map(|token| (token, priority))
        });

        if let Some((token, priority)) = found {
            self.push_issue(list, token, priority);
        }
    }

    fn issue_keyword_pass(&self, list: &mut CandidateList, lines: &OcrLines, _: DocumentCategory) {
        if list.has(DateKind::IssueDate) {
            return;
        }

        let token = lines
            .iter()
            .filter(|l| GENERIC_ISSUE_DATE_LABEL.is_match(l))
            .find_map(first_any_date);

        if let Some(token) = token {
            self.push_issue(list, token, PRIORITY_ISSUE_KEYWORD);
        }
    }

    fn expiry_keyword_pass(&self, list: &mut CandidateList, lines: &OcrLines, _: DocumentCategory) {
        // A derived expiry does not block this pass: an expiry printed on the
        // document outranks one computed from the issue date.
        if list.has_read_expiry() {
            return;
        }

        if let Some(expiry) = lines.iter().find_map(|l| expiry_on_line(l, PRIORITY_EXPIRY_KEYWORD)) {
            list.push(expiry);
        }
    }

    fn unclassified_pass(&self, list: &mut CandidateList, lines: &OcrLines, _: DocumentCategory) {
        for token in lines.iter().flat_map(numeric_dates) {
            if !list.contains_source(&token.source) {
                list.push(DateCandidate::read(DateKind::Unknown, token.date, PRIORITY_UNCLASSIFIED, token.source));
            }
        }
    }

    fn derivation_pass(&self, list: &mut CandidateList, _: &OcrLines, _: DocumentCategory) {
        self.derive_missing_expiry(list);
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract date candidates with the default policy.
pub fn extract_dates(lines: &OcrLines, category: DocumentCategory) -> Vec<DateCandidate> {
    DateExtractor::new().extract(lines, category)
}

/// Map an English month name or abbreviation to its number.
pub fn month_from_name(name: &str) -> Option<u32> {
    let abbreviation: String = name.chars().take(3).collect::<String>().to_lowercase();

    let month = match abbreviation.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };

    Some(month)
}

/// Numeric `DD/MM/YYYY`, `DD-MM-YYYY` and `DD.MM.YYYY` dates in a line.
pub fn numeric_dates(line: &str) -> Vec<DateToken> {
    NUMERIC_DATE
        .captures_iter(line)
        .filter_map(|caps| token_from(&caps, |m| m.parse().ok()))
        .collect()
}

/// `DD Mon YYYY` and `DD/Mon/YYYY` dates in a line.
pub fn month_name_dates(line: &str) -> Vec<DateToken> {
    MONTH_NAME_DATE
        .captures_iter(line)
        .filter_map(|caps| token_from(&caps, month_from_name))
        .collect()
}

/// Numeric and month-name dates in a line, in order of appearance.
pub fn find_dates(line: &str) -> Vec<DateToken> {
    let mut tokens = numeric_dates(line);
    tokens.extend(month_name_dates(line));
    tokens.sort_by_key(|t| t.start);
    tokens
}

/// First numeric or month-name date in a line.
pub fn first_date(line: &str) -> Option<DateToken> {
    find_dates(line).into_iter().next()
}

/// Build a date from day, month and year text, rejecting impossible dates.
pub fn parse_date_parts(day: &str, month: u32, year: &str) -> Result<NaiveDate, ExtractionError> {
    let malformed = || ExtractionError::MalformedDate {
        value: format!("{}/{}/{}", day, month, year),
    };

    let day: u32 = day.parse().map_err(|_| malformed())?;
    let year: i32 = year.parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

fn first_numeric_date(line: &str) -> Option<DateToken> {
    numeric_dates(line).into_iter().next()
}

fn first_any_date(line: &str) -> Option<DateToken> {
    first_date(line).or_else(|| {
        [&*DAY_MONTH_YEAR_FULL, &*DAY_MONTH_YEAR_PARTIAL, &*DAY_MONTH_YEAR_BARE]
            .into_iter()
            .find_map(|pattern| day_month_year(pattern, line))
    })
}

fn day_month_year(pattern: &Regex, line: &str) -> Option<DateToken> {
    pattern
        .captures_iter(line)
        .find_map(|caps| token_from(&caps, |m| m.parse().ok()))
}

/// Token from day/month/year capture groups 1..=3; malformed dates are logged and dropped.
fn token_from(caps: &Captures<'_>, month: impl Fn(&str) -> Option<u32>) -> Option<DateToken> {
    let whole = caps.get(0)?;

    let parsed = month(&caps[2])
        .ok_or_else(|| ExtractionError::MalformedDate { value: whole.as_str().to_string() })
        .and_then(|m| parse_date_parts(&caps[1], m, &caps[3]));

    match parsed {
        Ok(date) => Some(DateToken {
            date,
            source: whole.as_str().to_string(),
            start: whole.start(),
        }),
        Err(e) => {
            debug!("Dropping date token: {}", e);
            None
        }
    }
}

/// All dates in the document, one per calendar day, oldest first.
fn distinct_dates(lines: &OcrLines) -> Vec<DateToken> {
    let mut dates: Vec<DateToken> = lines.iter().flat_map(find_dates).collect();
    dates.sort_by_key(|t| t.date);
    dates.dedup_by_key(|t| t.date);
    dates
}

/// Expiry candidate from a line carrying an expiry label.
fn expiry_on_line(line: &str, priority: u8) -> Option<DateCandidate> {
    if !EXPIRY_DATE_LABEL.is_match(line) {
        return None;
    }

    if let Some(marker) = NO_EXPIRATION_MARKER.find(line) {
        return Some(DateCandidate::no_expiration(priority, marker.as_str()));
    }

    first_any_date(line)
        .map(|token| DateCandidate::read(DateKind::ExpiryDate, token.date, priority, token.source))
}
