//! Output formatting shared by the process and batch commands.

use certscan_core::models::config::OutputFormat as ConfigFormat;
use certscan_core::{DateCandidate, ExtractionResult};

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for per-document output files.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

impl From<ConfigFormat> for OutputFormat {
    fn from(format: ConfigFormat) -> Self {
        match format {
            ConfigFormat::Json => Self::Json,
            ConfigFormat::Csv => Self::Csv,
            ConfigFormat::Text => Self::Text,
        }
    }
}

/// Columns describing one extraction result.
pub const RESULT_COLUMNS: [&str; 6] = [
    "category",
    "code",
    "issuer",
    "issue_date",
    "expiry_date",
    "expiry_derived",
];

/// Render a result in the requested format.
pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

/// Values for [`RESULT_COLUMNS`].
pub fn result_record(result: &ExtractionResult) -> [String; 6] {
    let expiry = result.expiry_date();

    [
        result.category().to_string(),
        result.code().unwrap_or_default().to_string(),
        result.issuer().unwrap_or_default().to_string(),
        date_value(result.issue_date()),
        date_value(expiry),
        expiry.map(|c| c.derived.to_string()).unwrap_or_default(),
    ]
}

fn date_value(candidate: Option<&DateCandidate>) -> String {
    candidate.map(|c| c.value.to_string()).unwrap_or_default()
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(RESULT_COLUMNS)?;
    wtr.write_record(result_record(result))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", result.category()));
    output.push_str(&format!("Code: {}\n", result.code().unwrap_or("-")));
    output.push_str(&format!("Issuer: {}\n", result.issuer().unwrap_or("-")));
    output.push('\n');

    output.push_str(&format!("Issue date:  {}\n", text_date(result.issue_date())));
    output.push_str(&format!("Expiry date: {}\n", text_date(result.expiry_date())));

    if !result.warnings().is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in result.warnings() {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}

fn text_date(candidate: Option<&DateCandidate>) -> String {
    match candidate {
        Some(c) if c.derived => format!("{} (derived)", c.value),
        Some(c) => c.value.to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certscan_core::extraction::keywords::IELTS_COMBINED_ISSUER;

    fn ielts() -> ExtractionResult {
        certscan_core::extract(["IELTS Test Report Form", "Candidate Number 1234567", "18/FEB/2023"]).unwrap()
    }

    #[test]
    fn test_csv_output() {
        let csv = format_result(&ielts(), OutputFormat::Csv, false).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("category,code,issuer,issue_date,expiry_date,expiry_derived"));
        let expected = format!("ielts,1234567,{},2023-02-18,2025-02-18,true", IELTS_COMBINED_ISSUER);
        assert_eq!(lines.next(), Some(expected.as_str()));
    }

    #[test]
    fn test_text_output_marks_derived_expiry() {
        let text = format_result(&ielts(), OutputFormat::Text, false).unwrap();

        assert!(text.contains("Category: ielts"));
        assert!(text.contains("Expiry date: 2025-02-18 (derived)"));
    }
}
