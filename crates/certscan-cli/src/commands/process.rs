//! Process command - extract fields from a single OCR line file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use certscan_core::{CertificateExtractor, ExtractionResult};

use super::load_config;
use super::output::{format_result, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file with one OCR line per line or a JSON array of lines ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Include the joined OCR text in JSON output
    #[arg(long)]
    raw_text: bool,

    /// Print every date candidate with its priority
    #[arg(long)]
    show_candidates: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let lines = read_lines(&args.input)?;
    info!("Processing {} ({} lines)", args.input.display(), lines.len());

    let extractor = CertificateExtractor::from_config(&config.extraction);
    let result = extractor.extract_lines(&lines)?;
    let result = if args.raw_text || config.output.include_raw_text {
        result
    } else {
        result.without_raw_text()
    };

    let format = args.format.unwrap_or_else(|| config.output.format.into());
    let output = format_result(&result, format, args.pretty || config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_candidates {
        print_candidates(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read OCR lines from a file or stdin.
///
/// Content starting with `[` is parsed as a JSON array of strings; anything
/// else is taken as one OCR line per text line.
pub fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        fs::read_to_string(path)?
    };

    parse_lines(&content)
}

fn parse_lines(content: &str) -> anyhow::Result<Vec<String>> {
    if content.trim_start().starts_with('[') {
        let lines: Vec<String> = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Invalid JSON line array: {}", e))?;
        return Ok(lines);
    }

    Ok(content.lines().map(str::to_string).collect())
}

fn print_candidates(result: &ExtractionResult) {
    println!();
    println!("{} Date candidates:", style("ℹ").blue());

    for candidate in result.dates() {
        let origin = if candidate.derived {
            "derived".to_string()
        } else {
            format!("{:?}", candidate.source)
        };
        println!(
            "  {:>2}  {:<12} {:<14} {}",
            candidate.priority,
            format!("{:?}", candidate.kind),
            candidate.value,
            origin
        );
    }
}
