//! Batch processing command for multiple OCR line files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use certscan_core::{CertificateExtractor, ExtractionResult};

use super::load_config;
use super::output::{format_result, result_record, OutputFormat, RESULT_COLUMNS};
use super::process::read_lines;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let extractor = Arc::new(CertificateExtractor::from_config(&config.extraction));
    let permits = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let extractor = Arc::clone(&extractor);
        let permits = Arc::clone(&permits);

        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let result = tokio::task::spawn_blocking(move || process_single_file(path, &extractor)).await?;
            anyhow::Ok((index, result))
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined??;

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                tasks.abort_all();
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), error_msg);
            }
        }

        results.push((index, result));
        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<ProcessResult> = results.into_iter().map(|(_, r)| r).collect();

    let format = args.format.unwrap_or_else(|| config.output.format.into());
    let include_raw_text = config.output.include_raw_text;

    if let Some(output_dir) = &args.output_dir {
        for processed in &results {
            let Some(result) = &processed.result else {
                continue;
            };

            let output_name = processed.path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("certificate");
            let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

            let content = if include_raw_text {
                format_result(result, format, config.output.pretty)?
            } else {
                format_result(&result.clone().without_raw_text(), format, config.output.pretty)?
            };

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args.output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let successful = results.len() - failed.len();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(path: PathBuf, extractor: &CertificateExtractor) -> ProcessResult {
    let file_start = Instant::now();

    let outcome = read_lines(&path).and_then(|lines| Ok(extractor.extract_lines(&lines)?));
    let processing_time_ms = file_start.elapsed().as_millis() as u64;

    match outcome {
        Ok(result) => ProcessResult {
            path,
            result: Some(result),
            error: None,
            processing_time_ms,
        },
        Err(e) => ProcessResult {
            path,
            result: None,
            error: Some(e.to_string()),
            processing_time_ms,
        },
    }
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(RESULT_COLUMNS);
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for processed in results {
        let filename = processed.path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut record = vec![filename];
        match &processed.result {
            Some(result) => {
                record.push("success".to_string());
                record.extend(result_record(result));
            }
            None => {
                record.push("error".to_string());
                record.extend(std::iter::repeat_n(String::new(), RESULT_COLUMNS.len()));
            }
        }
        record.push(processed.processing_time_ms.to_string());
        record.push(processed.error.clone().unwrap_or_default());

        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
