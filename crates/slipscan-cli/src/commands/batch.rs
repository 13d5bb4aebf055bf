//! Batch processing command for multiple receipt files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use slipscan_core::models::config::SlipscanConfig;
use slipscan_core::{parse_document, ParseReport, ReceiptParser, SourceKind};

use super::process::{format_report, output_path_for, report_total, OutputFormat};
use super::{load_config, read_input};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

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
struct FileResult {
    path: PathBuf,
    outcome: Result<ParseReport, String>,
    processing_time_ms: u64,
}

/// One row of `summary.csv`.
#[derive(Serialize)]
struct SummaryRow<'a> {
    filename: &'a str,
    status: &'static str,
    transactions: Option<usize>,
    total: Option<String>,
    date: Option<String>,
    error: &'a str,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| matches!(SourceKind::from_path(p), Ok(SourceKind::PlainText | SourceKind::Pdf)))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let results = process_files(files, config, args.jobs, !args.continue_on_error, &pb).await?;
    pb.finish_and_clear();

    for result in &results {
        if let Err(e) = &result.outcome {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), e);
            } else {
                error!("Failed to process {}: {}", result.path.display(), e);
                anyhow::bail!("Processing {} failed: {}", result.path.display(), e);
            }
        }
    }

    for result in &results {
        let Ok(report) = &result.outcome else {
            continue;
        };
        let content = format_report(report, args.format)?;
        match &args.output_dir {
            Some(output_dir) => {
                let output_path = output_path_for(&result.path, output_dir, args.format);
                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => {
                println!("==> {} <==", result.path.display());
                print!("{}", content);
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.outcome.is_err()).collect();
    let transactions: usize = results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok())
        .map(|report| report.transactions.len())
        .sum();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed, {} transactions",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red(),
        transactions
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            if let Err(e) = &result.outcome {
                eprintln!("  - {}: {} ({}ms)", result.path.display(), e, result.processing_time_ms);
            }
        }
    }

    Ok(())
}

/// Run files on the blocking pool, at most `jobs` at a time.
///
/// With `stop_on_error`, no new file starts once one has failed; files
/// already running finish. Results come back in input order.
async fn process_files(
    files: Vec<PathBuf>,
    config: SlipscanConfig,
    jobs: usize,
    stop_on_error: bool,
    pb: &ProgressBar,
) -> anyhow::Result<Vec<FileResult>> {
    let parser = Arc::new(ReceiptParser::from_config(&config.parsing, &config.classifier));
    let config = Arc::new(config);
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let failed = Arc::new(AtomicBool::new(false));

    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        if stop_on_error && failed.load(Ordering::Acquire) {
            debug!("Not starting {} after an earlier failure", path.display());
            break;
        }

        let parser = Arc::clone(&parser);
        let config = Arc::clone(&config);
        let failed = Arc::clone(&failed);
        let pb = pb.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let outcome = process_single_file(&path, &parser, &config).map_err(|e| e.to_string());
            if outcome.is_err() {
                failed.store(true, Ordering::Release);
            }
            pb.inc(1);

            FileResult {
                path,
                outcome,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            }
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await?);
    }
    Ok(results)
}

fn process_single_file(
    path: &Path,
    parser: &ReceiptParser,
    config: &SlipscanConfig,
) -> anyhow::Result<ParseReport> {
    let data = read_input(path, config)?;
    let source = SourceKind::from_path(path)?.text_source(&config.source)?;
    Ok(parse_document(source.as_ref(), parser, &data)?)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let row = match &result.outcome {
            Ok(report) => SummaryRow {
                filename,
                status: "success",
                transactions: Some(report.transactions.len()),
                total: Some(report_total(report).to_string()),
                date: Some(report.date.to_string()),
                error: "",
            },
            Err(e) => SummaryRow {
                filename,
                status: "error",
                transactions: None,
                total: None,
                date: None,
                error: e,
            },
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_files(dir: &TempDir) -> Vec<PathBuf> {
        let names = [("a.txt", ""), ("b.txt", "Uber ride 15.00\n"), ("c.txt", "Tide 4.00\n")];
        names
            .iter()
            .map(|(name, content)| {
                let path = dir.path().join(name);
                fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }

    #[tokio::test]
    async fn test_stops_starting_files_after_failure() {
        let dir = TempDir::new().unwrap();
        let files = write_files(&dir);

        let results = process_files(files, SlipscanConfig::default(), 1, true, &ProgressBar::hidden())
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].outcome.is_err());
    }

    #[tokio::test]
    async fn test_continues_past_failure() {
        let dir = TempDir::new().unwrap();
        let files = write_files(&dir);

        let results = process_files(files, SlipscanConfig::default(), 1, false, &ProgressBar::hidden())
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].outcome.is_err());
        assert_eq!(results[1].outcome.as_ref().unwrap().transactions.len(), 1);
        assert_eq!(results[2].outcome.as_ref().unwrap().transactions.len(), 1);
    }
}
