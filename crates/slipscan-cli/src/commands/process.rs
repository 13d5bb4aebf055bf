//! Process command - extract transactions from a single receipt.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, info};

use slipscan_core::{parse_document, ParseReport, ReceiptParser, SourceKind};
use slipscan_core::receipt::DateSource;

use super::{load_config, read_input, read_limited};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (OCR text or PDF), or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// File name used to pick the reader when reading stdin
    #[arg(long, default_value = "stdin.txt")]
    stdin_name: String,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON report
    Json,
    /// One CSV row per transaction
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let (name, data) = if args.input.as_os_str() == "-" {
        let data = read_limited(std::io::stdin().lock(), config.source.max_file_bytes, "stdin")?;
        (PathBuf::from(&args.stdin_name), data)
    } else {
        let data = read_input(&args.input, &config)?;
        (args.input.clone(), data)
    };

    info!("Processing {}", name.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Extracting text...");

    let kind = SourceKind::from_path(&name)?;
    let source = kind.text_source(&config.source)?;
    let parser = ReceiptParser::from_config(&config.parsing, &config.classifier);

    pb.set_message("Parsing receipt...");
    let report = parse_document(source.as_ref(), &parser, &data)?;
    pb.finish_and_clear();

    for warning in &report.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Wrote {} transactions to {}",
            style("✓").green(),
            report.transactions.len(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render a report in the requested format.
pub fn format_report(report: &ParseReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &ParseReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "description", "amount", "suggested_category", "source"])?;

    for transaction in &report.transactions {
        wtr.write_record([
            transaction.date.to_string().as_str(),
            &transaction.description,
            &transaction.amount.to_string(),
            transaction.suggested_category.name(),
            &transaction.source,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ParseReport) -> String {
    let mut output = String::new();

    let origin = match report.date_source {
        DateSource::Document => "from receipt",
        DateSource::Fallback => "fallback",
    };
    output.push_str(&format!("Date: {} ({})\n\n", report.date, origin));

    if report.transactions.is_empty() {
        output.push_str("No transactions found.\n");
        return output;
    }

    let width = report
        .transactions
        .iter()
        .map(|t| t.description.chars().count())
        .max()
        .unwrap_or(0);

    for transaction in &report.transactions {
        output.push_str(&format!(
            "  {:<width$}  {:>10}  {}\n",
            transaction.description,
            transaction.amount.to_string(),
            transaction.suggested_category,
            width = width
        ));
    }

    let credits = report.transactions.iter().filter(|t| t.is_credit()).count();
    output.push_str(&format!(
        "\n{} transactions (credits: {}), total {}\n",
        report.transactions.len(),
        credits,
        report_total(report)
    ));

    output
}

/// Sum of all transaction amounts in a report.
pub fn report_total(report: &ParseReport) -> Decimal {
    report.transactions.iter().map(|t| t.amount).sum()
}

/// Output path for `input` inside `output_dir`.
pub fn output_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("receipt");
    output_dir.join(format!("{}.{}", stem, format.extension()))
}
