//! Process command - extract a challan report from a single PDF.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tempfile::NamedTempFile;
use tracing::debug;

use challan_core::challan::ExtractionResult;
use challan_core::models::config::ChallanConfig;
use challan_core::report::{ChallanReport, ReportBuilder};

use crate::report_out;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input challan PDF, or "-" to read from stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout; xlsx defaults to report.xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print per-field extraction warnings
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    Text,
    /// JSON report
    Json,
    /// CSV report
    Csv,
    /// XLSX report with title row
    Xlsx,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // Load configuration
    let config = if let Some(path) = config_path {
        ChallanConfig::from_file(Path::new(path))?
    } else {
        ChallanConfig::default()
    };

    let (path, source_name, _staged) = resolve_input(&args.input)?;

    let results = process_document(&path, &config)?;

    if args.show_warnings {
        print_warnings(&source_name, &results);
    }

    let mut builder = ReportBuilder::new();
    builder.add_document(
        &source_name,
        results.into_iter().map(|r| r.record).collect(),
    );
    let report = builder.finish();

    if report.is_empty() {
        anyhow::bail!("No challan data found in {}", source_name);
    }

    write_report(&report, &config, args.format, args.output.as_deref())?;

    println!(
        "{} {} challan(s) extracted from {}",
        style("✓").green(),
        report.len(),
        source_name
    );

    Ok(())
}

/// Resolve the input argument to a readable path. Stdin is staged through a
/// named temp file whose `Drop` removes it on every exit path, extraction
/// failure included.
fn resolve_input(input: &Path) -> anyhow::Result<(PathBuf, String, Option<NamedTempFile>)> {
    if input.as_os_str() == "-" {
        let mut staged = NamedTempFile::new()?;
        io::copy(&mut io::stdin().lock(), &mut staged)?;
        debug!("staged stdin to {}", staged.path().display());
        return Ok((staged.path().to_path_buf(), "stdin".to_string(), Some(staged)));
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let name = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("input.pdf")
        .to_string();

    Ok((input.to_path_buf(), name, None))
}

/// Run one document through text extraction, segmentation, and parsing.
pub(crate) fn process_document(
    path: &Path,
    config: &ChallanConfig,
) -> anyhow::Result<Vec<ExtractionResult>> {
    let data = fs::read(path)?;
    let results = challan_core::process_bytes(&data, config)?;
    debug!("{}: {} challan segment(s)", path.display(), results.len());
    Ok(results)
}

pub(crate) fn print_warnings(source: &str, results: &[ExtractionResult]) {
    for (i, result) in results.iter().enumerate() {
        for warning in &result.warnings {
            eprintln!(
                "{} {} challan {}: {}",
                style("!").yellow(),
                source,
                i + 1,
                warning
            );
        }
    }
}

fn write_report(
    report: &ChallanReport,
    config: &ChallanConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    if let OutputFormat::Xlsx = format {
        let path = output.unwrap_or(Path::new("report.xlsx"));
        report_out::write_xlsx(path, report, &config.report)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            path.display()
        );
        return Ok(());
    }

    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Csv => report_out::to_csv_string(report, config.report.variant)?,
        OutputFormat::Text | OutputFormat::Xlsx => report_out::format_text(report),
    };

    match output {
        Some(path) => {
            fs::write(path, content)?;
            println!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", content),
    }

    Ok(())
}
