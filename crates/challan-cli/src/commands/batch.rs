//! Batch command - process many challan PDFs into one report.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use challan_core::models::config::ChallanConfig;
use challan_core::report::ReportBuilder;

use super::process::{print_warnings, process_document};
use crate::report_out;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output report path (default: PF_Monthwise_Report_<timestamp>.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: ReportFormat,

    /// Print per-field extraction warnings for every document
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportFormat {
    /// XLSX report with title row
    Xlsx,
    /// CSV report
    Csv,
    /// JSON report
    Json,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        ChallanConfig::from_file(std::path::Path::new(path))?
    } else {
        ChallanConfig::default()
    };

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Documents are independent; one failure only costs that document
    let mut builder = ReportBuilder::new();
    for path in &files {
        let source = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("challan.pdf")
            .to_string();

        match process_document(path, &config) {
            Ok(results) => {
                if args.show_warnings {
                    print_warnings(&source, &results);
                }
                builder.add_document(&source, results.into_iter().map(|r| r.record).collect());
            }
            Err(e) => {
                warn!("failed to process {}: {}", path.display(), e);
                builder.add_failure();
            }
        }

        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    let report = builder.finish();

    if report.is_empty() {
        anyhow::bail!(
            "No challan data found across {} document(s)",
            report.documents_processed
        );
    }

    let output = args.output.clone().unwrap_or_else(|| {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let extension = match args.format {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        };
        PathBuf::from(format!("PF_Monthwise_Report_{stamp}.{extension}"))
    });

    match args.format {
        ReportFormat::Xlsx => report_out::write_xlsx(&output, &report, &config.report)?,
        ReportFormat::Csv => report_out::write_csv(&output, &report, config.report.variant)?,
        ReportFormat::Json => std::fs::write(&output, serde_json::to_string_pretty(&report)?)?,
    }

    println!();
    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        report.documents_processed,
        start.elapsed()
    );
    println!(
        "   {} records extracted, {} documents failed",
        style(report.len()).green(),
        if report.documents_failed > 0 {
            style(report.documents_failed).red()
        } else {
            style(report.documents_failed).green()
        }
    );
    println!(
        "{} Report written to {}",
        style("✓").green(),
        output.display()
    );

    Ok(())
}
