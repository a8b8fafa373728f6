//! Dataset preparation CLI tool
//!
//! Command-line interface over the structure validator and the image
//! normalizer.

use crate::{
    config::{ColorDepth, ContainerFormat, NormalizationConfig},
    normalizer::{ImageNormalizer, NormalizationSummary},
    services::ProgressReporter,
    tracing_config::{TracingConfig, TracingFormat},
    validator::{StructureReport, StructureValidator},
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Dataset preparation tool: normalize image trees and check split structure
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "dataset-prep")]
pub struct Cli {
    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Normalize an arbitrary image tree into a canonical dataset tree
    Normalize {
        /// Source directory of heterogeneous images
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Destination root for the canonical tree
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Output width in pixels
        #[arg(long, default_value_t = 64)]
        width: u32,

        /// Output height in pixels
        #[arg(long, default_value_t = 64)]
        height: u32,

        /// Output container format
        #[arg(short, long, value_enum, default_value_t = CliContainerFormat::Bmp)]
        format: CliContainerFormat,

        /// Render single-channel grayscale instead of 3-channel RGB
        #[arg(long)]
        grayscale: bool,

        /// Write the run summary as JSON to this path
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },

    /// Check that the train and test splits share one label taxonomy
    Check {
        /// Train split root (labels as subdirectories)
        #[arg(value_name = "TRAIN")]
        train: PathBuf,

        /// Test split root (labels as subdirectories)
        #[arg(value_name = "TEST")]
        test: PathBuf,

        /// Write the structure report as JSON to this path
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliContainerFormat {
    Bmp,
    Png,
    Jpeg,
}

impl From<CliContainerFormat> for ContainerFormat {
    fn from(format: CliContainerFormat) -> Self {
        match format {
            CliContainerFormat::Bmp => Self::Bmp,
            CliContainerFormat::Png => Self::Png,
            CliContainerFormat::Jpeg => Self::Jpeg,
        }
    }
}

/// JSON envelope written by `--report` for normalization runs
#[derive(Serialize)]
struct NormalizeReport<'a> {
    generated_at: chrono::DateTime<chrono::Utc>,
    config: &'a NormalizationConfig,
    summary: &'a NormalizationSummary,
}

/// JSON envelope written by `--report` for structure checks
#[derive(Serialize)]
struct CheckReport<'a> {
    generated_at: chrono::DateTime<chrono::Utc>,
    consistent: bool,
    structure: &'a StructureReport,
}

/// Progress bar reporter driven by per-file normalizer callbacks
struct BarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn file_converted(&self, _input: &Path, output: &Path) {
        self.bar.set_message(format!("{}", output.display()));
        self.bar.inc(1);
    }

    fn file_skipped(&self, input: &Path, _reason: &str) {
        self.bar.set_message(format!("skipped {}", input.display()));
        self.bar.inc(1);
    }
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose).context("Failed to initialize tracing")?;

    match cli.command {
        Command::Normalize {
            input,
            output,
            width,
            height,
            format,
            grayscale,
            report,
        } => run_normalize(
            &input,
            &output,
            width,
            height,
            format.into(),
            grayscale,
            report.as_deref(),
        ),
        Command::Check {
            train,
            test,
            report,
        } => run_check(&train, &test, report.as_deref()),
    }
}

/// Initialize tracing based on verbosity level
fn init_tracing(verbose_count: u8) -> Result<()> {
    TracingConfig::new()
        .with_verbosity(verbose_count)
        .with_format(TracingFormat::Console)
        .init()
        .context("Failed to initialize tracing subscriber")?;

    if verbose_count > 0 {
        tracing::debug!(verbosity = verbose_count, "Tracing initialized");
    }

    Ok(())
}

fn run_normalize(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
    format: ContainerFormat,
    grayscale: bool,
    report: Option<&Path>,
) -> Result<()> {
    let config = NormalizationConfig::builder()
        .target_width(width)
        .target_height(height)
        .color_depth(if grayscale {
            ColorDepth::Luma8
        } else {
            ColorDepth::Rgb8
        })
        .container_format(format)
        .build()
        .context("Invalid normalization configuration")?;

    info!(
        "Normalizing {} -> {} ({}x{} {} {})",
        input.display(),
        output.display(),
        config.target_width,
        config.target_height,
        config.color_depth,
        config.container_format
    );

    let total_files = count_files(input);
    let bar = ProgressBar::new(total_files);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let normalizer = ImageNormalizer::with_reporter(config, Box::new(BarReporter { bar: bar.clone() }));

    let start_time = Instant::now();
    let summary = normalizer
        .normalize_tree(input, output)
        .context("Normalization failed")?;
    bar.finish_and_clear();

    println!(
        "Converted {} image(s), skipped {} in {:.2}s",
        summary.converted,
        summary.skipped.len(),
        start_time.elapsed().as_secs_f64()
    );
    for skipped in &summary.skipped {
        println!("  skipped {}: {}", skipped.path.display(), skipped.reason);
    }

    if let Some(report_path) = report {
        write_report(
            report_path,
            &NormalizeReport {
                generated_at: chrono::Utc::now(),
                config: &config,
                summary: &summary,
            },
        )?;
    }

    Ok(())
}

fn run_check(train: &Path, test: &Path, report: Option<&Path>) -> Result<()> {
    let structure = StructureValidator::validate(train, test)
        .context("Structure validation failed")?;

    println!("Train labels: {:?}", structure.train_labels);
    println!("Test labels:  {:?}", structure.test_labels);

    if !structure.only_in_test.is_empty() {
        println!("Test split contains labels missing from train:");
        for label in &structure.only_in_test {
            println!("  - {label}");
        }
    }
    if !structure.only_in_train.is_empty() {
        println!("Train split contains labels missing from test:");
        for label in &structure.only_in_train {
            println!("  - {label}");
        }
    }
    if structure.is_consistent() {
        println!("Structure OK: identical label sets in train and test.");
    }

    if let Some(report_path) = report {
        write_report(
            report_path,
            &CheckReport {
                generated_at: chrono::Utc::now(),
                consistent: structure.is_consistent(),
                structure: &structure,
            },
        )?;
    }

    // Label asymmetry is diagnostic only; the process still exits cleanly
    Ok(())
}

/// Count leaf files under a root for progress bar sizing
fn count_files(root: &Path) -> u64 {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .count() as u64
}

/// Serialize a report value as pretty JSON at the given path
fn write_report<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    info!("Report written to {}", path.display());
    Ok(())
}
