//! buildsize - Build output size reporter.
//!
//! Usage:
//!   buildsize [PATH]                  Report sizes for a build directory (default: build)
//!   buildsize -t css                  Pick the largest .css file as the main bundle
//!   buildsize -o sizes.csv            Also append the report to a CSV ledger
//!   buildsize --format json           Print the report as JSON
//!   buildsize --help                  Show help

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::Section;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use buildsize_analyze::{BuildSizeAnalyzer, BuildSizeReport, DiskUsage};
use buildsize_core::ReportConfig;
use buildsize_export::CsvRecorder;

const HELP_HINT: &str = "Run `buildsize --help` to see usage and options";

#[derive(Parser)]
#[command(
    name = "buildsize",
    version,
    about = "Report the size of a build output directory",
    long_about = "buildsize reports the total size and file count of a build directory, \
                  plus the size of its main bundle (the largest file of a given type) \
                  before and after gzip and brotli compression.\n\n\
                  Use --output to append each report to a CSV file and track sizes over time."
)]
struct Cli {
    /// Build directory to analyze (defaults to `build`)
    path: Option<PathBuf>,

    /// Build directory to analyze (same as the positional PATH)
    #[arg(short, long = "path", value_name = "PATH", conflicts_with = "path")]
    path_flag: Option<PathBuf>,

    /// File type of the main bundle
    #[arg(short = 't', long, default_value = "js")]
    bundle_type: String,

    /// Decimal places in human-readable sizes
    #[arg(short, long, default_value = "2")]
    decimals: usize,

    /// Use base-2 units (1 KB = 1024 bytes)
    #[arg(short, long)]
    binary: bool,

    /// Append the report to this CSV file
    #[arg(short, long, value_name = "CSV")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Number of threads for scanning (0 = auto)
    #[arg(long, default_value = "0")]
    threads: usize,

    /// Show debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    run(cli).await.suggestion(HELP_HINT)
}

async fn run(cli: Cli) -> Result<()> {
    let build_path = cli
        .path_flag
        .or(cli.path)
        .unwrap_or_else(|| PathBuf::from("build"));

    let config = ReportConfig::builder()
        .build_path(build_path.clone())
        .bundle_type(cli.bundle_type)
        .threads(cli.threads)
        .build()
        .context("Invalid options")?;

    let report = BuildSizeAnalyzer::new()
        .compute(&config)
        .await
        .context("Failed to compute build sizes")?;

    match cli.format {
        OutputFormat::Text => print_report(&report, &build_path, cli.decimals, cli.binary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(output) = cli.output {
        CsvRecorder::new(&output)
            .append(&report)
            .await
            .with_context(|| format!("Failed to write {}", output.display()))?;
        eprintln!("Appended report to {}", output.display());
    }

    Ok(())
}

/// Install the tracing subscriber.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("buildsize=debug")
    } else if quiet {
        EnvFilter::new("buildsize=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("buildsize=warn"))
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Print the report summary.
fn print_report(report: &BuildSizeReport, build_path: &Path, decimals: usize, binary: bool) {
    let size = |bytes: u64| format_size(bytes, decimals, binary);
    let on_disk = format_disk_usage(report.build_size_on_disk, decimals, binary);

    println!();
    println!("{}", "─".repeat(50));
    println!(" {}", build_path.display());
    println!("{}", "─".repeat(50));
    println!();
    println!(" Main bundle          {}", report.main_bundle_name);
    println!("   Size               {}", size(report.main_bundle_size));
    println!("   Gzip               {}", size(report.main_bundle_size_gzip));
    println!("   Brotli             {}", size(report.main_bundle_size_brotli));
    println!();
    println!(" Build size           {}", size(report.build_size));
    println!(" Build size on disk   {on_disk}");
    println!(" Build file count     {}", report.build_file_count);
    println!();
}

/// Format an on-disk size, keeping `NaN` when the host cannot measure it.
fn format_disk_usage(usage: DiskUsage, decimals: usize, binary: bool) -> String {
    usage
        .bytes()
        .map_or_else(|| usage.to_string(), |bytes| format_size(bytes, decimals, binary))
}

/// Format size in human-readable form.
fn format_size(bytes: u64, decimals: usize, binary: bool) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = if binary {
        humansize::WINDOWS
    } else {
        humansize::DECIMAL
    };
    humansize::format_size(bytes, base.decimal_places(decimals))
}
