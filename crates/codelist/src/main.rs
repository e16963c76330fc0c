use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use codelist::constants::DEFAULT_CONFIG_PATH;
use codelist::{
    CodeRange, CodeSummary, Config, OutputFormat, RangeReport, compress, export_to_path,
    read_codes_json, write_ranges,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compress a statistical code list into integer ranges", long_about = None)]
struct Args {
    /// Configuration file path (config/default.toml is used when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SDMX-JSON code list file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Missing codes allowed inside one range
    #[arg(short, long, allow_negative_numbers = true)]
    tolerance: Option<i64>,

    /// Output format: ellipsis, compact, json or csv
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Write ranges to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Which code list of the document to read
    #[arg(long)]
    codelist_index: Option<usize>,

    /// Log the distance between every pair of consecutive ranges
    #[arg(long)]
    stats: bool,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
            Config::load_from_file(Path::new(DEFAULT_CONFIG_PATH))?
        }
        None => {
            debug!("No configuration file, using defaults");
            Config::default()
        }
    };
    apply_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(input) = &args.input {
        config.input.path = input.clone();
    }
    if let Some(index) = args.codelist_index {
        config.input.codelist_index = index;
    }
    if let Some(tolerance) = args.tolerance {
        config.compress.gap_tolerance = tolerance;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(output) = &args.output {
        config.output.path = Some(output.clone());
    }
}

/// Reads, compresses, reports and writes out one code list
fn run(config: &Config, log_gaps: bool) -> Result<Vec<CodeRange>> {
    info!("Input: {}", config.input.path.display());
    info!("Gap tolerance: {}", config.compress.gap_tolerance);

    let codes = read_codes_json(&config.input.path, &config.reader_options()).with_context(|| {
        format!(
            "Failed to read code list from {}",
            config.input.path.display()
        )
    })?;

    match CodeSummary::from_codes(&codes) {
        Some(summary) => info!(
            "Loaded {} unique codes (min {}, max {})",
            summary.count, summary.min, summary.max
        ),
        None => warn!("Code list is empty"),
    }

    let ranges = compress(codes, config.compress.gap_tolerance)?;

    let report = RangeReport::from_ranges(&ranges);
    info!(
        "Compressed into {} ranges ({} singletons, {} integers spanned)",
        report.range_count, report.singleton_count, report.covered
    );
    if let Some(max_gap) = report.max_gap() {
        info!("Largest gap between ranges: {max_gap}");
    }
    if log_gaps {
        for (i, gap) in report.gaps.iter().enumerate() {
            info!("gap {} -> {}: {}", i, i + 1, gap);
        }
    }

    match &config.output.path {
        Some(path) => {
            export_to_path(&ranges, config.output.format, path)
                .with_context(|| format!("Failed to export ranges to {}", path.display()))?;
            info!("Ranges saved to: {}", path.display());
        }
        None => write_ranges(std::io::stdout().lock(), &ranges, config.output.format)?,
    }

    Ok(ranges)
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let config = load_config(&args)?;
    run(&config, args.stats)?;
    Ok(())
}
