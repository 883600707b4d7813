use anyhow::{Context, Result};
use boxfit::{
    format_file_size, image_format_to_string, BatchProcessor, BatchReport, Cli, Commands, Loader,
    MetadataProcessor,
};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Run(args) => {
            let processor = BatchProcessor::new(args.into_config())?;
            let report = processor.run().context("batch run failed")?;
            print_summary(&report);
            if report.failure_count() > 0 {
                return Ok(ExitCode::from(2));
            }
        }
        Commands::Measure(args) => {
            let processor = BatchProcessor::new(args.into_config())?;
            let measured = processor.measure().context("measurement failed")?;
            let canvas = measured.canvas;

            println!(
                "Measured {} of {} images",
                measured.report.measured, measured.report.discovered
            );
            println!("Sorted widths:  {:?}", measured.distribution.widths());
            println!("Sorted heights: {:?}", measured.distribution.heights());
            println!("Inner canvas: {} x {}", canvas.inner_width, canvas.inner_height);
            println!("Outer canvas: {} x {}", canvas.outer_width, canvas.outer_height);
            for (path, reason) in &measured.report.trim_failures {
                println!("  trim failed: {}: {}", path.display(), reason);
            }
        }
        Commands::Info { input } => {
            process_info(input)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(report: &BatchReport) {
    println!("=== Batch Summary ===");
    if let Some(canvas) = report.canvas {
        println!("Canvas: {} x {}", canvas.outer_width, canvas.outer_height);
    }
    println!("Discovered: {}", report.discovered);
    println!("Measured: {}", report.measured);
    println!("Written: {}", report.written.len());
    println!("Metadata stripped: {}", report.profiles_stripped);

    let sections = [
        ("Rasterize failures", &report.discovery_failures),
        ("Skipped duplicates", &report.skipped),
        ("Trim failures (normalized untrimmed)", &report.trim_failures),
        ("Write failures", &report.write_failures),
    ];
    for (label, failures) in sections {
        if failures.is_empty() {
            continue;
        }
        println!("{}: {}", label, failures.len());
        for (path, reason) in failures {
            println!("  {}: {}", path.display(), reason);
        }
    }
}

fn process_info(input: PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("File does not exist: {}", input.display());
    }

    let file_size = std::fs::metadata(&input)?.len();
    let loader = Loader::new();
    let (width, height, format) = loader
        .dimensions_and_format(&input)
        .with_context(|| format!("cannot read {}", input.display()))?;
    let loaded = loader.load(&input)?;
    let metadata = MetadataProcessor::new();

    println!("=== Image Information ===");
    println!("File: {}", input.display());
    println!("Size: {}", format_file_size(file_size));
    println!("Dimensions: {} x {} pixels", width, height);
    println!("Format: {}", image_format_to_string(format));
    println!("Color: {:?}", loaded.image.color());
    println!(
        "Colour profile: {}",
        loaded
            .icc_profile
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| format!("{} bytes", p.len()))
    );

    println!("Has EXIF metadata: {}", metadata.read_exif(&input).is_some());
    for (tag, value) in metadata.describe(&input)? {
        println!("  {}: {}", tag, value);
    }

    Ok(())
}
