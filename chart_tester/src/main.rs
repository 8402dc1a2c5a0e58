use anyhow::Context;
use clap::Parser;
use crochet_chart::core_modules::utils::image_helper::image_helper;
use crochet_chart::core_modules::spiral::SpiralTraversal;
use crochet_chart::parallel_pipeline::{ParallelConfig, pixelate_variants};
use crochet_chart::pipeline::{
    ChartConfig, ChartPipeline, DEFAULT_BLOCK_SIZE, DEFAULT_PATTERN_NAME, Region,
};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "chart_tester")]
#[command(about = "Pixelate an image and chart it as a corner-to-corner crochet pattern")]
struct Args {
    /// Block size in pixels: more size, more pixelated
    #[arg(short = 'p', long, default_value_t = DEFAULT_BLOCK_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pixel_size: u32,

    /// Pattern name
    #[arg(short = 'n', long, default_value = DEFAULT_PATTERN_NAME)]
    name: String,

    /// Input image path
    #[arg(short, long, default_value = "pika.png")]
    input: PathBuf,

    /// Output path for the arithmetic-mean pixelation
    #[arg(long, default_value = "pixelPika1.png")]
    arithmetic_output: PathBuf,

    /// Output path for the quadratic-mean pixelation
    #[arg(long, default_value = "pixelPika2.png")]
    quadratic_output: PathBuf,

    /// Number of pixelation workers (defaults to the number of CPUs)
    #[arg(short, long)]
    workers: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // --- 1. Argument Parsing & Setup ---
    let args = Args::parse();
    let parallel = match args.workers {
        Some(workers) => ParallelConfig { workers },
        None => ParallelConfig::default(),
    };

    // --- 2. Image Loading ---
    let image = image_helper::load(&args.input)
        .with_context(|| format!("Problem opening image {}", args.input.display()))?;
    info!(
        "loaded {} ({}x{})",
        args.input.display(),
        image.width(),
        image.height()
    );

    // --- 3. Pixelation, both averaging modes ---
    let (arithmetic, quadratic) = pixelate_variants(Arc::new(image), args.pixel_size, &parallel)
        .await
        .context("Problem pixelating image")?;
    image_helper::save(&args.arithmetic_output, &arithmetic)
        .with_context(|| format!("Problem saving {}", args.arithmetic_output.display()))?;
    image_helper::save(&args.quadratic_output, &quadratic)
        .with_context(|| format!("Problem saving {}", args.quadratic_output.display()))?;
    info!(
        "saved {} and {}",
        args.arithmetic_output.display(),
        args.quadratic_output.display()
    );

    // --- 4. Charting the arithmetic variant ---
    let pipeline = ChartPipeline::new(ChartConfig {
        block_size: args.pixel_size,
        pattern_name: args.name,
        ..ChartConfig::default()
    })?;
    print_instructions(&pipeline, arithmetic)?;

    Ok(())
}

/// Prints the chart corners, every row of the increase phase and the color counts.
fn print_instructions(pipeline: &ChartPipeline, pixelated: image::RgbaImage) -> anyhow::Result<()> {
    let bounds = Region::from_dimensions(pixelated.width(), pixelated.height())
        .context("Pixelated image is empty")?;
    let traversal = SpiralTraversal::new(bounds, pipeline.config().block_size)?;
    let (start, middle, end) = (traversal.start(), traversal.middle(), traversal.end());
    println!("start (x, y): ({}, {})", start.x, start.y);
    println!("middle (x, y): ({}, {})", middle.x, middle.y);
    println!("end (x, y): ({}, {})", end.x, end.y);

    let report = pipeline
        .report_from_pixelated(pixelated)
        .context("Problem charting pattern")?;
    print!("{}", report.pattern);

    println!("Pattern Color Counts:");
    for (hex, count) in &report.color_counts {
        println!("  {hex}: {count}");
    }

    if let Err(error) = pipeline.closing_rows(&report) {
        warn!("{error}");
        println!("instructions in progress...");
    }
    Ok(())
}
