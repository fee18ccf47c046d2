use clap::Parser;
use std::path::PathBuf;

use otoscan::Analyzer;

#[derive(Parser)]
#[command(name = "otoscan")]
#[command(about = "Estimate fish age from otolith growth-ring images")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the full analysis record as JSON
    #[arg(long)]
    json: bool,

    /// Save intermediate stage images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if args.verbose {
        println!("Loading image: {:?}", args.image_path);
    }
    let bytes = std::fs::read(&args.image_path)?;
    let filename = args
        .image_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown");

    let mut analyzer = Analyzer::new().with_verbose(args.verbose);
    if let Some(debug_dir) = args.debug_out {
        analyzer = analyzer.with_debug(debug_dir)?;
    }

    let result = analyzer.analyze(&bytes, filename);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("\n=== Otolith Analysis Results ===");
    if let Some(error) = &result.error {
        println!("Analysis failed: {}", error);
        for line in &result.recommendations {
            println!("  - {}", line);
        }
        return Ok(());
    }

    println!("File: {}", result.filename);
    println!(
        "Image: {}x{}",
        result.image_dimensions.width, result.image_dimensions.height
    );
    if result.age_low == result.age_high {
        println!("Estimated age: {} years", result.estimated_age);
    } else {
        println!(
            "Estimated age: {} years (range {}-{})",
            result.estimated_age, result.age_low, result.age_high
        );
    }
    println!("Rings detected: {}", result.growth_rings.count);
    if result.growth_rings.count > 1 {
        println!(
            "Average ring spacing: {:.1} px",
            result.growth_rings.ring_spacing
        );
    }
    println!(
        "Growth pattern: {} ({} growth, {:.0}% consistent)",
        result.growth_analysis.growth_pattern.as_str(),
        result.growth_analysis.growth_rate.as_str(),
        result.growth_analysis.growth_consistency
    );
    if !result.measurements.is_empty() {
        println!(
            "Outline: area {:.0} px², axes {:.0}x{:.0}, circularity {:.2}",
            result.measurements.area,
            result.measurements.major_axis,
            result.measurements.minor_axis,
            result.measurements.circularity
        );
    }
    println!(
        "Confidence: {:.1}/100 (analysis score {:.1})",
        result.confidence_score, result.analysis_score
    );
    println!("\nRecommendations:");
    for line in &result.recommendations {
        println!("  - {}", line);
    }

    Ok(())
}
