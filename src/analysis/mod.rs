pub mod aging;
pub mod growth;
pub mod outline;
pub mod preprocessing;
pub mod rings;
pub mod scoring;
mod stats;

use std::path::PathBuf;

use anyhow::Result;
use image::GrayImage;

use crate::config::AnalysisConfig;
use crate::models::{AnalysisResult, ImageDimensions, RingSummary};

/// Whether the runtime can actually process images, decided once at
/// construction.
enum PipelineMode {
    Full,
    Degraded(String),
}

/// Orchestrates the analysis stages over one image buffer.
///
/// Stateless between calls: each `analyze` decodes, measures, scores,
/// and drops every intermediate grid before returning, so one instance
/// may serve any number of concurrent callers.
pub struct Analyzer {
    config: AnalysisConfig,
    verbose: bool,
    debug_dir: Option<PathBuf>,
    mode: PipelineMode,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        let mode = if codec_support_available() {
            PipelineMode::Full
        } else {
            PipelineMode::Degraded("image codec support is unavailable in this runtime".to_string())
        };
        Self {
            config,
            verbose: false,
            debug_dir: None,
            mode,
        }
    }

    /// Force the degraded pipeline variant regardless of the probe.
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            config: AnalysisConfig::default(),
            verbose: false,
            debug_dir: None,
            mode: PipelineMode::Degraded(reason.into()),
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Save each intermediate stage grid into `output_dir`.
    /// The directory must be empty or non-existent.
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }
        self.debug_dir = Some(output_dir);
        Ok(self)
    }

    /// Run the full pipeline on one image buffer. Never fails: any stage
    /// error is folded into the result's `error` field with zero scores.
    pub fn analyze(&self, bytes: &[u8], filename: &str) -> AnalysisResult {
        match &self.mode {
            PipelineMode::Degraded(reason) => self.degraded_result(filename, reason),
            PipelineMode::Full => match self.run(bytes, filename) {
                Ok(result) => result,
                Err(err) => AnalysisResult::failure(filename, format!("{err:#}")),
            },
        }
    }

    fn run(&self, bytes: &[u8], filename: &str) -> Result<AnalysisResult> {
        let decoded = preprocessing::decode(bytes)?;
        let dimensions = ImageDimensions {
            width: decoded.width(),
            height: decoded.height(),
        };
        if self.verbose {
            println!("Image decoded: {}x{}", dimensions.width, dimensions.height);
        }

        let gray = preprocessing::to_grayscale(&decoded);
        self.dump_stage(1, "grayscale", &gray)?;

        if self.verbose {
            println!("Enhancing local contrast...");
        }
        let enhanced = preprocessing::enhance_local_contrast(
            &gray,
            self.config.clahe_clip_limit,
            self.config.clahe_tile_grid,
        );
        self.dump_stage(2, "enhanced", &enhanced)?;

        if self.verbose {
            println!("Searching for growth rings...");
        }
        let smoothed = rings::suppress_noise(&enhanced, self.config.median_radius);
        self.dump_stage(3, "median", &smoothed)?;
        let edges = rings::edge_map(&smoothed, &self.config);
        self.dump_stage(4, "edges", &edges)?;
        let detected = rings::detect_rings(&smoothed, &edges, &self.config);
        if self.verbose {
            println!("Found {} growth rings", detected.len());
        }

        if self.verbose {
            println!("Measuring otolith outline...");
        }
        let binary = outline::binarize(&gray);
        self.dump_stage(5, "binary", &binary)?;
        let measurements = outline::measure_from_binary(&binary, &self.config);

        let age = aging::estimate_age(&detected, &measurements, &self.config);
        let growth_analysis = growth::analyze_growth(&detected, &self.config);
        let confidence = scoring::confidence_score(
            &dimensions,
            &detected,
            &measurements,
            &self.config,
        );
        let recommendations = scoring::recommend(
            confidence,
            &detected,
            &measurements,
            &self.config,
        );
        if self.verbose {
            println!(
                "Estimated age: {} years (confidence {:.1}/100)",
                age.age, confidence
            );
        }

        Ok(AnalysisResult {
            filename: filename.to_string(),
            image_dimensions: dimensions,
            estimated_age: age.age,
            age_low: age.age_low,
            age_high: age.age_high,
            growth_rings: RingSummary::from_rings(detected),
            measurements,
            growth_analysis,
            confidence_score: confidence,
            analysis_score: scoring::analysis_score(confidence, &self.config),
            recommendations,
            error: None,
        })
    }

    fn degraded_result(&self, filename: &str, reason: &str) -> AnalysisResult {
        let mut result =
            AnalysisResult::failure(filename, format!("Analysis unavailable: {}", reason));
        result
            .recommendations
            .push("Image processing is unavailable - no measurements could be taken".to_string());
        result
    }

    fn dump_stage(&self, index: usize, name: &str, grid: &GrayImage) -> Result<()> {
        let Some(dir) = &self.debug_dir else {
            return Ok(());
        };
        let path = dir.join(format!("{:02}_{}.png", index, name));
        grid.save(&path)
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
        if self.verbose {
            println!("  Debug: saved {}", path.display());
        }
        Ok(())
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Probe the image stack by round-tripping a 1x1 grayscale PNG in memory.
fn codec_support_available() -> bool {
    let probe = image::DynamicImage::ImageLuma8(GrayImage::new(1, 1));
    let mut buffer = std::io::Cursor::new(Vec::new());
    probe.write_to(&mut buffer, image::ImageFormat::Png).is_ok()
        && image::load_from_memory(buffer.get_ref()).is_ok()
}
