use crate::config::AnalysisConfig;
use crate::models::{DetectedRing, ImageDimensions, OtolithOutline};

/// Additive image/ring/shape quality score, clamped to [0, 100].
pub fn confidence_score(
    dimensions: &ImageDimensions,
    detected: &[DetectedRing],
    outline: &OtolithOutline,
    config: &AnalysisConfig,
) -> f64 {
    let mut score = 0.0;

    if dimensions.width >= config.high_res_size && dimensions.height >= config.high_res_size {
        score += 20.0;
    } else if dimensions.width >= config.low_res_size && dimensions.height >= config.low_res_size {
        score += 10.0;
    }

    score += (detected.len() as f64 * 5.0).min(30.0);

    if has_distinct_rings(detected) {
        score += 20.0;
    }

    if outline.area > config.strong_outline_area {
        score += 15.0;
    }

    let (band_low, band_high) = config.circularity_band;
    if outline.circularity > band_low && outline.circularity < band_high {
        score += 10.0;
    }

    score.clamp(0.0, 100.0)
}

/// Strictly increasing radii. The sort upstream guarantees the order;
/// this checks that no two rings collapsed onto the same radius.
fn has_distinct_rings(detected: &[DetectedRing]) -> bool {
    detected.len() >= 2 && detected.windows(2).all(|w| w[1].radius > w[0].radius)
}

pub fn analysis_score(confidence: f64, config: &AnalysisConfig) -> f64 {
    (confidence * config.analysis_score_factor).min(100.0)
}

/// Actionable advice for weak signals, in a fixed order. Every check is
/// independent; when none fire, a single affirmative message is returned.
pub fn recommend(
    confidence: f64,
    detected: &[DetectedRing],
    outline: &OtolithOutline,
    config: &AnalysisConfig,
) -> Vec<String> {
    let mut advice = Vec::new();

    if confidence < config.low_confidence {
        advice.push("Consider higher resolution imaging for better ring detection".to_string());
    }
    if detected.len() < config.min_confident_rings {
        advice.push("Few rings detected - verify the image shows a clear cross-section".to_string());
    }
    if outline.circularity < config.circularity_band.0 {
        advice.push("Otolith shape appears irregular - verify sectioning technique".to_string());
    }
    if outline.area < config.min_outline_area {
        advice.push("Otolith appears small in the image - use higher magnification".to_string());
    }

    if advice.is_empty() {
        advice.push("Analysis completed successfully - results appear reliable".to_string());
    }
    advice
}
