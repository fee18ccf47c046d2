use crate::analysis::{rings, stats};
use crate::config::AnalysisConfig;
use crate::models::{AgeEstimate, DetectedRing, OtolithOutline};

/// Estimate age from the ring count, falling back to outline size when no
/// rings are visible.
///
/// Each ring approximates one growth year, so the base age is the ring
/// count. When the ring spacing is consistent (coefficient of variation
/// below the configured limit) the estimate is exact; inconsistent
/// spacing keeps the point estimate but widens the uncertainty band by
/// one year on each side. The estimate is never below 1.
pub fn estimate_age(
    detected: &[DetectedRing],
    outline: &OtolithOutline,
    config: &AnalysisConfig,
) -> AgeEstimate {
    if detected.is_empty() {
        let by_size = (outline.major_axis / config.size_age_divisor).round() as i64;
        return AgeEstimate::exact(by_size.max(1) as u32);
    }

    let base = detected.len() as u32;
    let spacings = rings::spacings(detected);
    if spacing_variation(&spacings) < config.spacing_cv_limit {
        AgeEstimate::exact(base)
    } else {
        AgeEstimate::banded(base)
    }
}

/// Coefficient of variation of the spacing list. Degenerate lists (empty,
/// or all-zero spacing) count as perfectly consistent.
fn spacing_variation(spacings: &[f64]) -> f64 {
    let m = stats::mean(spacings);
    if m <= f64::EPSILON {
        return 0.0;
    }
    stats::population_std_dev(spacings) / m
}
