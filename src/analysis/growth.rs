use crate::analysis::{rings, stats};
use crate::config::AnalysisConfig;
use crate::models::{DetectedRing, GrowthPattern, GrowthRate, PatternKind};

/// Classify the trend and consistency of ring spacing.
///
/// Needs at least two rings; otherwise every derived field is
/// zero/unknown. Classification order: consistent (low CV), then
/// accelerating/decelerating by comparing the last spacing against the
/// first, variable otherwise.
pub fn analyze_growth(detected: &[DetectedRing], config: &AnalysisConfig) -> GrowthPattern {
    if detected.len() < 2 {
        return GrowthPattern::insufficient_data();
    }

    let spacings = rings::spacings(detected);
    let average = stats::mean(&spacings);
    let deviation = stats::population_std_dev(&spacings);

    let (pattern, consistency) = if average <= f64::EPSILON {
        // Coincident radii carry no usable trend.
        (PatternKind::Variable, 0.0)
    } else {
        let cv = deviation / average;
        let first = spacings[0];
        let last = spacings[spacings.len() - 1];
        let kind = if cv < config.pattern_cv_limit {
            PatternKind::Consistent
        } else if last > first * config.accelerating_factor {
            PatternKind::Accelerating
        } else if last < first * config.decelerating_factor {
            PatternKind::Decelerating
        } else {
            PatternKind::Variable
        };
        (kind, (1.0 - cv).clamp(0.0, 1.0) * 100.0)
    };

    let rate = if average > config.fast_spacing {
        GrowthRate::Fast
    } else if average > config.moderate_spacing {
        GrowthRate::Moderate
    } else {
        GrowthRate::Slow
    };

    GrowthPattern {
        growth_pattern: pattern,
        average_ring_spacing: average,
        growth_rate: rate,
        growth_consistency: consistency,
        ring_spacings: spacings,
    }
}
