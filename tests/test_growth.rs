mod common;

use common::make_rings;
use otoscan::analysis::growth::analyze_growth;
use otoscan::{AnalysisConfig, GrowthRate, PatternKind};

#[test]
fn fewer_than_two_rings_is_insufficient_data() {
    let config = AnalysisConfig::default();

    for rings in [make_rings(&[]), make_rings(&[12.0])] {
        let pattern = analyze_growth(&rings, &config);
        assert_eq!(pattern.growth_pattern, PatternKind::InsufficientData);
        assert_eq!(pattern.growth_rate, GrowthRate::Unknown);
        assert_eq!(pattern.average_ring_spacing, 0.0);
        assert_eq!(pattern.growth_consistency, 0.0);
        assert!(pattern.ring_spacings.is_empty());
    }
}

#[test]
fn even_spacing_is_consistent() {
    let config = AnalysisConfig::default();
    let rings = make_rings(&[10.0, 20.0, 30.0, 40.0]);

    let pattern = analyze_growth(&rings, &config);

    assert_eq!(pattern.growth_pattern, PatternKind::Consistent);
    assert!((pattern.average_ring_spacing - 10.0).abs() < 1e-9);
    assert!((pattern.growth_consistency - 100.0).abs() < 1e-9);
    assert_eq!(pattern.growth_rate, GrowthRate::Moderate);
    assert_eq!(pattern.ring_spacings, vec![10.0, 10.0, 10.0]);
}

#[test]
fn widening_spacing_is_accelerating() {
    let config = AnalysisConfig::default();
    // Spacings [5, 10, 15]: CV ~0.41, last > first * 1.5.
    let rings = make_rings(&[10.0, 15.0, 25.0, 40.0]);

    let pattern = analyze_growth(&rings, &config);

    assert_eq!(pattern.growth_pattern, PatternKind::Accelerating);
    assert_eq!(pattern.growth_rate, GrowthRate::Moderate);
    let expected_consistency = (1.0 - (50.0f64 / 3.0).sqrt() / 10.0) * 100.0;
    assert!((pattern.growth_consistency - expected_consistency).abs() < 1e-9);
}

#[test]
fn narrowing_spacing_is_decelerating() {
    let config = AnalysisConfig::default();
    // Spacings [15, 10, 5]: last < first * 0.7.
    let rings = make_rings(&[10.0, 25.0, 35.0, 40.0]);

    let pattern = analyze_growth(&rings, &config);

    assert_eq!(pattern.growth_pattern, PatternKind::Decelerating);
}

#[test]
fn irregular_spacing_without_trend_is_variable() {
    let config = AnalysisConfig::default();
    // Spacings [10, 4, 10]: CV ~0.35 but first and last match.
    let rings = make_rings(&[10.0, 20.0, 24.0, 34.0]);

    let pattern = analyze_growth(&rings, &config);

    assert_eq!(pattern.growth_pattern, PatternKind::Variable);
    assert_eq!(pattern.growth_rate, GrowthRate::Slow);
}

#[test]
fn wide_spacing_reads_as_fast_growth() {
    let config = AnalysisConfig::default();
    let rings = make_rings(&[10.0, 30.0, 50.0]);

    let pattern = analyze_growth(&rings, &config);

    assert_eq!(pattern.growth_pattern, PatternKind::Consistent);
    assert_eq!(pattern.growth_rate, GrowthRate::Fast);
    assert!((pattern.average_ring_spacing - 20.0).abs() < 1e-9);
}

#[test]
fn average_spacing_is_the_mean_of_consecutive_differences() {
    let config = AnalysisConfig::default();
    let rings = make_rings(&[10.0, 22.0, 30.0, 47.0]);

    let pattern = analyze_growth(&rings, &config);

    let expected = ((22.0 - 10.0) + (30.0 - 22.0) + (47.0 - 30.0)) / 3.0;
    assert!((pattern.average_ring_spacing - expected).abs() < 1e-9);
    assert_eq!(pattern.ring_spacings.len(), 3);
}
