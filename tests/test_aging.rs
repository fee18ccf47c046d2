mod common;

use common::make_rings;
use otoscan::analysis::aging::estimate_age;
use otoscan::{AnalysisConfig, OtolithOutline};

#[test]
fn evenly_spaced_rings_give_exact_ring_count_age() {
    let config = AnalysisConfig::default();
    let rings = make_rings(&[10.0, 20.0, 30.0, 40.0]);

    let estimate = estimate_age(&rings, &OtolithOutline::empty(), &config);

    assert_eq!(estimate.age, 4);
    assert_eq!(estimate.age_low, 4);
    assert_eq!(estimate.age_high, 4);
}

#[test]
fn no_rings_falls_back_to_outline_size() {
    let config = AnalysisConfig::default();
    let outline = OtolithOutline {
        major_axis: 120.0,
        ..OtolithOutline::empty()
    };

    let estimate = estimate_age(&[], &outline, &config);

    // max(1, round(120 / 50)) = 2
    assert_eq!(estimate.age, 2);
    assert_eq!(estimate.age_low, 2);
    assert_eq!(estimate.age_high, 2);
}

#[test]
fn no_rings_and_no_outline_still_gives_age_one() {
    let config = AnalysisConfig::default();

    let estimate = estimate_age(&[], &OtolithOutline::empty(), &config);

    assert_eq!(estimate.age, 1);
}

#[test]
fn inconsistent_spacing_widens_the_band_deterministically() {
    let config = AnalysisConfig::default();
    // Spacings [3, 22, 3]: CV well above the 0.3 limit.
    let rings = make_rings(&[5.0, 8.0, 30.0, 33.0]);

    let first = estimate_age(&rings, &OtolithOutline::empty(), &config);
    let second = estimate_age(&rings, &OtolithOutline::empty(), &config);

    assert_eq!(first.age, 4);
    assert_eq!(first.age_low, 3);
    assert_eq!(first.age_high, 5);
    assert_eq!(first, second);
}

#[test]
fn single_ring_counts_as_one_year() {
    let config = AnalysisConfig::default();
    let rings = make_rings(&[15.0]);

    let estimate = estimate_age(&rings, &OtolithOutline::empty(), &config);

    assert_eq!(estimate.age, 1);
    assert_eq!(estimate.age_low, 1);
}

#[test]
fn band_never_drops_below_one() {
    // A zero CV limit forces the banded path even for two rings.
    let strict = AnalysisConfig {
        spacing_cv_limit: 0.0,
        ..AnalysisConfig::default()
    };
    let rings = make_rings(&[10.0, 20.0]);

    let estimate = estimate_age(&rings, &OtolithOutline::empty(), &strict);

    assert_eq!(estimate.age, 2);
    assert!(estimate.age_low >= 1);
    assert_eq!(estimate.age_high, 3);
}
