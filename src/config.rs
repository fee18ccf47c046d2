/// All tunable thresholds of the analysis pipeline in one place.
///
/// The defaults reproduce the behavior documented per stage; construct
/// with `AnalysisConfig::default()` and override individual fields to
/// tune a stage without touching algorithm code.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Contrast amplification bound for local histogram equalization (default: 3.0).
    pub clahe_clip_limit: f32,
    /// Tiles per image side for local contrast enhancement (default: 8).
    pub clahe_tile_grid: u32,
    /// Median filter radius before ring search; 2 gives a 5x5 window (default: 2).
    pub median_radius: u32,
    /// Canny high threshold for ring edge extraction; the low threshold
    /// is half of this (default: 50.0).
    pub edge_threshold: f32,
    /// Minimum Hough votes for a ring center or radius peak (default: 30).
    pub accumulator_threshold: u32,
    /// Minimum distance between accepted ring centers in pixels (default: 10.0).
    pub min_center_distance: f64,
    /// Smallest detectable ring radius in pixels; the largest is
    /// min(width, height) / 2 (default: 5).
    pub min_ring_radius: u32,
    /// Minimum boundary points required to fit an ellipse (default: 5).
    pub min_outline_points: usize,
    /// Pixels of major axis per estimated year when no rings are visible (default: 50.0).
    pub size_age_divisor: f64,
    /// Spacing coefficient of variation below which the ring-count age
    /// is taken as exact (default: 0.3).
    pub spacing_cv_limit: f64,
    /// Spacing CV below which the growth pattern is "consistent" (default: 0.2).
    pub pattern_cv_limit: f64,
    /// Last spacing must exceed first x this factor for "accelerating" (default: 1.5).
    pub accelerating_factor: f64,
    /// Last spacing must fall below first x this factor for "decelerating" (default: 0.7).
    pub decelerating_factor: f64,
    /// Average spacing above which growth rate is "fast" (default: 15.0).
    pub fast_spacing: f64,
    /// Average spacing above which growth rate is "moderate" (default: 8.0).
    pub moderate_spacing: f64,
    /// Both dimensions at or above this earn the full resolution bonus (default: 500).
    pub high_res_size: u32,
    /// Both dimensions at or above this earn the reduced resolution bonus (default: 200).
    pub low_res_size: u32,
    /// Fewer rings than this triggers the cross-section advisory (default: 3).
    pub min_confident_rings: usize,
    /// Outline area below this triggers the magnification advisory (default: 500.0).
    pub min_outline_area: f64,
    /// Outline area above this earns the shape-quality bonus (default: 1000.0).
    pub strong_outline_area: f64,
    /// Open circularity interval earning the shape bonus (default: (0.3, 0.8)).
    pub circularity_band: (f64, f64),
    /// Confidence below this triggers the resolution advisory (default: 50.0).
    pub low_confidence: f64,
    /// Multiplier from confidence to analysis score, capped at 100 (default: 1.2).
    pub analysis_score_factor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            clahe_clip_limit: 3.0,
            clahe_tile_grid: 8,
            median_radius: 2,
            edge_threshold: 50.0,
            accumulator_threshold: 30,
            min_center_distance: 10.0,
            min_ring_radius: 5,
            min_outline_points: 5,
            size_age_divisor: 50.0,
            spacing_cv_limit: 0.3,
            pattern_cv_limit: 0.2,
            accelerating_factor: 1.5,
            decelerating_factor: 0.7,
            fast_spacing: 15.0,
            moderate_spacing: 8.0,
            high_res_size: 500,
            low_res_size: 200,
            min_confident_rings: 3,
            min_outline_area: 500.0,
            strong_outline_area: 1000.0,
            circularity_band: (0.3, 0.8),
            low_confidence: 50.0,
            analysis_score_factor: 1.2,
        }
    }
}

impl AnalysisConfig {
    /// Largest ring radius searched for an image of the given size.
    pub fn max_ring_radius(&self, width: u32, height: u32) -> u32 {
        width.min(height) / 2
    }
}
