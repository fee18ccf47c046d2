use serde::Serialize;

/// A single circular growth ring found in the otolith image.
#[derive(Debug, Clone, Serialize)]
pub struct DetectedRing {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub area: f64,
}

impl DetectedRing {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius,
            area: std::f64::consts::PI * radius * radius,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutlineCenter {
    pub x: f64,
    pub y: f64,
}

/// Morphometrics of the otolith boundary. The all-zero value means
/// "no usable outline found" and is a valid result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OtolithOutline {
    pub area: f64,
    pub perimeter: f64,
    pub major_axis: f64,
    pub minor_axis: f64,
    pub aspect_ratio: f64,
    pub circularity: f64,
    pub center: OutlineCenter,
    pub orientation: f64,
}

impl OtolithOutline {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.area == 0.0 && self.perimeter == 0.0
    }
}

/// Trend of the ring-to-ring spacing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    InsufficientData,
    Consistent,
    Accelerating,
    Decelerating,
    Variable,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::InsufficientData => "insufficient_data",
            PatternKind::Consistent => "consistent",
            PatternKind::Accelerating => "accelerating",
            PatternKind::Decelerating => "decelerating",
            PatternKind::Variable => "variable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthRate {
    Slow,
    Moderate,
    Fast,
    Unknown,
}

impl GrowthRate {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthRate::Slow => "slow",
            GrowthRate::Moderate => "moderate",
            GrowthRate::Fast => "fast",
            GrowthRate::Unknown => "unknown",
        }
    }
}

/// Classification of the ring spacing sequence.
#[derive(Debug, Clone, Serialize)]
pub struct GrowthPattern {
    pub growth_pattern: PatternKind,
    pub average_ring_spacing: f64,
    pub growth_rate: GrowthRate,
    pub growth_consistency: f64,
    pub ring_spacings: Vec<f64>,
}

impl GrowthPattern {
    /// The fixed result for fewer than two rings.
    pub fn insufficient_data() -> Self {
        Self {
            growth_pattern: PatternKind::InsufficientData,
            average_ring_spacing: 0.0,
            growth_rate: GrowthRate::Unknown,
            growth_consistency: 0.0,
            ring_spacings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RingSummary {
    pub count: usize,
    pub rings_detected: Vec<DetectedRing>,
    pub ring_spacing: f64,
}

impl RingSummary {
    /// Summarize a radius-sorted ring list. `ring_spacing` is the mean of
    /// consecutive radius differences, 0.0 for fewer than two rings.
    pub fn from_rings(rings: Vec<DetectedRing>) -> Self {
        let spacings: Vec<f64> = rings.windows(2).map(|w| w[1].radius - w[0].radius).collect();
        let ring_spacing = if spacings.is_empty() {
            0.0
        } else {
            spacings.iter().sum::<f64>() / spacings.len() as f64
        };
        Self {
            count: rings.len(),
            rings_detected: rings,
            ring_spacing,
        }
    }

    pub fn empty() -> Self {
        Self {
            count: 0,
            rings_detected: Vec::new(),
            ring_spacing: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Point age estimate plus a deterministic uncertainty band.
/// The band collapses (`age_low == age_high`) when ring spacing is
/// consistent; inconsistent spacing widens it by one year on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeEstimate {
    pub age: u32,
    pub age_low: u32,
    pub age_high: u32,
}

impl AgeEstimate {
    pub fn exact(age: u32) -> Self {
        Self {
            age,
            age_low: age,
            age_high: age,
        }
    }

    pub fn banded(age: u32) -> Self {
        Self {
            age,
            age_low: age.saturating_sub(1).max(1),
            age_high: age + 1,
        }
    }
}

/// The full analysis record returned for every invocation, including
/// failed ones (`error` set, zero scores).
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub image_dimensions: ImageDimensions,
    pub estimated_age: u32,
    pub age_low: u32,
    pub age_high: u32,
    pub growth_rings: RingSummary,
    pub measurements: OtolithOutline,
    pub growth_analysis: GrowthPattern,
    pub confidence_score: f64,
    pub analysis_score: f64,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Error-shaped result: non-empty `error`, zero scores, empty collections.
    pub fn failure(filename: &str, message: impl Into<String>) -> Self {
        Self {
            filename: filename.to_string(),
            image_dimensions: ImageDimensions::default(),
            estimated_age: 0,
            age_low: 0,
            age_high: 0,
            growth_rings: RingSummary::empty(),
            measurements: OtolithOutline::empty(),
            growth_analysis: GrowthPattern::insufficient_data(),
            confidence_score: 0.0,
            analysis_score: 0.0,
            recommendations: Vec::new(),
            error: Some(message.into()),
        }
    }
}
