pub mod analysis;
pub mod config;
pub mod models;

pub use analysis::Analyzer;
pub use config::AnalysisConfig;
pub use models::{
    AgeEstimate, AnalysisResult, DetectedRing, GrowthPattern, GrowthRate, ImageDimensions,
    OtolithOutline, OutlineCenter, PatternKind, RingSummary,
};
