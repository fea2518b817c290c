//! Business logic services for the crop advisor

pub mod insight;
pub mod prediction;

pub use insight::InsightService;
pub use prediction::PredictionService;
