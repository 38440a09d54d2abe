mod advice;
mod error;
mod matcher;
mod normalize;
mod similarity;

pub use error::{EngineError, Result};
pub use matcher::{Match, RecommendationEngine};
pub use normalize::normalize;
pub use similarity::sequence_ratio;
