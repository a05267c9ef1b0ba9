use serde::{Deserialize, Serialize};

/// Sentiment of one comment's text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// -1.0 (negative) to 1.0 (positive)
    pub score: f32,
    /// Overall emotional strength, 0.0 and up
    pub magnitude: f32,
}
