pub mod enricher;
pub mod language;
pub mod rate;
pub mod types;

pub use enricher::ParallelEnricher;
pub use language::{LanguageClient, SentimentSource};
pub use types::SentimentResult;
