//! Fetches every comment on a YouTube video, optionally scores each one's
//! sentiment, and exports the result as tab-separated text.

pub mod analysis;
pub mod comment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod storage;
pub mod youtube;

pub use analysis::{ParallelEnricher, SentimentResult, SentimentSource};
pub use comment::CommentRecord;
pub use config::AppConfig;
pub use error::{AnalyzeError, EnrichmentError, ExportError, FetchError};
pub use pipeline::Pipeline;
pub use storage::TabularExporter;
pub use youtube::{CommentSource, PaginatedFetcher};
