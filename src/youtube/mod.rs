pub mod client;
pub mod fetcher;
pub mod types;

pub use client::{CommentSource, YouTubeClient};
pub use fetcher::PaginatedFetcher;
