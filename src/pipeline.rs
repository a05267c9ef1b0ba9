use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::analysis::{LanguageClient, ParallelEnricher};
use crate::config::AppConfig;
use crate::storage::TabularExporter;
use crate::youtube::{CommentSource, PaginatedFetcher, YouTubeClient};

/// Fetch, optionally score, then export the comments of one video.
pub struct Pipeline<S> {
    fetcher: PaginatedFetcher<S>,
    enricher: Option<ParallelEnricher>,
    exporter: TabularExporter,
    proceed_without_sentiment: bool,
}

#[derive(Debug)]
pub struct RunSummary {
    pub comments: usize,
    pub with_sentiment: bool,
    pub path: PathBuf,
}

impl Pipeline<YouTubeClient> {
    /// Wires the HTTP-backed clients from configuration.
    pub fn from_config(config: &AppConfig, sentiment: bool) -> Self {
        let source = YouTubeClient::new(&config.youtube, &config.api_key);
        let enricher = sentiment.then(|| {
            let analyzer = Arc::new(LanguageClient::new(&config.sentiment, &config.api_key));
            ParallelEnricher::new(analyzer, &config.sentiment)
        });
        Self::new(
            source,
            enricher,
            TabularExporter::default(),
            config.sentiment.proceed_without,
        )
    }
}

impl<S: CommentSource> Pipeline<S> {
    pub fn new(
        source: S,
        enricher: Option<ParallelEnricher>,
        exporter: TabularExporter,
        proceed_without_sentiment: bool,
    ) -> Self {
        Self {
            fetcher: PaginatedFetcher::new(source),
            enricher,
            exporter,
            proceed_without_sentiment,
        }
    }

    pub async fn run(&self, video_id: &str, limit: Option<usize>, output: &Path) -> Result<RunSummary> {
        info!("Fetching comments for video {}", video_id);
        let records = self
            .fetcher
            .fetch(video_id, limit)
            .await
            .with_context(|| format!("Failed to fetch comments for video {}", video_id))?;

        let sentiments = match &self.enricher {
            None => None,
            Some(enricher) => match enricher.enrich(&records).await {
                Ok(sentiments) => Some(sentiments),
                Err(e) if self.proceed_without_sentiment => {
                    warn!("Sentiment analysis failed, exporting without it: {:#}", e);
                    None
                }
                Err(e) => return Err(e).context("Sentiment analysis failed"),
            },
        };

        self.exporter
            .export(output, &records, sentiments.as_deref())
            .await
            .with_context(|| format!("Failed to export to {}", output.display()))?;

        Ok(RunSummary {
            comments: records.len(),
            with_sentiment: sentiments.is_some(),
            path: output.to_path_buf(),
        })
    }
}

/// Maps the CLI limit onto the fetcher's: anything `<= 0` means unlimited.
pub fn effective_limit(limit: i64) -> Option<usize> {
    usize::try_from(limit).ok().filter(|&n| n > 0)
}

pub fn default_output_path(output_dir: &Path, video_id: &str) -> PathBuf {
    output_dir.join(format!("comments_{}.tsv", video_id))
}
