use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info};

use super::language::SentimentSource;
use super::rate::RateLimiter;
use super::types::SentimentResult;
use crate::comment::CommentRecord;
use crate::config::SentimentConfig;
use crate::error::{AnalyzeError, EnrichmentError};

/// Scores every comment with a bounded pool of concurrent sentiment calls.
pub struct ParallelEnricher {
    analyzer: Arc<dyn SentimentSource>,
    language: String,
    max_workers: usize,
    rate: Option<Arc<RateLimiter>>,
}

impl ParallelEnricher {
    pub fn new(analyzer: Arc<dyn SentimentSource>, config: &SentimentConfig) -> Self {
        Self {
            analyzer,
            language: config.language.clone(),
            max_workers: config.max_workers.max(1),
            rate: RateLimiter::per_minute(config.requests_per_minute).map(Arc::new),
        }
    }

    /// Returns one result per record, `result[i]` belonging to `records[i]`.
    ///
    /// Any single failure fails the whole call and stops further submissions.
    /// The error reported is the first failure observed, which is not
    /// necessarily the lowest index. All workers have finished by the time
    /// this returns, on success or error.
    pub async fn enrich(
        &self,
        records: &[CommentRecord],
    ) -> Result<Vec<SentimentResult>, EnrichmentError> {
        info!(
            "Analyzing sentiment of {} comments (max_workers: {}, rate limited: {})",
            records.len(),
            self.max_workers,
            self.rate.is_some()
        );

        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut workers = JoinSet::new();
        let mut slots: Vec<Option<SentimentResult>> = vec![None; records.len()];

        for (index, record) in records.iter().enumerate() {
            let permit = semaphore.clone().acquire_owned().await?;

            // A worker that finished while we waited may have failed.
            while let Some(joined) = workers.try_join_next() {
                if let Err(e) = fill_slot(joined, &mut slots) {
                    workers.shutdown().await;
                    return Err(e);
                }
            }

            let analyzer = self.analyzer.clone();
            let rate = self.rate.clone();
            let language = self.language.clone();
            let text = record.text_display.clone();

            workers.spawn(async move {
                if let Some(rate) = rate {
                    rate.acquire().await;
                }
                let result = analyzer.analyze(&text, &language).await;
                drop(permit);
                (index, result)
            });
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = fill_slot(joined, &mut slots) {
                workers.shutdown().await;
                return Err(e);
            }
        }

        let results = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(EnrichmentError::MissingResult { index }))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Sentiment analysis complete for {} comments", results.len());
        Ok(results)
    }
}

type WorkerOutcome = (usize, Result<SentimentResult, AnalyzeError>);

fn fill_slot(
    joined: Result<WorkerOutcome, JoinError>,
    slots: &mut [Option<SentimentResult>],
) -> Result<(), EnrichmentError> {
    match joined? {
        (index, Ok(sentiment)) => {
            debug!("Comment #{} scored {:.3}", index, sentiment.score);
            slots[index] = Some(sentiment);
            Ok(())
        }
        (index, Err(source)) => Err(EnrichmentError::Analyze { index, source }),
    }
}
