use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::client::CommentSource;
use super::types::{CommentThread, CommentThreadListResponse, ThreadContent};
use crate::comment::CommentRecord;
use crate::error::FetchError;

/// Walks every page of comment threads for a video and flattens them into records.
pub struct PaginatedFetcher<S> {
    source: S,
}

impl<S: CommentSource> PaginatedFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetches all comments for `video_id`, in page order.
    ///
    /// With `Some(limit)`, paging stops as soon as `limit` records have been
    /// collected and the result is truncated to exactly `limit`. A zero limit
    /// is treated as unlimited.
    pub async fn fetch(
        &self,
        video_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<CommentRecord>, FetchError> {
        let limit = limit.filter(|&n| n > 0);
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut page_token: Option<String> = None;
        let mut page = 0usize;

        loop {
            page += 1;
            let raw = self
                .source
                .list_comments_page(video_id, page_token.as_deref())
                .await?;
            let response: CommentThreadListResponse = serde_json::from_value(raw)
                .map_err(|source| FetchError::SourceData { page, source })?;

            debug!(
                "Page {} for {}: {} threads, next page: {}",
                page,
                video_id,
                response.items.len(),
                response.next_page_token.is_some()
            );

            for record in flatten_threads(response.items)? {
                if !seen.insert(record.comment_id.clone()) {
                    warn!("Skipping duplicate comment {}", record.comment_id);
                    continue;
                }
                records.push(record);
            }

            if let Some(limit) = limit {
                if records.len() >= limit {
                    records.truncate(limit);
                    break;
                }
            }

            match response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!(
            "Fetched {} comments for video {} across {} page(s)",
            records.len(),
            video_id,
            page
        );
        Ok(records)
    }
}

fn flatten_threads(threads: Vec<CommentThread>) -> Result<Vec<CommentRecord>, FetchError> {
    let mut records = Vec::new();
    for thread in threads {
        match thread.into_content() {
            ThreadContent::WithReplies(replies) => {
                for reply in replies {
                    records.push(CommentRecord::reply(reply)?);
                }
            }
            ThreadContent::TopLevelOnly(comment) => {
                records.push(CommentRecord::top_level(comment));
            }
        }
    }
    Ok(records)
}
