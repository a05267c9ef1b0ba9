use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::YouTubeConfig;
use crate::error::FetchError;

/// Something that can list one page of comment threads for a video.
///
/// Pages are handed back as raw JSON; shape validation happens in the fetcher
/// so that a malformed item fails the whole fetch in one place.
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn list_comments_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<Value, FetchError>;
}

pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
    page_size: u32,
}

impl YouTubeClient {
    pub fn new(config: &YouTubeConfig, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        }
    }
}

#[async_trait]
impl CommentSource for YouTubeClient {
    async fn list_comments_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<Value, FetchError> {
        let url = format!("{}/commentThreads", self.base_url);
        let max_results = self.page_size.to_string();

        let mut query_params = vec![
            ("part", "id,replies,snippet"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query_params.push(("pageToken", token));
            debug!("Using page token: {}", token);
        }

        let response = self.client.get(&url).query(&query_params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Comment API returned {} for video {}", status, video_id);
            return Err(FetchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
