use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::types::SentimentResult;
use crate::config::SentimentConfig;
use crate::error::AnalyzeError;

/// Something that can score the sentiment of a piece of text.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    async fn analyze(&self, text: &str, language: &str) -> Result<SentimentResult, AnalyzeError>;
}

/// Client for the Natural Language `documents:analyzeSentiment` endpoint.
pub struct LanguageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeSentimentRequest<'a> {
    document: Document<'a>,
    encoding_type: &'static str,
}

#[derive(Serialize)]
struct Document<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    content: &'a str,
    language: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeSentimentResponse {
    document_sentiment: Option<DocumentSentiment>,
}

#[derive(Deserialize)]
struct DocumentSentiment {
    score: Option<f32>,
    magnitude: Option<f32>,
}

impl LanguageClient {
    pub fn new(config: &SentimentConfig, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SentimentSource for LanguageClient {
    async fn analyze(&self, text: &str, language: &str) -> Result<SentimentResult, AnalyzeError> {
        let url = format!("{}/documents:analyzeSentiment", self.base_url);

        let request = AnalyzeSentimentRequest {
            document: Document {
                kind: "PLAIN_TEXT",
                content: text,
                language,
            },
            encoding_type: "UTF8",
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AnalyzeSentimentResponse = response
            .json()
            .await
            .map_err(|e| AnalyzeError::Parse(e.to_string()))?;

        let sentiment = parsed
            .document_sentiment
            .ok_or_else(|| AnalyzeError::Parse("missing documentSentiment".to_string()))?;

        // The API omits zero-valued fields.
        Ok(SentimentResult {
            score: sentiment.score.unwrap_or(0.0),
            magnitude: sentiment.magnitude.unwrap_or(0.0),
        })
    }
}
