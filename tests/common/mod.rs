#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ytcomments::config::SentimentConfig;
use ytcomments::{
    AnalyzeError, CommentSource, FetchError, ParallelEnricher, SentimentResult, SentimentSource,
};

/// Serves pre-built pages; page N's token is the string "N".
pub struct FakeYouTube {
    pub pages: Vec<Value>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeYouTube {
    pub fn new(pages: Vec<Value>) -> Self {
        Self {
            pages,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl CommentSource for FakeYouTube {
    async fn list_comments_page(
        &self,
        _video_id: &str,
        page_token: Option<&str>,
    ) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let index = page_token.map(|t| t.parse::<usize>().unwrap()).unwrap_or(0);
        Ok(self.pages[index].clone())
    }
}

/// Scores a text by its length; fails on any text containing "boom".
pub struct LengthAnalyzer;

#[async_trait]
impl SentimentSource for LengthAnalyzer {
    async fn analyze(&self, text: &str, _language: &str) -> Result<SentimentResult, AnalyzeError> {
        if text.contains("boom") {
            return Err(AnalyzeError::Parse("unparseable".into()));
        }
        Ok(SentimentResult {
            score: text.len() as f32 / 100.0,
            magnitude: 1.0,
        })
    }
}

pub fn enricher() -> ParallelEnricher {
    let config = SentimentConfig {
        max_workers: 3,
        requests_per_minute: 0,
        ..SentimentConfig::default()
    };
    ParallelEnricher::new(Arc::new(LengthAnalyzer), &config)
}

pub fn snippet(id: &str, text: &str, parent: Option<&str>) -> Value {
    let mut s = json!({
        "channelId": "UCchannel",
        "videoId": "XTjtPc0uiG8",
        "textDisplay": text,
        "textOriginal": text,
        "authorDisplayName": format!("author of {}", id),
        "authorProfileImageUrl": "https://yt3.ggpht.com/avatar.jpg",
        "authorChannelUrl": "http://www.youtube.com/channel/UCauthor",
        "authorChannelId": { "value": "UCauthor" },
        "canRate": true,
        "viewerRating": "none",
        "likeCount": 2,
        "publishedAt": "2023-05-06T07:08:09Z",
        "updatedAt": "2023-05-06T07:08:09Z"
    });
    if let Some(parent) = parent {
        s["parentId"] = json!(parent);
    }
    s
}

pub fn lone_thread(id: &str, text: &str) -> Value {
    json!({
        "kind": "youtube#commentThread",
        "id": id,
        "snippet": {
            "videoId": "XTjtPc0uiG8",
            "topLevelComment": { "id": id, "snippet": snippet(id, text, None) },
            "totalReplyCount": 0
        }
    })
}

pub fn thread_with_replies(id: &str, replies: &[(&str, &str)]) -> Value {
    let comments: Vec<Value> = replies
        .iter()
        .map(|(rid, text)| json!({ "id": rid, "snippet": snippet(rid, text, Some(id)) }))
        .collect();
    json!({
        "kind": "youtube#commentThread",
        "id": id,
        "snippet": {
            "videoId": "XTjtPc0uiG8",
            "topLevelComment": { "id": id, "snippet": snippet(id, "top level", None) },
            "totalReplyCount": replies.len()
        },
        "replies": { "comments": comments }
    })
}

pub fn page(threads: Vec<Value>, next: Option<usize>) -> Value {
    match next {
        Some(n) => json!({ "items": threads, "nextPageToken": n.to_string() }),
        None => json!({ "items": threads }),
    }
}

/// Reads a TSV export back as (header, rows).
pub fn read_tsv(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let text = std::fs::read_to_string(path).unwrap();
    let mut lines = text.lines();
    let header = lines
        .next()
        .unwrap()
        .split('\t')
        .map(str::to_string)
        .collect();
    let rows = lines
        .map(|l| l.split('\t').map(str::to_string).collect())
        .collect();
    (header, rows)
}
