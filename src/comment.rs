use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FetchError;
use crate::youtube::types::CommentResource;

/// One comment or reply on a video, flattened out of a comment thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub channel_id: String,
    pub video_id: String,
    pub text_display: String,
    pub author_display_name: String,
    pub author_profile_image_url: String,
    pub author_channel_url: String,
    pub author_channel_id: String,
    pub can_rate: bool,
    pub viewer_rating: String,
    pub like_count: u64,
    pub published_at: String,
    pub updated_at: String,
    /// None for top-level comments
    pub parent_id: Option<String>,
    pub comment_id: String,
}

/// Column names in field declaration order.
pub const COLUMNS: [&str; 14] = [
    "channelId",
    "videoId",
    "textDisplay",
    "authorDisplayName",
    "authorProfileImageUrl",
    "authorChannelUrl",
    "authorChannelId",
    "canRate",
    "viewerRating",
    "likeCount",
    "publishedAt",
    "updatedAt",
    "parentId",
    "commentId",
];

impl CommentRecord {
    /// Top-level comment of a thread without replies. The parent is always cleared.
    pub fn top_level(comment: CommentResource) -> Self {
        Self::from_resource(comment, None)
    }

    /// Reply inside a thread. The parent comes from the reply's own snippet.
    pub fn reply(comment: CommentResource) -> Result<Self, FetchError> {
        let parent_id = comment
            .snippet
            .parent_id
            .clone()
            .ok_or_else(|| FetchError::MissingParent {
                comment_id: comment.id.clone(),
            })?;
        Ok(Self::from_resource(comment, Some(parent_id)))
    }

    fn from_resource(comment: CommentResource, parent_id: Option<String>) -> Self {
        let s = comment.snippet;
        Self {
            channel_id: s.channel_id,
            video_id: s.video_id,
            text_display: s.text_display,
            author_display_name: s.author_display_name,
            author_profile_image_url: s.author_profile_image_url,
            author_channel_url: s.author_channel_url,
            author_channel_id: s.author_channel_id.value,
            can_rate: s.can_rate,
            viewer_rating: s.viewer_rating,
            like_count: s.like_count,
            published_at: s.published_at,
            updated_at: s.updated_at,
            parent_id,
            comment_id: comment.id,
        }
    }

    /// Flat key/value row in column order. An absent parent renders as an empty cell.
    pub fn to_row(&self) -> Vec<(&'static str, String)> {
        let values = [
            self.channel_id.clone(),
            self.video_id.clone(),
            self.text_display.clone(),
            self.author_display_name.clone(),
            self.author_profile_image_url.clone(),
            self.author_channel_url.clone(),
            self.author_channel_id.clone(),
            self.can_rate.to_string(),
            self.viewer_rating.clone(),
            self.like_count.to_string(),
            self.published_at.clone(),
            self.updated_at.clone(),
            self.parent_id.clone().unwrap_or_default(),
            self.comment_id.clone(),
        ];
        COLUMNS.into_iter().zip(values).collect()
    }
}

impl fmt::Display for CommentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.author_display_name, self.text_display)
    }
}
