use serde::Deserialize;

// commentThreads.list response shapes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    pub id: String,
    pub snippet: ThreadSnippet,
    pub replies: Option<ThreadReplies>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSnippet {
    pub top_level_comment: CommentResource,
}

#[derive(Debug, Deserialize)]
pub struct ThreadReplies {
    pub comments: Vec<CommentResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentResource {
    pub id: String,
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub channel_id: String,
    pub video_id: String,
    pub text_display: String,
    pub author_display_name: String,
    pub author_profile_image_url: String,
    pub author_channel_url: String,
    pub author_channel_id: AuthorChannelId,
    pub can_rate: bool,
    pub viewer_rating: String,
    pub like_count: u64,
    pub published_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorChannelId {
    pub value: String,
}

/// What a single thread contributes to the flattened output.
#[derive(Debug)]
pub enum ThreadContent {
    /// No replies: the top-level comment itself is emitted.
    TopLevelOnly(CommentResource),
    /// Replies present: only the replies are emitted, the top-level comment is dropped.
    WithReplies(Vec<CommentResource>),
}

impl CommentThread {
    pub fn into_content(self) -> ThreadContent {
        match self.replies {
            Some(replies) => ThreadContent::WithReplies(replies.comments),
            None => ThreadContent::TopLevelOnly(self.snippet.top_level_comment),
        }
    }
}
