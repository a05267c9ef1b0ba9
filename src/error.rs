use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Comment API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed comment data on page {page}: {source}")]
    SourceData {
        page: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Reply {comment_id} has no parentId")]
    MissingParent { comment_id: String },
}

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sentiment API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse sentiment response: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("Sentiment analysis failed for comment #{index}: {source}")]
    Analyze {
        index: usize,
        #[source]
        source: AnalyzeError,
    },

    #[error("Sentiment worker pool closed: {0}")]
    PoolClosed(#[from] tokio::sync::AcquireError),

    #[error("Sentiment worker panicked: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("No sentiment produced for comment #{index}")]
    MissingResult { index: usize },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: no comments")]
    Empty,

    #[error("Got {sentiments} sentiment results for {records} comments")]
    LengthMismatch { records: usize, sentiments: usize },

    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}
