use std::path::Path;
use tracing::info;

use crate::analysis::SentimentResult;
use crate::comment::CommentRecord;
use crate::error::ExportError;

pub const DEFAULT_DELIMITER: char = '\t';

/// Writes comments, optionally with their sentiment, as delimiter-separated text.
///
/// The only escaping performed is replacing the delimiter inside
/// `textDisplay` with a space. No quoting, no newline handling.
pub struct TabularExporter {
    delimiter: char,
}

impl Default for TabularExporter {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl TabularExporter {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Renders the full document: a header row, then one row per record.
    pub fn render(
        &self,
        records: &[CommentRecord],
        sentiments: Option<&[SentimentResult]>,
    ) -> Result<String, ExportError> {
        if records.is_empty() {
            return Err(ExportError::Empty);
        }
        if let Some(sentiments) = sentiments {
            if sentiments.len() != records.len() {
                return Err(ExportError::LengthMismatch {
                    records: records.len(),
                    sentiments: sentiments.len(),
                });
            }
        }

        let delimiter = self.delimiter.to_string();
        let rows: Vec<Vec<(&'static str, String)>> = records
            .iter()
            .enumerate()
            .map(|(i, record)| self.row(record, sentiments.map(|s| &s[i])))
            .collect();

        // Every row has the same shape, so the first one fixes the header.
        let header: Vec<&str> = rows[0].iter().map(|(name, _)| *name).collect();

        let mut out = header.join(delimiter.as_str());
        out.push('\n');
        for row in &rows {
            let cells: Vec<&str> = row.iter().map(|(_, value)| value.as_str()).collect();
            out.push_str(&cells.join(delimiter.as_str()));
            out.push('\n');
        }
        Ok(out)
    }

    /// Renders and writes the document to `path`.
    ///
    /// Nothing is created when rendering fails. The content goes to a
    /// sibling temporary file first and is renamed into place.
    pub async fn export(
        &self,
        path: &Path,
        records: &[CommentRecord],
        sentiments: Option<&[SentimentResult]>,
    ) -> Result<(), ExportError> {
        let document = self.render(records, sentiments)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".part");
        let tmp_path = Path::new(&tmp_name);

        let written = match tokio::fs::write(tmp_path, document.as_bytes()).await {
            Ok(()) => tokio::fs::rename(tmp_path, path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(tmp_path).await;
            return Err(e.into());
        }

        info!(
            "Exported {} comments{} to {}",
            records.len(),
            if sentiments.is_some() { " with sentiment" } else { "" },
            path.display()
        );
        Ok(())
    }

    fn row(
        &self,
        record: &CommentRecord,
        sentiment: Option<&SentimentResult>,
    ) -> Vec<(&'static str, String)> {
        let mut row = record.to_row();
        for (name, value) in row.iter_mut() {
            if *name == "textDisplay" {
                *value = value.replace(self.delimiter, " ");
            }
        }
        if let Some(sentiment) = sentiment {
            row.push(("score", sentiment.score.to_string()));
            row.push(("magnitude", sentiment.magnitude.to_string()));
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::COLUMNS;

    fn record(id: &str, text: &str) -> CommentRecord {
        CommentRecord {
            channel_id: "UCchan".into(),
            video_id: "vid".into(),
            text_display: text.into(),
            author_display_name: "carol".into(),
            author_profile_image_url: "https://img.example/c.jpg".into(),
            author_channel_url: "http://www.youtube.com/channel/UCcarol".into(),
            author_channel_id: "UCcarol".into(),
            can_rate: true,
            viewer_rating: "none".into(),
            like_count: 12,
            published_at: "2024-03-01T10:00:00Z".into(),
            updated_at: "2024-03-02T10:00:00Z".into(),
            parent_id: Some("root".into()),
            comment_id: id.into(),
        }
    }

    #[test]
    fn test_header_without_sentiment() {
        let doc = TabularExporter::default()
            .render(&[record("a", "hello")], None)
            .unwrap();
        let header = doc.lines().next().unwrap();

        assert_eq!(header, COLUMNS.join("\t"));
        assert!(!header.contains("score"));
        assert!(!header.contains("magnitude"));
    }

    #[test]
    fn test_sentiment_columns_are_appended() {
        let sentiments = [
            SentimentResult { score: 0.5, magnitude: 1.25 },
            SentimentResult { score: -0.2, magnitude: 0.0 },
        ];
        let doc = TabularExporter::default()
            .render(&[record("a", "good"), record("b", "bad")], Some(&sentiments[..]))
            .unwrap();
        let lines: Vec<&str> = doc.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("commentId\tscore\tmagnitude"));
        assert!(lines[1].ends_with("\ta\t0.5\t1.25"));
        assert!(lines[2].ends_with("\tb\t-0.2\t0"));
    }

    #[test]
    fn test_delimiter_in_text_is_replaced() {
        let doc = TabularExporter::default()
            .render(&[record("a", "tab\there\tand\tthere")], None)
            .unwrap();
        let row = doc.lines().nth(1).unwrap();
        let cells: Vec<&str> = row.split('\t').collect();

        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[2], "tab here and there");
    }

    #[test]
    fn test_custom_delimiter() {
        let doc = TabularExporter::new(',')
            .render(&[record("a", "one, two")], None)
            .unwrap();
        let row = doc.lines().nth(1).unwrap();
        assert_eq!(row.split(',').count(), COLUMNS.len());
        assert!(row.contains(",one  two,"));
    }

    #[test]
    fn test_empty_and_mismatched_input_rejected() {
        let exporter = TabularExporter::default();
        assert!(matches!(exporter.render(&[], None), Err(ExportError::Empty)));

        let sentiments = [SentimentResult { score: 0.1, magnitude: 0.1 }];
        let err = exporter
            .render(&[record("a", "x"), record("b", "y")], Some(&sentiments[..]))
            .unwrap_err();
        assert!(matches!(err, ExportError::LengthMismatch { records: 2, sentiments: 1 }));
    }

    #[tokio::test]
    async fn test_export_writes_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.tsv");

        TabularExporter::default()
            .export(&path, &[record("a", "hi")], None)
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(!dir.path().join("nested").join("out.tsv.part").exists());
    }

    #[tokio::test]
    async fn test_empty_export_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");

        let err = TabularExporter::default().export(&path, &[], None).await.unwrap_err();

        assert!(matches!(err, ExportError::Empty));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken.tsv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let err = TabularExporter::default()
            .export(&path, &[record("a", "hi")], None)
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Io(_)));
        assert!(!dir.path().join("taken.tsv.part").exists());
        assert!(path.join("keep").exists());
    }
}
