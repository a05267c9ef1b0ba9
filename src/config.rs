use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub youtube: YouTubeConfig,
    pub sentiment: SentimentConfig,
    pub export: ExportConfig,
    // Loaded from env or the credentials file
    #[serde(skip)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    pub base_url: String,
    pub page_size: u32,
    pub credentials_path: PathBuf,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            page_size: 100,
            credentials_path: PathBuf::from("credentials.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub base_url: String,
    /// Language hint sent with every document
    pub language: String,
    pub max_workers: usize,
    /// 0 disables the ceiling
    pub requests_per_minute: u32,
    /// Export without sentiment columns instead of failing when analysis fails
    pub proceed_without: bool,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            base_url: "https://language.googleapis.com/v1".to_string(),
            language: "en".to_string(),
            max_workers: 5,
            requests_per_minute: 600,
            proceed_without: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Deserialize)]
struct Credentials {
    api_key: String,
}

impl AppConfig {
    /// Reads `path` if it exists, then resolves the API key.
    pub fn load(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::from_file(path)?;
        config.api_key = match std::env::var("GOOGLE_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => read_credentials(&config.youtube.credentials_path)?,
        };

        Ok(config)
    }

    /// Parses the TOML file at `path`; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config_text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&config_text).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

fn read_credentials(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).with_context(|| {
        format!(
            "GOOGLE_API_KEY not set and credentials file {} is unreadable",
            path.display()
        )
    })?;
    let credentials: Credentials = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse credentials file {}", path.display()))?;
    Ok(credentials.api_key)
}
