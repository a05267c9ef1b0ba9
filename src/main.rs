use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use ytcomments::config::AppConfig;
use ytcomments::pipeline::{default_output_path, effective_limit, Pipeline};

/// Export the comments of a YouTube video as tab-separated text
#[derive(Parser)]
#[command(name = "ytcomments")]
#[command(version)]
struct Cli {
    /// Video identifier, e.g. XTjtPc0uiG8
    #[arg(value_name = "VIDEO_ID")]
    video_id: String,

    /// Add sentiment score and magnitude columns
    #[arg(short, long)]
    sentiment: bool,

    /// Maximum number of comments; 0 or less fetches everything
    #[arg(short = 'n', long, default_value_t = 100, allow_negative_numbers = true)]
    limit: i64,

    /// Output file (default: <output_dir>/comments_<VIDEO_ID>.tsv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Concurrent sentiment requests (overrides sentiment.max_workers)
    #[arg(short, long)]
    workers: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ytcomments=info".into()),
        )
        .init();

    let cli = Cli::parse();

    info!("Loading configuration...");
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(workers) = cli.workers {
        config.sentiment.max_workers = workers;
    }

    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(&config.export.output_dir, &cli.video_id));

    let pipeline = Pipeline::from_config(&config, cli.sentiment);
    let summary = pipeline
        .run(&cli.video_id, effective_limit(cli.limit), &output)
        .await?;

    info!(
        "Wrote {} comments{} to {}",
        summary.comments,
        if summary.with_sentiment { " with sentiment" } else { "" },
        summary.path.display()
    );

    Ok(())
}
