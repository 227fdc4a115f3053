use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timecard_agent::agents::backend::{GroqBackend, ImagePayload, VisionBackend};
use timecard_agent::agents::timecard_reader::TimecardReaderAgent;
use timecard_agent::agents::Agent;
use timecard_agent::api::state::AppState;
use timecard_agent::config::AppConfig;
use timecard_agent::enrich::enrich_timecards;

#[derive(Parser)]
#[command(name = "timecard-agent")]
#[command(about = "Timecard digitizer with AI-powered extraction")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Extract and total a single timecard image, printing JSON
    Extract {
        /// Path to the image file
        image: PathBuf,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config file is optional; defaults apply when it is absent
    let config = if std::path::Path::new(&cli.config).exists() {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load config from {}", cli.config))?
    } else {
        AppConfig::default()
    };

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting timecard-agent v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let backend: Arc<dyn VisionBackend> =
                Arc::new(GroqBackend::from_config(&config.ai).context("Failed to build vision backend")?);

            let state = AppState::new(backend);
            let app = timecard_agent::api::build_router(state);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Extract { image, pretty } => {
            let backend: Arc<dyn VisionBackend> =
                Arc::new(GroqBackend::from_config(&config.ai).context("Failed to build vision backend")?);

            let bytes = std::fs::read(&image)
                .with_context(|| format!("Failed to read image {}", image.display()))?;
            let mime_type = mime_for_path(&image);

            let agent = TimecardReaderAgent::new(backend);
            let cards = agent
                .execute(ImagePayload::new(bytes, mime_type))
                .await
                .context("Extraction failed")?;

            let batch = enrich_timecards(cards);

            if !batch.issues.is_empty() {
                for issue in &batch.issues {
                    tracing::warn!(
                        timecard = issue.timecard_index,
                        entry = issue.entry_index,
                        day = %issue.day,
                        "{}",
                        issue.message
                    );
                }
            }

            let output = if pretty {
                serde_json::to_string_pretty(&batch)?
            } else {
                serde_json::to_string(&batch)?
            };
            println!("{}", output);
        }
    }

    Ok(())
}

/// Guess a MIME type from the file extension.
fn mime_for_path(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}
