use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chatterbox_serverless::controllers::local::invoke;
use chatterbox_serverless::controllers::synthesis::SynthesisController;
use chatterbox_serverless::domain::synthesis::{
    SynthesisLimits, SynthesisRequest, SynthesisService, SynthesisServiceApi,
};
use chatterbox_serverless::infrastructure::config::{Config, LogFormat};
use chatterbox_serverless::infrastructure::http::{create_app, start_http_server};
use chatterbox_serverless::infrastructure::repositories::{ChatterboxModel, ModelHandle};

/// Serverless worker for Chatterbox Multilingual text-to-speech
#[derive(Debug, Parser)]
#[command(name = "chatterbox-serverless")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP worker (default)
    Serve,

    /// Run a single job locally and print the result
    Invoke {
        /// Job JSON, either {"input": {...}} or a bare request body
        #[arg(long = "test-input", alias = "test_input")]
        test_input: String,

        /// Also write the synthesized audio to this WAV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load the model and run one short synthesis
    Warmup {
        /// Text used for the warmup run
        #[arg(long, default_value = "Hola como esta?")]
        text: String,

        /// Language of the warmup text
        #[arg(long, default_value = "es")]
        language: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    // Load the model once; every request shares this handle
    let model: ModelHandle = Arc::new(
        ChatterboxModel::load(&config.chatterbox_url, config.chatterbox_timeout).await?,
    );
    let synthesis_service = Arc::new(SynthesisService::new(
        model.clone(),
        SynthesisLimits::from(&config),
    ));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, model, synthesis_service).await,
        Command::Invoke { test_input, output } => invoke(
            synthesis_service.as_ref(),
            &test_input,
            output.as_deref(),
            &mut std::io::stdout(),
        )
        .await
        .map(|_| ()),
        Command::Warmup { text, language } => {
            warmup(synthesis_service.as_ref(), text, language).await
        }
    }
}

async fn serve(
    config: Config,
    model: ModelHandle,
    synthesis_service: Arc<SynthesisService>,
) -> anyhow::Result<()> {
    tracing::info!(
        "Starting Chatterbox worker on {}:{}",
        config.host,
        config.port
    );

    if config.is_development() {
        tracing::debug!(config = ?config, "Effective configuration");
    }

    let synthesis_controller = Arc::new(SynthesisController::new(synthesis_service));
    let app = create_app(&config, model, synthesis_controller);

    start_http_server(Arc::new(config), app)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {}", e))
}

async fn warmup(service: &SynthesisService, text: String, language: String) -> anyhow::Result<()> {
    let request = SynthesisRequest {
        text: Some(text),
        language_id: Some(language),
        ..Default::default()
    };

    let response = service
        .synthesize(request)
        .await
        .context("warmup synthesis failed")?;

    tracing::info!(
        sample_rate = response.sample_rate,
        duration_seconds = response.duration_seconds,
        "Warmup completed"
    );

    Ok(())
}

fn init_logging(config: &Config) {
    // stdout is reserved for `invoke` output
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "chatterbox_serverless=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "chatterbox_serverless=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
