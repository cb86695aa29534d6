use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use digest_notifier::{deliver, TelegramNotifier};
use tube_digest::{
    gemini::GeminiClient,
    openai::OpenAIClient,
    text::DEFAULT_MAX_CHUNK_SIZE,
    tracing::init_tracing_subscriber,
    types::{Digest, ProxySettings, TranscriptRequest},
    yt::{client::YtTranscriptClient, detector::WhatlangDetector},
    DigestProcessorBuilder, TextModel,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Provider {
    Gemini,
    #[value(name = "openai")]
    OpenAI,
}

impl Provider {
    fn api_key_env(self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
        }
    }
}

#[derive(Parser)]
#[command(
    name = "tube-digest",
    about = "Download a YouTube transcript and generate a summary with a hosted LLM"
)]
struct Cli {
    /// YouTube video URL
    url: String,

    /// Model provider API key (defaults to GEMINI_API_KEY or OPENAI_API_KEY)
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Model provider
    #[arg(long, env = "DIGEST_PROVIDER", value_enum, default_value_t = Provider::Gemini)]
    provider: Provider,

    /// Model name, overrides the provider default
    #[arg(short, long, env = "DIGEST_MODEL")]
    model: Option<String>,

    #[arg(short = 'u', long, env = "PROXY_USERNAME")]
    proxy_username: Option<String>,

    #[arg(short = 'p', long, env = "PROXY_PASSWORD")]
    proxy_password: Option<String>,

    #[arg(long, env = "PROXY_HOST")]
    proxy_host: Option<String>,

    #[arg(long, env = "PROXY_PORT")]
    proxy_port: Option<u16>,

    /// Transcript language code
    #[arg(short, long, default_value = "en")]
    language: String,

    /// File to save the summary to, printed to stdout otherwise
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File to save the transcript to
    #[arg(short = 't', long)]
    save_transcript: Option<PathBuf>,

    /// Maximum chunk size, in characters, sent to the model
    #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_SIZE)]
    max_chunk_size: usize,

    #[arg(long, env = "TELEGRAM_BOT_TOKEN")]
    telegram_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    telegram_chat_id: Option<String>,

    /// Skip Telegram delivery even when credentials are set
    #[arg(long)]
    no_notify: bool,
}

impl Cli {
    fn transcript_request(&self) -> TranscriptRequest {
        TranscriptRequest::new(&self.language).with_proxy(ProxySettings {
            username: self.proxy_username.clone(),
            password: self.proxy_password.clone(),
            host: self.proxy_host.clone(),
            port: self.proxy_port,
        })
    }

    fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(self.provider.api_key_env()).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

async fn run_pipeline<M: TextModel>(
    cli: &Cli,
    request: &TranscriptRequest,
    model: M,
) -> anyhow::Result<Digest> {
    let service = YtTranscriptClient::from_request(request)?;

    let processor = DigestProcessorBuilder::new()
        .transcript_service(service)
        .language_detector(WhatlangDetector)
        .model(model)
        .max_chunk_size(cli.max_chunk_size)
        .build();

    Ok(processor.run(&cli.url, &request.language).await?)
}

async fn summarize(cli: &Cli, api_key: String) -> anyhow::Result<Digest> {
    let request = cli.transcript_request();

    match cli.provider {
        Provider::Gemini => {
            let mut model = GeminiClient::new(api_key)?;
            if let Some(name) = &cli.model {
                model = model.with_model(name);
            }
            run_pipeline(cli, &request, model).await
        }
        Provider::OpenAI => {
            let mut model = OpenAIClient::new(api_key)?;
            if let Some(name) = &cli.model {
                model = model.with_model(name);
            }
            run_pipeline(cli, &request, model).await
        }
    }
}

async fn write_outputs(cli: &Cli, digest: &Digest) {
    if let Some(path) = &cli.save_transcript {
        match tokio::fs::write(path, &digest.transcript).await {
            Ok(()) => tracing::info!(path = %path.display(), "Transcript saved"),
            Err(e) => tracing::error!(error = %e, path = %path.display(), "Failed to save transcript"),
        }
    }

    match &cli.output {
        Some(path) => match tokio::fs::write(path, &digest.summary).await {
            Ok(()) => tracing::info!(path = %path.display(), "Summary saved"),
            Err(e) => tracing::error!(error = %e, path = %path.display(), "Failed to save summary"),
        },
        None => println!("\n=== SUMMARY ===\n\n{}", digest.summary),
    }
}

async fn notify(cli: &Cli, digest: &Digest) {
    if cli.no_notify {
        return;
    }

    let (Some(token), Some(chat_id)) = (&cli.telegram_token, &cli.telegram_chat_id) else {
        tracing::info!("TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set, skipping delivery");
        return;
    };

    let notifier = TelegramNotifier::new(token, chat_id);
    let text = format!("=== SUMMARY ===\n{}", digest.summary);

    match deliver(&notifier, &text).await {
        Ok(report) => tracing::info!(
            messages_sent = report.messages_sent,
            "Sent summary to Telegram"
        ),
        Err(e) => tracing::error!(error = ?e, "Failed to send summary to Telegram"),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let api_key = cli.resolve_api_key().with_context(|| {
        format!(
            "No API key provided. Use --api-key or set {}",
            cli.provider.api_key_env()
        )
    })?;

    tracing::info!(url = %cli.url, provider = ?cli.provider, "Processing video");

    let digest = summarize(&cli, api_key)
        .await
        .context("Failed to generate summary")?;

    if digest.summary.trim().is_empty() {
        anyhow::bail!("Model returned an empty summary");
    }

    tracing::info!(
        video_id = %digest.video,
        chunk_count = digest.chunk_count,
        "Summary generated"
    );

    write_outputs(&cli, &digest).await;
    notify(&cli, &digest).await;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();

    if let Err(e) = init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "tube-digest failed");
            ExitCode::FAILURE
        }
    }
}
