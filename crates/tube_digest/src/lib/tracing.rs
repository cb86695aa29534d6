use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const APP_NAME: &str = "tube-digest";

/// Installs the global subscriber. Logs go to stderr so stdout stays free for
/// the summary; `LOG_FORMAT=json` switches to bunyan formatted output.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let bunyan_layer = json.then(|| {
        JsonStorageLayer.and_then(BunyanFormattingLayer::new(
            APP_NAME.into(),
            std::io::stderr,
        ))
    });
    let fmt_layer = (!json).then(|| fmt::layer().compact().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(bunyan_layer)
        .with(fmt_layer)
        .with(sentry_tracing::layer())
        .try_init()?;

    Ok(())
}
