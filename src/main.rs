use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// The main entry point for the scale-decay regression service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    let settings = configuration::load_config().context("Failed to load configuration")?;

    // Keep the guard alive for the whole run so buffered file logs are flushed.
    let _guard = init_tracing(&settings);

    tracing::info!(
        addr = %settings.addr(),
        body_limit_bytes = settings.body_limit_bytes,
        "Starting scale-decay service."
    );

    web_server::run_server(settings).await
}

/// Installs the global subscriber: stdout always, plus a daily rolling file
/// when `log_dir` is configured. `RUST_LOG` overrides the default `info` level.
fn init_tracing(settings: &configuration::Settings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match &settings.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "scale-decay.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}
