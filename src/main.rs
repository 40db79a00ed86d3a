//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use chat_records::adapters::codec::JsonCodec;
use chat_records::adapters::ui::tui::TuiInputPort;
use chat_records::ports::{InputPort, RecordCodec};
use chat_records::shared::config::AppConfig;
use chat_records::usecases::RecordService;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        AppConfig::default()
    });

    chat_records::adapters::ui::init_ui();

    let data_dir = PathBuf::from(cfg.data_dir_or_default());
    info!(
        path = %data_dir.display(),
        pretty = cfg.pretty_or_default(),
        strict = cfg.strict_or_default(),
        "configuration"
    );

    let codec: Arc<dyn RecordCodec> = Arc::new(JsonCodec::new(cfg.pretty_or_default()));
    let service = Arc::new(RecordService::new(codec, cfg.strict_or_default()));
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(service, &data_dir));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
