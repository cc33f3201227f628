// gridline entry point.
//
// Startup sequence:
// 1. Initialize tracing (stdout)
// 2. Load config, seeding config/ from defaults/
// 3. Load reference data and the injury list
// 4. Build the assistant (odds client + model client)
// 5. Serve /api/chat until Ctrl+C

use anyhow::Context;
use gridline_app::Assistant;
use gridline_core::config;
use gridline_core::reference::ReferenceData;
use gridline_server::{router, AppState};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("gridline starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: model={}, max_tool_rounds={}, odds sport={}",
        config.llm.model, config.llm.max_tool_rounds, config.odds_api.sport
    );

    // 3. Load reference data
    let data = ReferenceData::load(&config).context("failed to load reference data")?;
    if data.injuries.is_empty() {
        warn!("injury list is empty; no players will be excluded");
    }

    // 4. Build the assistant
    let assistant = Assistant::from_config(&config, Arc::new(data));
    if !assistant.odds_key_set() {
        warn!("ODDS_API_KEY not set; odds tools will report an invalid key");
    }
    let app = router(AppState::new(assistant));

    // 5. Serve
    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{addr}/api/chat");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("gridline shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Initialize tracing to stdout. `RUST_LOG` overrides the default filter.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("gridline=info,gridline_app=info,gridline_server=info,warn")
        }))
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
