//! Countdown Timer - a single-screen countdown timer served over HTTP
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::{console_readout_task, spawn_timer_loop},
    timer::format_remaining,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    let initial_ms = config.initial_duration_ms()?;
    let presets = config.preset_list()?;
    let cue = config.cue_kind();

    info!("Starting countdown-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, duration={}, presets={:?}, max_seconds={}, cue={:?}",
        config.host,
        config.port,
        format_remaining(initial_ms),
        presets.labels(),
        config.max_seconds,
        cue
    );

    // Spawn the timer loop that owns the engine
    let timer = spawn_timer_loop(initial_ms, Arc::new(cue));

    if config.console {
        tokio::spawn(console_readout_task(timer.snapshots.clone()));
    }

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        timer,
        presets,
        config.selector(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start         - Start the countdown");
    info!("  POST /stop          - Stop the countdown");
    info!("  POST /toggle        - Play/stop");
    info!("  POST /preset/:index - Select a preset duration");
    info!("  POST /duration      - Set {{\"preset\":\"M:SS\"}} or {{\"seconds\":N}}");
    info!("  POST /pause         - Release the finish cue");
    info!("  POST /resume        - Acquire the finish cue");
    info!("  GET  /presets       - List presets");
    info!("  GET  /status        - Current readout");
    info!("  GET  /health        - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
