use tracing::warn;

mod admin;
mod app;
mod config;
mod docstore;
mod error;
mod images;
mod portfolio;
mod state;
mod store;
mod trading;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "injazati=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init().await?;

    // First load runs in the background; the portfolio route retries lazily
    // if it has not finished or has failed.
    let store = state.store.clone();
    tokio::spawn(async move {
        if let Err(e) = store.load().await {
            warn!(error = %e, "initial load failed; will retry on first request");
        }
    });

    tokio::spawn(trading::run_ticker(state.trading.clone()));

    let app = app::build_app(state);
    app::serve(app).await
}
