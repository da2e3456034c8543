use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod error;
mod openai;
mod prompts;

use api::AppState;
use config::Config;
use openai::OpenAiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // -----------------------------
    // Logging
    // -----------------------------
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("🚀 Starting captionify API server...");

    // -----------------------------
    // Shared state / Dependencies
    // -----------------------------
    let config = Config::from_env()?;
    let openai = Arc::new(OpenAiClient::new(&config));

    let state = AppState { openai };

    // -----------------------------
    // Routers
    // -----------------------------
    let app = Router::new()
        .merge(api::router())
        // CORS for frontend
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        // Attach shared state
        .with_state(state);

    let addr = config.bind_addr.clone();
    println!("🌐 HTTP listening on http://{addr}");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
