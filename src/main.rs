use std::sync::Arc;

use anyhow::Context;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod services;

use auth::authenticator::{Authenticator, SimulatedAuthenticator};
use config::Config;
use models::postcard::PostcardCatalog;
use services::chat::{KeywordResponder, ResponseStrategy};
use services::community::CommunityFeed;
use services::session::Session;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<RwLock<Session>>,
    pub community: Arc<RwLock<CommunityFeed>>,
    pub catalog: Arc<PostcardCatalog>,
    pub authenticator: Arc<dyn Authenticator>,
    pub responder: Arc<dyn ResponseStrategy>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(RwLock::new(Session::default())),
            community: Arc::new(RwLock::new(CommunityFeed::seeded())),
            catalog: Arc::new(PostcardCatalog::standard()),
            authenticator: Arc::new(SimulatedAuthenticator),
            responder: Arc::new(KeywordResponder),
        }
    }
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = vec![config
        .frontend_url
        .parse::<axum::http::HeaderValue>()
        .context("FRONTEND_URL is not a valid origin")?];
    // In dev, also allow LAN access (e.g. testing from another device)
    for o in &config.cors_extra_origins {
        if let Ok(hv) = o.parse::<axum::http::HeaderValue>() {
            origins.push(hv);
        }
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pawgress_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;
    let cors = cors_layer(&config)?;
    let addr = config.listen_addr();

    let state = AppState::new(config);
    tracing::info!(
        postcards = state.catalog.len(),
        pet = %state.config.pet_name,
        "Postcard catalog loaded"
    );
    if state.catalog.is_empty() {
        tracing::warn!("Postcard catalog is empty, pets will stay on Earth");
    }

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
