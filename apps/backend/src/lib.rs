pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::{Database, MemoryStore, Store};
use crate::error::ApiError;
use crate::services::gemini::{GeminiClient, VocabularyGenerator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub generator: Option<Arc<dyn VocabularyGenerator>>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, generator: Option<Arc<dyn VocabularyGenerator>>) -> Self {
        Self { store, generator }
    }

    /// The configured generator, or 503 when there is no API key.
    pub fn generator(&self) -> error::Result<Arc<dyn VocabularyGenerator>> {
        self.generator.clone().ok_or(ApiError::AiNotConfigured)
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full router.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let protected_routes = Router::new()
        // Account routes
        .route("/api/auth/me", get(routes::auth::me))
        // Word list routes
        .route(
            "/api/wordlists",
            get(routes::wordlists::list).post(routes::wordlists::create),
        )
        .route(
            "/api/wordlists/:id",
            put(routes::wordlists::update).delete(routes::wordlists::delete),
        )
        .route(
            "/api/wordlists/:id/words/:word_id/progress",
            put(routes::wordlists::update_progress),
        )
        // Stats routes
        .route("/api/stats/session", post(routes::stats::record_session))
        .route("/api/stats/user", get(routes::stats::user))
        .route("/api/stats/review", get(routes::stats::review))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/wordlists/public", get(routes::wordlists::list_public))
        .route("/api/generate-vocabulary", post(routes::vocabulary::generate))
        .route("/api/test-ai", get(routes::vocabulary::test_ai))
        .route("/api/save-data", post(routes::data::save))
        .route("/api/load-data", get(routes::data::load))
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(url, config.database_max_connections).await?;

            tracing::info!("Running migrations...");
            db.run_migrations().await?;

            let store: Arc<dyn Store> = Arc::new(db);
            Ok(store)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, data will be kept in memory only");
            let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
            Ok(store)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = open_store(&config).await?;

    let generator: Option<Arc<dyn VocabularyGenerator>> = match &config.gemini {
        Some(gemini) => {
            tracing::info!(model = %gemini.model, "Vocabulary generator enabled");
            let client: Arc<dyn VocabularyGenerator> = Arc::new(GeminiClient::new(gemini));
            Some(client)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY is not set, AI routes will return 503");
            None
        }
    };

    let state = AppState::new(store.clone(), generator);
    let app = build_router(state, &config.cors_origins);

    let addr = config.bind_addr();
    tracing::info!("Starting server on {} ({} store)", addr, store.backend());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Store closed");

    Ok(())
}
