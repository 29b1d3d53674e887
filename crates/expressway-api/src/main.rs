use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use expressway_store::FileFeatureStore;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expressway_api::config::ApiConfig;
use expressway_api::router::create_router;
use expressway_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expressway_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::load()?;

    tracing::info!(
        port = config.port,
        data_file = %config.data_file.display(),
        static_dir = %config.static_dir.display(),
        "Starting expressway server"
    );

    let store = FileFeatureStore::open(&config.data_file).await.map_err(|e| {
        tracing::error!("Failed to open data file {}: {}", config.data_file.display(), e);
        e
    })?;
    let state = Arc::new(AppState::new(Arc::new(store)));

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await?;
    Ok(())
}
