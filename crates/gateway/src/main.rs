//! Literature Explorer API Gateway
//!
//! HTTP surface for the dashboard:
//! - Paper listing and direct ingestion
//! - Query-driven discovery with placeholder fallback
//! - Recommendations, trend analysis, citation graph
//! - Observability (logging, metrics, request ids)

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use litexplorer_common::{
    config::{AppConfig, ObservabilityConfig},
    metrics::{self, METRICS_PREFIX, MODEL_BUCKETS, STORE_BUCKETS},
    Explorer,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub explorer: Arc<Explorer>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.observability);

    info!("Starting Literature Explorer gateway v{}", litexplorer_common::VERSION);

    init_metrics(&config.observability)?;

    let explorer = Explorer::from_config(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to open record store");
        e
    })?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState {
        config: Arc::new(config),
        explorer: Arc::new(explorer),
    };

    let app = create_router(state);

    info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Install the Prometheus exporter; port 0 disables it
fn init_metrics(config: &ObservabilityConfig) -> anyhow::Result<()> {
    if config.metrics_port == 0 {
        info!("Metrics exporter disabled");
        return Ok(());
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(
            Matcher::Full(format!("{}_model_duration_seconds", METRICS_PREFIX)),
            MODEL_BUCKETS,
        )?
        .set_buckets_for_metric(
            Matcher::Full(format!("{}_store_duration_seconds", METRICS_PREFIX)),
            STORE_BUCKETS,
        )?
        .install()?;

    metrics::register_metrics();
    info!(%addr, "Metrics exporter listening");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();
    let timeout = TimeoutLayer::new(state.config.request_timeout());

    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route(
            "/papers",
            get(handlers::papers::list_papers).post(handlers::papers::ingest_paper),
        )
        .route("/discover", post(handlers::discover::discover))
        .route("/recommendations", get(handlers::insights::recommendations))
        .route("/trends", get(handlers::insights::trends))
        .route("/citations", get(handlers::citations::summary))
        .route("/citations/paper", get(handlers::citations::paper_citations));

    Router::new()
        .nest("/v1", api_routes)
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(propagate_id)
        .layer(request_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
