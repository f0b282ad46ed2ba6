//! Grade Prediction API Server
//!
//! REST API that accepts a submitted student record and reports the
//! trained classifier's passing probability.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod routes;
mod settings;

pub use error::{ApiError, ErrorBody};
pub use settings::{
    load_config, ApiConfig, LoggingConfig, MetricsConfig, ModelConfig, ServerConfig,
    ValidationSettings, DEFAULT_CONFIG_FILE,
};

use data_validator::Validator;
use inference_engine::{GradePipeline, InferenceEngine};

/// Application state shared across handlers
///
/// Read-only once the server starts, so no lock is needed.
pub struct AppState {
    /// Feature pipeline and loaded classifier
    pub pipeline: GradePipeline,
    /// Boundary range checks
    pub validator: Validator,
    /// Whether range checks run before prediction
    pub validate: bool,
    /// Prometheus handle when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(pipeline: GradePipeline, validation: ValidationSettings) -> Self {
        Self {
            pipeline,
            validator: Validator::new(validation.ranges),
            validate: validation.enabled,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Attach a Prometheus handle for `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelHealth,
}

/// Classifier health
#[derive(Debug, Serialize)]
pub struct ModelHealth {
    pub status: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/schema", get(routes::schema::get_schema))
        .route("/api/v1/encode", post(routes::predict::encode))
        .route("/api/v1/predict", post(routes::predict::predict))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let engine = state.pipeline.engine();
    let (status, model_status) = if engine.is_loaded() {
        ("healthy", "ok")
    } else {
        ("degraded", "unavailable")
    };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelHealth {
            status: model_status.to_string(),
            path: engine.model_path().to_string(),
            error: engine.load_error().map(str::to_string),
        },
    })
}

/// Prometheus scrape handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Parse a configured log level such as `info` or `DEBUG`
fn parse_level(level: &str) -> anyhow::Result<Level> {
    Level::from_str(level).map_err(|_| anyhow::anyhow!("invalid logging.level '{}'", level))
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let level = parse_level(&config.level)?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Load the classifier and assemble the shared state
pub fn build_state(config: &ApiConfig) -> anyhow::Result<AppState> {
    let layout = feature_engine::FeatureLayout::default();
    let engine = InferenceEngine::load(
        &config.model.path,
        layout.width(),
        config.model.probability_output,
    );

    if let Some(reason) = engine.load_error() {
        if config.model.required {
            anyhow::bail!("model {} is required: {}", config.model.path, reason);
        }
        error!("Serving without a model; predictions will fail: {}", reason);
    }

    let pipeline = GradePipeline::standard(engine);
    let mut state = AppState::new(pipeline, config.validation.clone());

    if config.metrics.enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        state = state.with_metrics(handle);
    }

    Ok(state)
}

/// Run the server
pub async fn run_server(config: ApiConfig) -> anyhow::Result<()> {
    let state = Arc::new(build_state(&config)?);
    let app = create_router(state);

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
