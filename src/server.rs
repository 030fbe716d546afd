use crate::alphabet::{Alphabet, CAPTCHA_LENGTH};
use crate::config::Config;
use crate::error::CaptchaError;
use crate::preprocessing::{MODEL_INPUT_HEIGHT, MODEL_INPUT_WIDTH};
use crate::solver::CaptchaSolver;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub solver: Arc<CaptchaSolver>,
    pub config: Arc<Config>,
}

/// Solve response
#[derive(Serialize)]
pub struct SolveResponse {
    pub text: String,
    pub complete: bool,
    pub processing_time_ms: u64,
    pub warnings: Vec<String>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub model: String,
    pub alphabet: String,
    pub captcha_length: usize,
    pub input_width: u32,
    pub input_height: u32,
    pub max_file_size_bytes: usize,
}

/// Build the application router around shared state.
pub fn router(state: AppState) -> Router {
    let max_file_size = state.config.max_file_size;

    Router::new()
        .route("/solve", post(handle_solve))
        .route("/health", get(handle_health))
        .route("/info", get(handle_info))
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    let model = crate::model::load_model(&config)?;
    let solver = CaptchaSolver::new(model);
    let addr = format!("{}:{}", config.host, config.port);

    let state = AppState {
        solver: Arc::new(solver),
        config: Arc::new(config),
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Handle captcha solve requests
async fn handle_solve(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SolveResponse>, CaptchaError> {
    let start = Instant::now();

    let mut file_data: Option<Bytes> = None;

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CaptchaError::InvalidRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                file_data = Some(field.bytes().await.map_err(|e| {
                    CaptchaError::InvalidRequest(format!("Failed to read file data: {}", e))
                })?);
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    // Validate file was provided
    let data = file_data.ok_or(CaptchaError::MissingFile)?;

    // Check file size
    if data.len() > state.config.max_file_size {
        return Err(CaptchaError::ImageTooLarge {
            size: data.len(),
            max: state.config.max_file_size,
        });
    }

    // The browser-automation collaborator screenshots the captcha as PNG;
    // write it to a temp file and solve from the path, the same entry point
    // a batch caller would use.
    let mut temp_file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .map_err(|e| CaptchaError::Internal(format!("Failed to create temp file: {}", e)))?;

    temp_file
        .write_all(&data)
        .map_err(|e| CaptchaError::Internal(format!("Failed to write temp file: {}", e)))?;

    let result = state.solver.solve_path(temp_file.path())?;

    let processing_time_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        "Captcha solved in {}ms, length: {}, complete: {}",
        processing_time_ms,
        result.text.chars().count(),
        result.is_complete()
    );

    Ok(Json(SolveResponse {
        complete: result.is_complete(),
        text: result.text,
        processing_time_ms,
        warnings: result.warnings,
    }))
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle info requests
async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.solver.model_name().to_string(),
        alphabet: Alphabet.symbols(),
        captcha_length: CAPTCHA_LENGTH,
        input_width: MODEL_INPUT_WIDTH,
        input_height: MODEL_INPUT_HEIGHT,
        max_file_size_bytes: state.config.max_file_size,
    })
}
