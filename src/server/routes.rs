//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::error::Error;
use crate::format::{available_formats, FormatInfo};
use crate::geo::{GeoBackend, ResolvedLocation};
use crate::imagery::ImageryBackend;
use crate::notice::Notice;
use crate::pipeline::{Display, Exploration};
use crate::server::state::AppState;
use crate::speech::{check_environment, SpeechErrorCode};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Create the API router
pub fn create_router<G, I>(state: Arc<AppState<G, I>>) -> Router
where
    G: GeoBackend + 'static,
    I: ImageryBackend + 'static,
{
    // Try relative to cwd first, then next to the executable
    let static_path = if std::path::Path::new("static").exists() {
        "static".to_string()
    } else {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
            .filter(|path| path.exists())
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_else(|| "static".to_string())
    };

    Router::new()
        .route("/api/explore", post(explore_handler::<G, I>))
        .route("/api/nearby", post(nearby_handler::<G, I>))
        .route("/api/session", get(session_handler::<G, I>))
        .route("/api/status", get(status_handler::<G, I>))
        .route("/api/formats", get(formats_handler))
        .route("/api/speech/error", post(speech_error_handler::<G, I>))
        .route("/api/environment", get(environment_handler::<G, I>))
        .fallback_service(ServeDir::new(&static_path).append_index_html_on_directories(true))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    pub notice: Notice,
    #[serde(skip, default = "default_status")]
    pub status: StatusCode,
}

fn default_status() -> StatusCode {
    StatusCode::BAD_REQUEST
}

impl ApiError {
    /// Error for a failed search of `query`
    pub fn for_query(query: &str, err: Error) -> Self {
        let notice = Notice::for_error(query, &err);
        Self::with_notice(err, notice)
    }

    fn with_notice(err: Error, notice: Notice) -> Self {
        let status = match &err {
            Error::NotFound(_) | Error::NoImagery { .. } => StatusCode::NOT_FOUND,
            Error::NoActiveLocation => StatusCode::CONFLICT,
            Error::Auth(_) | Error::Network { .. } | Error::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError {
            error: err.to_string(),
            code: err.code().to_string(),
            notice,
            status,
        }
    }

    fn dismiss_after(mut self, secs: u64) -> Self {
        self.notice = self.notice.dismiss_after(secs);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let notice = Notice::new(err.to_string());
        Self::with_notice(err, notice)
    }
}

/// Explore request body
#[derive(Debug, Deserialize)]
pub struct ExploreRequest {
    /// Transcript or typed place name
    pub query: String,
}

/// Resolve a place name and find imagery for it
///
/// POST /api/explore
async fn explore_handler<G: GeoBackend, I: ImageryBackend>(
    State(state): State<Arc<AppState<G, I>>>,
    Json(req): Json<ExploreRequest>,
) -> Result<Json<Exploration>, ApiError> {
    let exploration = state.explorer.explore(&req.query).await.map_err(|e| {
        warn!("Explore \"{}\" failed: {}", req.query, e);
        ApiError::for_query(&req.query, e).dismiss_after(state.config.notices.dismiss_secs)
    })?;

    state.set_current(exploration.display.location.clone()).await;
    Ok(Json(exploration))
}

/// Nearby response
#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Move to the next nearby area with imagery
///
/// POST /api/nearby
async fn nearby_handler<G: GeoBackend, I: ImageryBackend>(
    State(state): State<Arc<AppState<G, I>>>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let dismiss_secs = state.config.notices.dismiss_secs;
    let session = state.session().await;
    let anchor = session
        .anchor()
        .map_err(|e| ApiError::from(e).dismiss_after(dismiss_secs))?;

    let next = state.explorer.next_near_area(&session).await.map_err(|e| {
        warn!("Nearby search around \"{}\" failed: {}", anchor.label, e);
        ApiError::for_query(&anchor.label, e).dismiss_after(dismiss_secs)
    })?;

    match next {
        Some(stop) => {
            info!("Moving to {}", stop.location.label);
            state.set_current(stop.location.clone()).await;
            Ok(Json(NearbyResponse {
                found: true,
                display: Some(stop),
                notice: None,
            }))
        }
        None => Ok(Json(NearbyResponse {
            found: false,
            display: None,
            notice: Some(state.notice(Notice::no_nearby(&anchor.label))),
        })),
    }
}

/// Current location
///
/// GET /api/session
async fn session_handler<G: GeoBackend, I: ImageryBackend>(
    State(state): State<Arc<AppState<G, I>>>,
) -> Json<Option<ResolvedLocation>> {
    Json(state.current().await)
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Whether an imagery access token is set
    pub imagery_configured: bool,
    /// Location currently shown
    pub current: Option<ResolvedLocation>,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler<G: GeoBackend, I: ImageryBackend>(
    State(state): State<Arc<AppState<G, I>>>,
) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        imagery_configured: state.config.imagery_configured(),
        current: state.current().await,
    })
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}

/// Speech error report
#[derive(Debug, Deserialize)]
pub struct SpeechErrorRequest {
    pub code: SpeechErrorCode,
}

/// Turn a recognizer error code into a notice
///
/// POST /api/speech/error
async fn speech_error_handler<G: GeoBackend, I: ImageryBackend>(
    State(state): State<Arc<AppState<G, I>>>,
    Json(req): Json<SpeechErrorRequest>,
) -> Json<Notice> {
    warn!("Speech recognition error: {}", req.code.as_str());
    Json(state.notice(req.code.notice()))
}

/// Environment query parameters
#[derive(Debug, Deserialize)]
pub struct EnvironmentQuery {
    /// Page was served from a secure context
    #[serde(default)]
    pub secure: bool,
    /// Page hostname
    #[serde(default)]
    pub host: String,
    /// Browser exposes a speech recognizer
    #[serde(default = "default_speech")]
    pub speech: bool,
}

fn default_speech() -> bool {
    true
}

/// Environment check response
#[derive(Debug, Serialize, Deserialize)]
pub struct EnvironmentResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Whether voice capture may start
///
/// GET /api/environment?secure=&host=
async fn environment_handler<G: GeoBackend, I: ImageryBackend>(
    State(state): State<Arc<AppState<G, I>>>,
    Query(query): Query<EnvironmentQuery>,
) -> Json<EnvironmentResponse> {
    match check_environment(query.speech, query.secure, &query.host) {
        Ok(()) => Json(EnvironmentResponse {
            allowed: true,
            notice: None,
        }),
        Err(e) => Json(EnvironmentResponse {
            allowed: false,
            notice: Some(state.notice(Notice::new(e.to_string()))),
        }),
    }
}
