mod dashboard;
mod missions;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use fwdash_client::{ClientError, JobBoardClient};
use fwdash_core::{AppConfig, DashboardState, RequestKind, StateUpdate, Ticket};
use serde::Serialize;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<JobBoardClient>,
    pub config: Arc<AppConfig>,
    pub dashboard: Arc<RwLock<DashboardState>>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, ClientError> {
        let client = JobBoardClient::from_config(&config)?;
        Ok(Self {
            client: Arc::new(client),
            config,
            dashboard: Arc::new(RwLock::new(DashboardState::default())),
        })
    }

    pub(super) async fn issue(&self, kind: RequestKind) -> Ticket {
        let mut guard = self.dashboard.write().await;
        let (next, ticket) = std::mem::take(&mut *guard).issue(kind);
        *guard = next;
        ticket
    }

    /// Applies a completion and reports whether it was still current.
    pub(super) async fn apply(&self, update: StateUpdate) -> bool {
        let mut guard = self.dashboard.write().await;
        let current = guard.is_current(update.ticket());
        *guard = std::mem::take(&mut *guard).apply(update);
        current
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: RequestId) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(request_id.0),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a job API failure to an error envelope. Misconfiguration is ours
/// (500); everything else is the upstream's (502).
pub(super) fn map_client_error(request_id: String, error: &ClientError) -> ApiError {
    match error {
        ClientError::InvalidBaseUrl { .. } => {
            tracing::error!(error = %error, "job API base URL is misconfigured");
            ApiError::new(request_id, "internal_error", "job API is misconfigured")
        }
        _ => {
            tracing::error!(error = %error, "job API request failed");
            ApiError::new(request_id, "upstream_error", error.to_string())
        }
    }
}

/// Turns an extractor rejection (bad query string, malformed JSON body)
/// into a `bad_request` envelope.
pub(super) fn map_rejection(request_id: String, rejection: &impl std::fmt::Display) -> ApiError {
    tracing::debug!(error = %rejection, "rejected request input");
    ApiError::new(request_id, "bad_request", rejection.to_string())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/missions", get(missions::list_missions))
        .route("/api/v1/missions/count", get(missions::count_missions))
        .route("/api/v1/missions/refresh", post(missions::refresh_missions))
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    ApiResponse::new(HealthData { status: "ok" }, req_id)
}

async fn not_found(Extension(req_id): Extension<RequestId>) -> ApiError {
    ApiError::new(req_id.0, "not_found", "no such route")
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
