use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use fwdash_core::DashboardStats;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct DashboardData {
    pub mission_count: Option<u64>,
    pub fetched_at: Option<DateTime<Utc>>,
    /// Message of the latest failed fetch; the stats below predate it.
    pub last_error: Option<String>,
    pub posting_count: usize,
    pub stats: DashboardStats,
}

pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<DashboardData>> {
    let dashboard = state.dashboard.read().await;
    let data = DashboardData {
        mission_count: dashboard.mission_count(),
        fetched_at: dashboard.fetched_at(),
        last_error: dashboard.last_error().map(str::to_owned),
        posting_count: dashboard.postings().len(),
        stats: dashboard.stats().clone(),
    };
    ApiResponse::new(data, req_id)
}
