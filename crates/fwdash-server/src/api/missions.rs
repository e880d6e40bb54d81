//! Mission search endpoints.
//!
//! `count` and `refresh` call the job API and fold the result into the
//! shared dashboard state through tickets, so when two searches overlap
//! only the latest one lands. `list` reads the current state.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};
use chrono::{DateTime, Utc};
use fwdash_client::{build_query, ClientError};
use fwdash_core::{ExperienceFilter, JobRow, MinRateInput, RequestKind, SearchFilters, StateUpdate};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_client_error, map_rejection, ApiError, ApiResponse, AppState};

/// Search form, as query string (`count`) or JSON body (`refresh`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchParams {
    pub keywords: String,
    pub remote_full: bool,
    pub remote_partial: bool,
    pub remote_none: bool,
    pub min_rate: Option<MinRateInput>,
}

impl SearchParams {
    fn filters(&self) -> SearchFilters {
        SearchFilters {
            remote_full: self.remote_full,
            remote_partial: self.remote_partial,
            remote_none: self.remote_none,
            min_rate: self.min_rate.clone().and_then(MinRateInput::into_min_rate),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct MissionCount {
    pub total: u64,
    /// False when a newer count request superseded this one.
    pub applied: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct RefreshSummary {
    pub query: String,
    pub mission_count: u64,
    pub fetched: usize,
    pub fetched_at: DateTime<Utc>,
    /// False when a newer refresh superseded this one.
    pub applied: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct MissionList {
    pub total: usize,
    pub rows: Vec<JobRow>,
}

fn search_url(state: &AppState, req_id: &RequestId, params: &SearchParams) -> Result<Url, ApiError> {
    build_query(&state.config.api_base_url, &params.keywords, &params.filters())
        .map_err(|e| map_client_error(req_id.0.clone(), &e))
}

pub(super) async fn count_missions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ApiResponse<MissionCount>>, ApiError> {
    let Query(params) = params.map_err(|e| map_rejection(req_id.0.clone(), &e))?;
    let query = search_url(&state, &req_id, &params)?;
    let ticket = state.issue(RequestKind::Count).await;

    let total = state
        .client
        .fetch_count(&query)
        .await
        .map_err(|e| map_client_error(req_id.0.clone(), &e))?;

    let applied = state
        .apply(StateUpdate::CountLoaded { ticket, total })
        .await;

    Ok(ApiResponse::new(MissionCount { total, applied }, req_id))
}

pub(super) async fn refresh_missions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: Result<Json<SearchParams>, JsonRejection>,
) -> Result<Json<ApiResponse<RefreshSummary>>, ApiError> {
    let Json(params) = params.map_err(|e| map_rejection(req_id.0.clone(), &e))?;
    let query = search_url(&state, &req_id, &params)?;
    let count_ticket = state.issue(RequestKind::Count).await;
    let fetch_ticket = state.issue(RequestKind::Fetch).await;

    let result = async {
        let total = state.client.fetch_count(&query).await?;
        state
            .apply(StateUpdate::CountLoaded {
                ticket: count_ticket,
                total,
            })
            .await;
        let postings = state.client.fetch_all(&query, total).await?;
        Ok::<_, ClientError>((total, postings))
    }
    .await;

    match result {
        Ok((mission_count, postings)) => {
            let fetched = postings.len();
            let fetched_at = Utc::now();
            let applied = state
                .apply(StateUpdate::PostingsLoaded {
                    ticket: fetch_ticket,
                    postings,
                    fetched_at,
                })
                .await;
            tracing::info!(mission_count, fetched, applied, "missions refreshed");

            Ok(ApiResponse::new(
                RefreshSummary {
                    query: query.to_string(),
                    mission_count,
                    fetched,
                    fetched_at,
                    applied,
                },
                req_id,
            ))
        }
        Err(e) => {
            state
                .apply(StateUpdate::FetchFailed {
                    ticket: fetch_ticket,
                    message: e.to_string(),
                })
                .await;
            Err(map_client_error(req_id.0, &e))
        }
    }
}

pub(super) async fn list_missions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    flags: Result<Query<ExperienceFilter>, QueryRejection>,
) -> Result<Json<ApiResponse<MissionList>>, ApiError> {
    let Query(flags) = flags.map_err(|e| map_rejection(req_id.0.clone(), &e))?;
    let now = Utc::now();
    let dashboard = state.dashboard.read().await;
    let rows: Vec<JobRow> = dashboard
        .visible_postings(&flags)
        .into_iter()
        .map(|p| JobRow::from_posting(p, &state.config.detail_base_url, now))
        .collect();

    Ok(ApiResponse::new(
        MissionList {
            total: rows.len(),
            rows,
        },
        req_id,
    ))
}
