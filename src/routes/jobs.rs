use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};

use crate::dto::job_dto::{JobLogQuery, MetricsQuery, RunJobResponse};
use crate::error::Result;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/admin/jobs",
    params(("limit" = Option<i64>, Query, description = "Rows to return, newest first (default 50)")),
    responses((status = 200, description = "Recent job log rows"))
)]
#[axum::debug_handler]
pub async fn list_job_logs(
    State(state): State<AppState>,
    Query(query): Query<JobLogQuery>,
) -> Result<impl IntoResponse> {
    let logs = state.job_log_service.recent(query.effective_limit()).await?;
    Ok(Json(logs))
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs/{name}/run",
    params(("name" = String, Path, description = "Job name")),
    responses(
        (status = 200, description = "Job ran to completion"),
        (status = 400, description = "Unknown job"),
        (status = 500, description = "Job failed")
    )
)]
#[axum::debug_handler]
pub async fn run_job(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse> {
    let outcome = state.jobs.trigger(&name).await?;
    Ok(Json(RunJobResponse {
        message: format!("Job {} executed successfully", name),
        status: outcome.status().to_string(),
        details: outcome.details().to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs/schedule",
    responses((status = 200, description = "Every job with its schedule and next run time"))
)]
#[axum::debug_handler]
pub async fn list_schedule(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.jobs.schedule_summary())
}

#[utoipa::path(
    get,
    path = "/api/admin/metrics",
    params(("limit" = Option<i64>, Query, description = "Snapshots to return, newest first (default 30)")),
    responses((status = 200, description = "Daily metric snapshots"))
)]
#[axum::debug_handler]
pub async fn list_metrics(
    State(state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> Result<impl IntoResponse> {
    let limit = query.limit.unwrap_or(30).clamp(1, 366);
    let rows = state.jobs.context().metrics.recent_snapshots(limit).await?;
    Ok(Json(rows))
}
