//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service and export layers for the actual work.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use super::dto::{
    ClearResponse, ExportStartedResponse, GenerationResultRequest, HealthResponse,
    JobStatusResponse, SessionSummary, TimetableListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{Category, RenderedGrid, TableId};
use crate::export::batch::build_artifact;
use crate::export::sink::CSV_MIME_TYPE;
use crate::models::grid::RawTimetableSet;
use crate::models::response::GenerationResponse;
use crate::services::job_tracker::track_export;
use crate::services::render::render_table;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let session = if state.session.is_loaded() {
        "loaded"
    } else {
        "empty"
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        session: session.to_string(),
    }))
}

// =============================================================================
// Session
// =============================================================================

/// PUT /v1/timetables
///
/// Replace the session dataset with the raw set in the body.
pub async fn put_timetables(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> HandlerResult<SessionSummary> {
    let dataset = RawTimetableSet::from_value(&body)?;
    let snapshot = state.session.replace(dataset);
    Ok(Json(SessionSummary::from(snapshot.as_ref())))
}

/// POST /v1/generation-result
///
/// Apply what the solver backend answered. A failure empties the session and
/// is reported with the backend's message.
pub async fn post_generation_result(
    State(state): State<AppState>,
    Json(request): Json<GenerationResultRequest>,
) -> HandlerResult<SessionSummary> {
    let response = match &request.body {
        Value::String(text) => GenerationResponse::from_body(request.success, text),
        body => GenerationResponse::from_value(request.success, body),
    };
    let response = match response {
        Ok(response) => response,
        Err(e) => {
            state.session.clear();
            return Err(e.into());
        }
    };
    let snapshot = state.session.apply_generation(response)?;
    Ok(Json(SessionSummary::from(snapshot.as_ref())))
}

/// DELETE /v1/timetables
pub async fn delete_timetables(State(state): State<AppState>) -> HandlerResult<ClearResponse> {
    Ok(Json(ClearResponse {
        cleared: state.session.clear(),
    }))
}

// =============================================================================
// Timetables
// =============================================================================

/// GET /v1/timetables
///
/// Categorized listing of the current dataset.
pub async fn list_timetables(
    State(state): State<AppState>,
) -> HandlerResult<TimetableListResponse> {
    let snapshot = state.session.require()?;
    Ok(Json(TimetableListResponse::from(snapshot.as_ref())))
}

/// GET /v1/timetables/{table_id}
///
/// Render model of one table.
pub async fn get_timetable(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> HandlerResult<RenderedGrid> {
    let snapshot = state.session.require()?;
    let rendered = render_table(snapshot.dataset(), &TableId::new(table_id))?;
    Ok(Json(rendered))
}

/// GET /v1/timetables/{table_id}/csv
///
/// Download one table as a CSV attachment.
pub async fn get_timetable_csv(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> Result<Response, AppError> {
    let snapshot = state.session.require()?;
    let artifact = build_artifact(
        snapshot.dataset(),
        &TableId::new(table_id),
        state.exporter.naming(),
    )?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        artifact.file_name().replace('"', "'")
    );
    Ok((
        [
            (header::CONTENT_TYPE, CSV_MIME_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.content,
    )
        .into_response())
}

// =============================================================================
// Exports
// =============================================================================

/// POST /v1/exports/{category}
///
/// Start a spaced-out export of every table in a category. Returns a job ID
/// for tracking progress.
pub async fn start_export(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<(StatusCode, Json<ExportStartedResponse>), AppError> {
    let category: Category = category.parse().map_err(AppError::BadRequest)?;
    let snapshot = state.session.require()?;

    let handle = state
        .exporter
        .export_category(&snapshot, category, state.sink.clone());
    let scheduled = handle.scheduled();
    let job_id = state.job_tracker.create_job(category, scheduled);

    tokio::spawn(track_export(
        state.job_tracker.clone(),
        job_id.clone(),
        handle,
    ));

    Ok((
        StatusCode::ACCEPTED,
        Json(ExportStartedResponse {
            message: format!(
                "Export of {} {} started. Track progress at /v1/jobs/{}",
                scheduled,
                category.label(),
                job_id
            ),
            job_id,
            category,
            scheduled,
        }),
    ))
}

/// GET /v1/jobs/{job_id}
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> HandlerResult<JobStatusResponse> {
    let job = state
        .job_tracker
        .get_job(&job_id)
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

    Ok(Json(JobStatusResponse {
        pending: job.pending(),
        job_id: job.job_id,
        category: job.category,
        status: job.status,
        scheduled: job.scheduled,
        delivered: job.delivered,
        failed: job.failed,
        logs: job.logs,
    }))
}
