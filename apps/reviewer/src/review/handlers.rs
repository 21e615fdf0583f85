//! Axum route handlers for the review operations.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::review::actions::{run_action, QuickAction};
use crate::review::report::{Report, ReportSummary};
use crate::session::models::{ChatTurn, Role};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: Report,
    pub summary: ReportSummary,
    pub turn: ChatTurn,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub action: QuickAction,
    pub report: Option<Report>,
    pub turn: ChatTurn,
}

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct RespondResponse {
    pub response: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/report
///
/// Runs the detailed report over whatever documents the session has and
/// appends it as one assistant turn. Missing documents show up as skipped
/// sections rather than an error.
pub async fn handle_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportResponse>, AppError> {
    let session = state.sessions.get(id).await?;

    let report = state
        .pipeline
        .generate_report(session.resume_text(), session.job_description_text())
        .await?;

    let turn = state
        .sessions
        .append_turn(id, Role::Assistant, report.to_markdown())
        .await?;

    Ok(Json(ReportResponse {
        summary: report.summary(),
        report,
        turn,
    }))
}

/// POST /api/v1/sessions/:id/actions/:action
pub async fn handle_action(
    State(state): State<AppState>,
    Path((id, action)): Path<(Uuid, String)>,
) -> Result<Json<ActionResponse>, AppError> {
    let action: QuickAction = action.parse().map_err(AppError::Validation)?;
    let session = state.sessions.get(id).await?;

    info!("Session {id}: running action {action}");
    let output = run_action(
        &state.pipeline,
        action,
        session.resume_text(),
        session.job_description_text(),
    )
    .await?;

    let turn = state
        .sessions
        .append_turn(id, Role::Assistant, output.to_markdown())
        .await?;

    Ok(Json(ActionResponse {
        action,
        report: output.report().cloned(),
        turn,
    }))
}

/// POST /api/v1/respond
///
/// Stateless free-form query against the reviewer persona.
pub async fn handle_respond(
    State(state): State<AppState>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<RespondResponse>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let response = state.pipeline.generate_response(&request.prompt).await;
    Ok(Json(RespondResponse { response }))
}
