use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::documents::{extract_text, DocumentKind};
use crate::errors::AppError;
use crate::review::actions::QuickAction;
use crate::session::models::{ChatSession, ChatTurn, Role};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ActionInfo {
    pub action: QuickAction,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub turns: Vec<ChatTurn>,
    pub has_resume: bool,
    pub has_job_description: bool,
    pub actions: Vec<ActionInfo>,
}

impl From<&ChatSession> for SessionResponse {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id,
            turns: session.turns().to_vec(),
            has_resume: session.resume_text().is_some(),
            has_job_description: session.job_description_text().is_some(),
            actions: QuickAction::ALL
                .into_iter()
                .map(|action| ActionInfo {
                    action,
                    label: action.label(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AcceptedDocument {
    pub kind: DocumentKind,
    pub chars: usize,
}

#[derive(Debug, Serialize)]
pub struct RejectedDocument {
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub accepted: Vec<AcceptedDocument>,
    pub rejected: Vec<RejectedDocument>,
    pub has_resume: bool,
    pub has_job_description: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: ChatTurn,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.sessions.create().await;
    Json(SessionResponse::from(&session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/documents
///
/// Multipart fields `resume` (PDF) and `job_description` (plain text). A
/// document that cannot be extracted is reported back and left absent, even
/// if an earlier upload of the same kind succeeded.
pub async fn handle_upload_documents(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    // Fail fast on an unknown session before reading any upload.
    state.sessions.get(id).await?;

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let Some(kind) = DocumentKind::from_field_name(&name) else {
            return Err(AppError::Validation(format!(
                "Unexpected upload field '{name}'; expected '{}' or '{}'",
                DocumentKind::Resume.field_name(),
                DocumentKind::JobDescription.field_name()
            )));
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;

        match extract_text(kind, bytes, state.config.max_upload_bytes).await {
            Ok(document) => {
                let chars = document.text().chars().count();
                state.sessions.set_document(id, document).await?;
                info!("Session {id}: stored {kind:?} ({chars} chars)");
                accepted.push(AcceptedDocument { kind, chars });
            }
            Err(e) => {
                warn!("Session {id}: rejected {kind:?}: {e}");
                state.sessions.clear_document(id, kind).await?;
                rejected.push(RejectedDocument {
                    field: name,
                    reason: e.to_string(),
                });
            }
        }
    }

    let session = state.sessions.get(id).await?;
    Ok(Json(UploadResponse {
        accepted,
        rejected,
        has_resume: session.resume_text().is_some(),
        has_job_description: session.job_description_text().is_some(),
    }))
}

/// POST /api/v1/sessions/:id/chat
///
/// Appends the user's message, asks the model with a bounded window of prior
/// turns, and appends the reply. A failed call is shown in the chat as text.
pub async fn handle_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    state.sessions.append_turn(id, Role::User, message).await?;
    let session = state.sessions.get(id).await?;

    let content = match state
        .pipeline
        .chat_reply(
            session.resume_text(),
            session.job_description_text(),
            &session.chat_history(),
            state.config.chat_memory_window,
        )
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!("Session {id}: chat reply failed: {e}");
            format!("Error: {e}")
        }
    };

    let reply = state.sessions.append_turn(id, Role::Assistant, content).await?;
    Ok(Json(ChatResponse { reply }))
}
