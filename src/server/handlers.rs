use super::types::{ErrorResponse, ExportQuery, SubmitMessageRequest, SubmitMessageResponse};
use crate::chat::ChatService;
use crate::session::{Conversation, ConversationSummary, ExportFormat, RiskLevel};
use crate::Error;
use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(e: Error) -> HandlerError {
    let status = match &e {
        Error::EmptyMessage | Error::UnknownExportFormat(_) => StatusCode::BAD_REQUEST,
        Error::SessionNotFound { .. } => StatusCode::NOT_FOUND,
        Error::LastSessionDelete { .. } | Error::ResponsePending { .. } => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Request failed: {}", e);
    } else {
        warn!("Request rejected: {}", e);
    }

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<Conversation>) {
    let conversation = state.chat.create_conversation().await;
    info!("Created session {}", conversation.id);
    (StatusCode::CREATED, Json(conversation))
}

pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<ConversationSummary>> {
    Json(state.chat.list_conversations().await)
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Conversation>, HandlerError> {
    state
        .chat
        .conversation(id)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn activate_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    state
        .chat
        .set_active_conversation(id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    state
        .chat
        .delete_conversation(id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

pub async fn submit_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitMessageRequest>,
) -> Result<Json<SubmitMessageResponse>, HandlerError> {
    let exchange = state
        .chat
        .submit_user_message(id, &request.content)
        .await
        .map_err(error_response)?;

    let crisis_banner = (exchange.risk_level == RiskLevel::Crisis)
        .then(|| state.chat.crisis_banner().to_string());

    Ok(Json(SubmitMessageResponse {
        session_id: id,
        user_message: exchange.user_message,
        reply: exchange.reply,
        risk_level: exchange.risk_level,
        crisis_banner,
    }))
}

pub async fn export_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, HandlerError> {
    let format: ExportFormat = query.format.parse().map_err(error_response)?;
    let body = state
        .chat
        .export_conversation(id, format)
        .await
        .map_err(error_response)?;

    let content_type = match format {
        ExportFormat::Json => "application/json",
        ExportFormat::Text => "text/plain; charset=utf-8",
    };

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}
