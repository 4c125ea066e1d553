//! Axum handlers for the session API.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::application::handlers as use_cases;
use crate::application::{AppContext, AppError};
use crate::domain::foundation::{ErrorCode, SessionId};
use crate::ports::SessionStoreError;

use super::dto::{
    ErrorResponse, HealthResponse, SendMessageRequest, SessionOpenedResponse, SessionResponse,
    TurnResponse,
};

/// Application error carried to the transport boundary.
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            AppError::Domain(err) => {
                let status = match err.code {
                    ErrorCode::SessionNotFound | ErrorCode::ServiceNotFound => {
                        StatusCode::NOT_FOUND
                    }
                    ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
                    ErrorCode::SessionEnded => StatusCode::GONE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.code.to_string())
            }
            AppError::Store(SessionStoreError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND".to_string())
            }
            AppError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR".to_string(),
            ),
            AppError::EmptyMessage => (StatusCode::BAD_REQUEST, "EMPTY_MESSAGE".to_string()),
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %self.0, "request failed");
        }

        let body = ErrorResponse {
            code,
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn create_session(
    State(ctx): State<AppContext>,
) -> Result<(StatusCode, Json<SessionOpenedResponse>), ApiError> {
    let opened = use_cases::start_session(&ctx).await?;
    Ok((StatusCode::CREATED, Json(opened.into())))
}

pub async fn send_message(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
    let reply = use_cases::send_message(&ctx, SessionId::from_uuid(id), &body.message).await?;
    Ok(Json(reply.into()))
}

pub async fn get_session(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let view = use_cases::get_session(&ctx, SessionId::from_uuid(id)).await?;
    Ok(Json(view.into()))
}

pub async fn end_session(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    use_cases::end_session(&ctx, SessionId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    let active = match ctx.sessions.list_ids().await {
        Ok(ids) => ids.len(),
        Err(_) => 0,
    };
    Json(HealthResponse {
        status: "ok",
        ai_enabled: ctx.ai.is_some(),
        sessions: ctx.stats.snapshot(active),
    })
}
