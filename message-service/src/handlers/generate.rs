use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::generator::GenerationError;
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    /// Raw day count. Kept as a string so the generator owns validation.
    pub days: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// GET /api/generate-message?days=N
pub async fn generate_message(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
) -> Result<Json<MessageResponse>, GenerationError> {
    let message = state
        .generator
        .generate_message(params.days.as_deref())
        .await?;

    Ok(Json(MessageResponse { message }))
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        let status = match &self {
            GenerationError::NotConfigured | GenerationError::EmptyResponse => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GenerationError::InvalidInput | GenerationError::BlockedOrEmpty(_) => {
                StatusCode::BAD_REQUEST
            }
            // Relay the provider's status when it supplied a usable one.
            GenerationError::Upstream { status, .. } => status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Message generation failed");
        } else {
            tracing::warn!(error = %self, "Message generation rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
