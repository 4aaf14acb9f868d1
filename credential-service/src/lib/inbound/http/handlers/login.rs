use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credentials::models::LoginCommand;
use crate::credentials::models::SessionToken;
use crate::credentials::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<S: CredentialServicePort>(
    State(state): State<AppState<S>>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;
    let command = LoginCommand::new(body.username, body.password)?;

    state
        .credential_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl From<SessionToken> for LoginResponseData {
    fn from(token: SessionToken) -> Self {
        Self {
            token: token.access_token,
            token_type: token.token_type.to_string(),
            expires_at: token.expires_at,
        }
    }
}
