use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::credentials::errors::CredentialError;

pub mod login;
pub mod profile;
pub mod register;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";
pub const DUPLICATE_USERNAME_MESSAGE: &str = "Username already taken";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const INVALID_BODY_MESSAGE: &str = "Request body is missing a field or has a field of the wrong type";
pub const MALFORMED_BODY_MESSAGE: &str = "Request body is not valid JSON";
pub const CONTENT_TYPE_MESSAGE: &str = "Expected request with `Content-Type: application/json`";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// HTTP-facing error.
///
/// `InternalServerError` carries a detail for the server log only; the
/// client always receives the generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        if err.is_internal() {
            return ApiError::InternalServerError(err.to_string());
        }

        match err {
            CredentialError::InvalidUsername(_) | CredentialError::InvalidPassword(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            CredentialError::DuplicateUsername(_) => {
                ApiError::BadRequest(DUPLICATE_USERNAME_MESSAGE.to_string())
            }
            CredentialError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            CredentialError::Unauthorized(_) => {
                ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
            }
            _ => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Body rejections keep the envelope and never echo deserializer detail.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Request body rejected");

        match rejection {
            JsonRejection::JsonDataError(_) => {
                ApiError::UnprocessableEntity(INVALID_BODY_MESSAGE.to_string())
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::BadRequest(CONTENT_TYPE_MESSAGE.to_string())
            }
            _ => ApiError::BadRequest(MALFORMED_BODY_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
