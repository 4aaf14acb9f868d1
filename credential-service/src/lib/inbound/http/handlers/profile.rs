use axum::http::StatusCode;
use axum::Extension;
use chrono::SecondsFormat;
use serde::Serialize;

use super::ApiSuccess;
use crate::credentials::models::Principal;
use crate::inbound::http::middleware::RequestTime;

/// Example protected endpoint: greets the authenticated principal.
pub async fn get_profile(
    Extension(principal): Extension<Principal>,
    Extension(RequestTime(request_time)): Extension<RequestTime>,
) -> ApiSuccess<ProfileResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        ProfileResponseData {
            message: format!("Welcome {}", principal.username),
            user_id: principal.id.to_string(),
            request_time: request_time.to_rfc3339_opts(SecondsFormat::Millis, true),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub message: String,
    pub user_id: String,
    pub request_time: String,
}
