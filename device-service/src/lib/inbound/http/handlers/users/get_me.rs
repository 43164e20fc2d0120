use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::UserProfileData;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Profile of the caller, resolved from the identity in its token.
pub async fn get_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserProfileData>, ApiError> {
    let email = user
        .email
        .ok_or_else(|| ApiError::Unauthorized("Identity is missing from token".to_string()))
        .and_then(|email| {
            EmailAddress::new(email).map_err(|e| ApiError::Unauthorized(e.to_string()))
        })?;

    state
        .user_service
        .get_profile(&email)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| {
            ApiSuccess::new(StatusCode::OK, "User retrieved successfully", profile.into())
        })
}
