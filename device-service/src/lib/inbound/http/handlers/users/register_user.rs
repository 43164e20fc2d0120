use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::role::errors::RoleIdError;
use crate::domain::role::models::RoleId;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RegisteredUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;

pub async fn register_user(
    State(state): State<AppState>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterUserResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(StatusCode::OK, "User registered successfully", user.into())
        })
}

/// HTTP request body for self-registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    password: String,
    role: i32,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterUserRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] DisplayNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Password is required")]
    EmptyPassword,

    #[error("Invalid role: {0}")]
    Role(#[from] RoleIdError),
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterUserRequestError> {
        if self.password.is_empty() {
            return Err(ParseRegisterUserRequestError::EmptyPassword);
        }

        Ok(RegisterUserCommand {
            name: DisplayName::new(self.name)?,
            email: EmailAddress::new(self.email)?,
            password: self.password,
            role_id: RoleId::try_from(self.role)?,
        })
    }
}

impl From<ParseRegisterUserRequestError> for ApiError {
    fn from(err: ParseRegisterUserRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterUserResponseData {
    pub name: String,
    pub email: String,
}

impl From<&RegisteredUser> for RegisterUserResponseData {
    fn from(user: &RegisteredUser) -> Self {
        Self {
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}
