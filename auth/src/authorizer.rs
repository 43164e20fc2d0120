use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::jwt::TokenCodec;
use crate::jwt::TokenError;

const BEARER_PREFIX: &str = "Bearer ";

/// Role names permitted on a route, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedRoles(Arc<[String]>);

impl AllowedRoles {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(roles.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, role_name: &str) -> bool {
        self.0.iter().any(|allowed| allowed == role_name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Identity admitted through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Email from the `employee_name` claim, when the token carries one
    pub identity: Option<String>,
    pub role_name: String,
}

/// Why a request was turned away.
///
/// Every variant is reported to clients as 401; the variant itself is kept
/// for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("Invalid token format")]
    MalformedHeader,

    #[error("Token expired or invalid")]
    InvalidOrExpiredToken(#[source] TokenError),

    #[error("Role information is missing from token")]
    MissingRoleClaim,

    #[error("Forbidden: you don't have the required role")]
    InsufficientRole { role_name: String },
}

/// Request-boundary gate: bearer extraction, token validation and role
/// allow-list check.
///
/// Performs no I/O; the role is trusted from the token claim.
#[derive(Clone)]
pub struct RequestAuthorizer {
    token_codec: TokenCodec,
}

impl RequestAuthorizer {
    pub fn new(token_codec: TokenCodec) -> Self {
        Self { token_codec }
    }

    /// Decide whether a request may reach a route guarded by `allowed_roles`.
    ///
    /// # Arguments
    /// * `authorization` - Raw `Authorization` header value, if any
    /// * `allowed_roles` - Allow-list registered for the route
    /// * `now` - Instant used for the expiry check
    ///
    /// # Returns
    /// The admitted principal
    ///
    /// # Errors
    /// * `MalformedHeader` - Header absent or not `Bearer <token>`
    /// * `InvalidOrExpiredToken` - Codec rejected the token
    /// * `MissingRoleClaim` - Token carries no usable `role_name`
    /// * `InsufficientRole` - Role not in `allowed_roles`
    pub fn authorize(
        &self,
        authorization: Option<&str>,
        allowed_roles: &AllowedRoles,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthorizationError> {
        let token = authorization
            .and_then(|header| header.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthorizationError::MalformedHeader)?;

        let claims = self
            .token_codec
            .validate(token, now)
            .map_err(AuthorizationError::InvalidOrExpiredToken)?;

        let role_name = claims
            .role_name
            .ok_or(AuthorizationError::MissingRoleClaim)?;

        if !allowed_roles.contains(&role_name) {
            return Err(AuthorizationError::InsufficientRole { role_name });
        }

        Ok(Principal {
            identity: claims.subject,
            role_name,
        })
    }
}
