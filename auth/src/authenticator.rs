use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::config::TokenConfig;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Holds no per-call state; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(config),
            token_ttl: config.ttl(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - The caller must abort instead of storing anything
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against the stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the stored hash is unusable)
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(stored_hash, password) {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Issue an access token for an already verified identity.
    ///
    /// # Errors
    /// * `Token` - Token generation failed
    pub fn issue_token(
        &self,
        identity: &str,
        role_name: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let access_token = self
            .token_codec
            .issue(identity, role_name, now, self.token_ttl)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at: now + self.token_ttl,
        })
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Hash held by the credential store
    /// * `identity` - Identity embedded in the token (email address)
    /// * `role_name` - Role embedded in the token
    /// * `now` - Issuance instant
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the stored hash is unusable)
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &str,
        role_name: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.verify_password(password, stored_hash)?;
        self.issue_token(identity, role_name, now)
    }

    pub fn token_codec(&self) -> &TokenCodec {
        &self.token_codec
    }
}
