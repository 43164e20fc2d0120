//! Authentication and authorization primitives for the device service.
//!
//! - Password hashing (Argon2id)
//! - Access token issuance and validation (HS256 JWT)
//! - Login coordination (verify password, issue token)
//! - Request authorization against per-route role allow-lists
//!
//! Nothing here touches storage: the credential store lives in the service
//! and hands this crate stored hashes and role names.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password"));
//! ```
//!
//! ## Login and Request Authorization
//! ```
//! use auth::{AllowedRoles, Authenticator, RequestAuthorizer, TokenConfig};
//! use chrono::{Duration, Utc};
//!
//! let config = TokenConfig::new(b"secret_key_at_least_32_bytes_long!".to_vec(), Duration::hours(24));
//! let authenticator = Authenticator::new(&config);
//! let authorizer = RequestAuthorizer::new(authenticator.token_codec().clone());
//!
//! let hash = authenticator.hash_password("password123").unwrap();
//! let now = Utc::now();
//! let result = authenticator
//!     .authenticate("password123", &hash, "alice@example.com", "viewer", now)
//!     .unwrap();
//!
//! let header = format!("Bearer {}", result.access_token);
//! let principal = authorizer
//!     .authorize(Some(&header), &AllowedRoles::new(["viewer", "admin"]), now)
//!     .unwrap();
//! assert_eq!(principal.role_name, "viewer");
//! ```

pub mod authenticator;
pub mod authorizer;
pub mod config;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authorizer::AllowedRoles;
pub use authorizer::AuthorizationError;
pub use authorizer::Principal;
pub use authorizer::RequestAuthorizer;
pub use config::TokenConfig;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
