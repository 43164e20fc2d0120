use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::config::TokenConfig;

/// Issues and validates HS256 access tokens.
///
/// Expiry is checked against the caller-supplied instant instead of the
/// system clock so that validation is a pure function of its inputs.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign a token for `identity` holding `role_name`.
    ///
    /// # Arguments
    /// * `identity` - Email address of the authenticated user
    /// * `role_name` - Role resolved at login time
    /// * `now` - Issuance instant, stored as `iat`
    /// * `ttl` - Lifetime; `exp = now + ttl`
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(
        &self,
        identity: &str,
        role_name: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(identity, role_name, now, ttl);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify signature and expiry, then return the typed claims.
    ///
    /// # Errors
    /// * `Malformed` - Not a JWT, wrong algorithm, or payload is not a claims object
    /// * `SignatureInvalid` - Signed with another key or tampered with
    /// * `Expired` - `now >= exp`
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        if token_data.claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}
