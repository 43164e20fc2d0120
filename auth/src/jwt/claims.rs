use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Access token payload.
///
/// The identity travels under the `employee_name` claim and carries the
/// user's email address. The role name is captured at issuance and is not
/// re-read from storage while the token is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Authenticated identity (email address)
    #[serde(
        rename = "employee_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subject: Option<String>,

    /// Role granted at login
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_role_name"
    )]
    pub role_name: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a freshly authenticated identity.
    ///
    /// # Arguments
    /// * `subject` - Identity to embed (email address)
    /// * `role_name` - Role the identity holds right now
    /// * `now` - Issuance instant
    /// * `ttl` - Lifetime of the token
    pub fn new(
        subject: impl Into<String>,
        role_name: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            subject: Some(subject.into()),
            role_name: Some(role_name.into()),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Expired once `now` reaches `exp`; there is no leeway.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// A role claim that is absent, not a string, or blank decodes to `None`
/// so the authorizer can reject it as a missing role rather than a broken
/// token.
fn deserialize_role_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    Ok(match value {
        serde_json::Value::String(role) if !role.trim().is_empty() => Some(role),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("a@x.com", "viewer", instant(), Duration::hours(24));

        assert_eq!(claims.subject.as_deref(), Some("a@x.com"));
        assert_eq!(claims.role_name.as_deref(), Some("viewer"));
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(
            claims.expires_at(),
            Some(instant() + Duration::hours(24))
        );
    }

    #[test]
    fn test_is_expired_boundary() {
        let claims = Claims::new("a@x.com", "viewer", instant(), Duration::seconds(60));

        assert!(!claims.is_expired(instant() + Duration::seconds(59)));
        assert!(claims.is_expired(instant() + Duration::seconds(60)));
        assert!(claims.is_expired(instant() + Duration::seconds(61)));
    }

    #[test]
    fn test_wire_format_uses_employee_name() {
        let claims = Claims::new("a@x.com", "admin", instant(), Duration::hours(1));
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["employee_name"], "a@x.com");
        assert_eq!(value["role_name"], "admin");
        assert!(value.get("subject").is_none());
    }

    #[test]
    fn test_unusable_role_claim_decodes_as_none() {
        for role in [json!(42), json!(null), json!(""), json!("  "), json!(["admin"])] {
            let claims: Claims = serde_json::from_value(json!({
                "employee_name": "a@x.com",
                "role_name": role,
                "iat": 0,
                "exp": 10
            }))
            .unwrap();
            assert_eq!(claims.role_name, None);
        }

        let claims: Claims = serde_json::from_value(json!({ "iat": 0, "exp": 10 })).unwrap();
        assert_eq!(claims.role_name, None);
        assert_eq!(claims.subject, None);
    }
}
