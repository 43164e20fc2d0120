use std::fmt;

use crate::domain::role::errors::RoleIdError;
use crate::domain::role::errors::RoleNameError;

/// Role reference data.
///
/// Looked up by id or by name; removal is a soft delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
}

/// Role identifier (database serial)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub i32);

impl RoleId {
    /// Parse a role ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a positive integer
    pub fn from_string(s: &str) -> Result<Self, RoleIdError> {
        match s.parse::<i32>() {
            Ok(id) if id > 0 => Ok(RoleId(id)),
            _ => Err(RoleIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl TryFrom<i32> for RoleId {
    type Error = RoleIdError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        if id > 0 {
            Ok(RoleId(id))
        } else {
            Err(RoleIdError::InvalidFormat(id.to_string()))
        }
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role name value type.
///
/// Trimmed, non-empty and at most 50 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleName(String);

impl RoleName {
    const MAX_LENGTH: usize = 50;

    pub const ADMIN: &'static str = "admin";
    pub const TECHNICIAN: &'static str = "technician";
    pub const VIEWER: &'static str = "viewer";

    pub fn new(name: String) -> Result<Self, RoleNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();

        if length == 0 {
            Err(RoleNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(RoleNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Names the route allow-lists are written against.
    pub fn is_builtin(&self) -> bool {
        [Self::ADMIN, Self::TECHNICIAN, Self::VIEWER].contains(&self.as_str())
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_id_from_string() {
        assert_eq!(RoleId::from_string("3"), Ok(RoleId(3)));
        assert!(RoleId::from_string("0").is_err());
        assert!(RoleId::from_string("-1").is_err());
        assert!(RoleId::from_string("abc").is_err());
        assert_eq!(RoleId::try_from(2), Ok(RoleId(2)));
        assert!(RoleId::try_from(0).is_err());
    }

    #[test]
    fn test_role_name_validation() {
        assert_eq!(
            RoleName::new("  viewer ".to_string()).unwrap().as_str(),
            "viewer"
        );
        assert_eq!(RoleName::new("   ".to_string()), Err(RoleNameError::Empty));
        assert_eq!(
            RoleName::new("x".repeat(51)),
            Err(RoleNameError::TooLong {
                max: 50,
                actual: 51
            })
        );
    }

    #[test]
    fn test_role_name_builtin() {
        assert!(RoleName::new(" admin ".to_string()).unwrap().is_builtin());
        assert!(RoleName::new("viewer".to_string()).unwrap().is_builtin());
        assert!(!RoleName::new("auditor".to_string()).unwrap().is_builtin());
        assert!(!RoleName::new("Admin".to_string()).unwrap().is_builtin());
    }
}
