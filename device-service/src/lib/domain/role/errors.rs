use thiserror::Error;

use super::models::RoleId;

/// Error for RoleId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleIdError {
    #[error("Invalid role id: {0}")]
    InvalidFormat(String),
}

/// Error for RoleName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleNameError {
    #[error("Role name is empty")]
    Empty,

    #[error("Role name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all role-related operations
#[derive(Debug, Clone, Error)]
pub enum RoleError {
    #[error("Invalid role ID: {0}")]
    InvalidRoleId(#[from] RoleIdError),

    #[error("Invalid role name: {0}")]
    InvalidRoleName(#[from] RoleNameError),

    #[error("Role not found: {0}")]
    NotFound(RoleId),

    #[error("Role with name '{0}' already exists")]
    NameAlreadyExists(String),

    #[error("Role is still assigned to users: {0}")]
    InUse(RoleId),

    #[error("Built-in role '{0}' cannot be renamed")]
    BuiltinRename(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for RoleError {
    fn from(err: anyhow::Error) -> Self {
        RoleError::Unknown(err.to_string())
    }
}
