pub mod create_role;
pub mod delete_role;
pub mod get_role;
pub mod list_roles;
pub mod update_role;

pub use create_role::create_role;
pub use delete_role::delete_role;
pub use get_role::get_role;
pub use list_roles::list_roles;
use serde::Deserialize;
use serde::Serialize;
pub use update_role::update_role;

use crate::domain::role::models::Role;

/// Request body shared by role creation and rename.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleData {
    pub id: i32,
    pub name: String,
}

impl From<&Role> for RoleData {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id.0,
            name: role.name.as_str().to_string(),
        }
    }
}
