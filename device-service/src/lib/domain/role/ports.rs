use async_trait::async_trait;

use crate::domain::role::errors::RoleError;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleId;
use crate::domain::role::models::RoleName;

/// Port for role domain service operations.
#[async_trait]
pub trait RoleServicePort: Send + Sync + 'static {
    /// Create a role with a name no live role uses.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - A live role already has this name
    /// * `DatabaseError` - Database operation failed
    async fn create_role(&self, name: RoleName, created_by: &str) -> Result<Role, RoleError>;

    /// List all live roles.
    async fn list_roles(&self) -> Result<Vec<Role>, RoleError>;

    /// Retrieve a live role.
    ///
    /// # Errors
    /// * `NotFound` - Role does not exist or was deleted
    async fn get_role(&self, id: RoleId) -> Result<Role, RoleError>;

    /// Rename a role.
    ///
    /// # Errors
    /// * `NotFound` - Role does not exist or was deleted
    /// * `BuiltinRename` - The role is one of admin, technician or viewer
    /// * `NameAlreadyExists` - Another live role has this name
    async fn update_role(
        &self,
        id: RoleId,
        name: RoleName,
        updated_by: &str,
    ) -> Result<Role, RoleError>;

    /// Soft-delete a role no live user holds.
    ///
    /// # Errors
    /// * `NotFound` - Role does not exist or was already deleted
    /// * `InUse` - A live user still references the role
    async fn delete_role(&self, id: RoleId, deleted_by: &str) -> Result<(), RoleError>;
}

/// Persistence operations for roles. Reads only ever see live rows.
#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    /// # Errors
    /// * `NameAlreadyExists` - Unique index on live role names rejected the insert
    async fn create(&self, name: RoleName, created_by: &str) -> Result<Role, RoleError>;

    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, RoleError>;

    async fn find_by_name(&self, name: &RoleName) -> Result<Option<Role>, RoleError>;

    async fn list_all(&self) -> Result<Vec<Role>, RoleError>;

    /// # Errors
    /// * `NotFound` - No live row was updated
    /// * `NameAlreadyExists` - Unique index on live role names rejected the update
    async fn update(&self, role: Role, updated_by: &str) -> Result<Role, RoleError>;

    /// Whether any live user references the role.
    async fn is_assigned(&self, id: RoleId) -> Result<bool, RoleError>;

    /// # Errors
    /// * `NotFound` - No live row was deleted
    /// * `InUse` - A live user references the role at delete time
    async fn delete(&self, id: RoleId, deleted_by: &str) -> Result<(), RoleError>;
}
