use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginResult;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RegisteredUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new credential.
    ///
    /// # Arguments
    /// * `command` - Validated name, email, plaintext password and role reference
    ///
    /// # Returns
    /// Name and email of the created user (never the hash)
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - A live user already has this email
    /// * `RoleNotFound` - Role reference does not resolve to a live role
    /// * `Password` - Hashing failed; nothing was written
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<RegisteredUser, UserError>;

    /// Verify credentials and issue an access token. Performs no writes.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No live user has this email
    /// * `InvalidCredentials` - Password does not match
    /// * `RoleNotFound` - The user's role was deleted
    /// * `Token` - Token generation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginResult, UserError>;

    /// Profile of the identity carried by an access token.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - The identity no longer exists
    async fn get_profile(&self, email: &EmailAddress) -> Result<UserProfile, UserError>;

    /// List all live users with their role names.
    async fn list_users(&self) -> Result<Vec<UserProfile>, UserError>;

    /// # Errors
    /// * `NotFound` - User does not exist or was deleted
    async fn get_user(&self, id: UserId) -> Result<User, UserError>;

    /// Replace a user's details and re-hash the password.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or was deleted
    /// * `RoleNotFound` - New role reference does not resolve
    /// * `EmailAlreadyExists` - New email belongs to another live user
    async fn update_user(
        &self,
        id: UserId,
        command: UpdateUserCommand,
        updated_by: &str,
    ) -> Result<User, UserError>;

    /// Soft-delete a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or was already deleted
    async fn delete_user(&self, id: UserId, deleted_by: &str) -> Result<(), UserError>;
}

/// Credential store. Reads only ever see live rows.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new credential.
    ///
    /// Must reject a second live user with the same email even when two
    /// registrations race past the service pre-check.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email uniqueness violated
    /// * `RoleNotFound` - Role reference rejected by the store
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    async fn find_profile_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserProfile>, UserError>;

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, UserError>;

    /// # Errors
    /// * `NotFound` - No live row was updated
    /// * `EmailAlreadyExists` - Email uniqueness violated
    async fn update(&self, user: User, updated_by: &str) -> Result<User, UserError>;

    /// # Errors
    /// * `NotFound` - No live row was deleted
    async fn delete(&self, id: UserId, deleted_by: &str) -> Result<(), UserError>;
}
