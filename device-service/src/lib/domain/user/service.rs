use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::role::models::Role;
use crate::domain::role::models::RoleId;
use crate::domain::role::ports::RoleRepository;
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
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Owns registration and login; hashing and token issuance are delegated
/// to the shared [`Authenticator`].
pub struct UserService<UR, RR>
where
    UR: UserRepository,
    RR: RoleRepository,
{
    user_repository: Arc<UR>,
    role_repository: Arc<RR>,
    authenticator: Arc<Authenticator>,
}

impl<UR, RR> UserService<UR, RR>
where
    UR: UserRepository,
    RR: RoleRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_repository` - Credential store
    /// * `role_repository` - Role lookups for registration and login
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(
        user_repository: Arc<UR>,
        role_repository: Arc<RR>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            user_repository,
            role_repository,
            authenticator,
        }
    }

    async fn live_role(&self, id: RoleId) -> Result<Role, UserError> {
        self.role_repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::RoleNotFound(id))
    }
}

fn login_error(err: AuthenticationError) -> UserError {
    match err {
        AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
        AuthenticationError::Token(err) => {
            tracing::error!(error = %err, "Token generation failed");
            UserError::Token(err)
        }
    }
}

#[async_trait]
impl<UR, RR> UserServicePort for UserService<UR, RR>
where
    UR: UserRepository,
    RR: RoleRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<RegisteredUser, UserError> {
        // Fast path only; the store's unique index settles concurrent registrations.
        if self
            .user_repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        self.live_role(command.role_id).await?;

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed during registration");
                UserError::from(e)
            })?;

        let user = self
            .user_repository
            .create(NewUser {
                name: command.name,
                email: command.email,
                password_hash,
                role_id: command.role_id,
                created_by: None,
            })
            .await?;

        tracing::info!(user_id = %user.id, role_id = %user.role_id, "User registered");

        Ok(RegisteredUser {
            name: user.name,
            email: user.email,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginResult, UserError> {
        let user = self
            .user_repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(command.email.to_string()))?;

        self.authenticator
            .verify_password(&command.password, &user.password_hash)
            .map_err(login_error)?;

        // A stored user whose role is gone is an integrity fault, not a bad request.
        let role = self.live_role(user.role_id).await.map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "Cannot resolve role for login");
            match e {
                UserError::RoleNotFound(id) => {
                    UserError::Unknown(format!("User {} references missing role {}", user.id, id))
                }
                other => other,
            }
        })?;

        let result = self
            .authenticator
            .issue_token(user.email.as_str(), role.name.as_str(), Utc::now())
            .map_err(login_error)?;

        Ok(LoginResult {
            token: result.access_token,
            name: user.name,
            email: user.email,
        })
    }

    async fn get_profile(&self, email: &EmailAddress) -> Result<UserProfile, UserError> {
        self.user_repository
            .find_profile_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(email.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, UserError> {
        self.user_repository.list_profiles().await
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    async fn update_user(
        &self,
        id: UserId,
        command: UpdateUserCommand,
        updated_by: &str,
    ) -> Result<User, UserError> {
        let mut user = self.get_user(id).await?;

        if let Some(other) = self.user_repository.find_by_email(&command.email).await? {
            if other.id != id {
                return Err(UserError::EmailAlreadyExists(command.email.to_string()));
            }
        }

        self.live_role(command.role_id).await?;

        user.password_hash = self.authenticator.hash_password(&command.password)?;
        user.name = command.name;
        user.email = command.email;
        user.role_id = command.role_id;

        self.user_repository.update(user, updated_by).await
    }

    async fn delete_user(&self, id: UserId, deleted_by: &str) -> Result<(), UserError> {
        self.user_repository.delete(id, deleted_by).await?;

        tracing::info!(user_id = %id, deleted_by = deleted_by, "User deleted");
        Ok(())
    }
}
