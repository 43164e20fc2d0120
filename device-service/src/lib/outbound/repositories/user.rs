use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::role::errors::RoleError;
use crate::domain::role::models::RoleId;
use crate::domain::role::models::RoleName;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        Ok(User {
            id: UserId(row.get("id")),
            name: DisplayName::new(row.get("name"))?,
            email: EmailAddress::new(row.get("email"))?,
            password_hash: row.get("password"),
            role_id: RoleId(row.get("role_id")),
        })
    }

    fn row_to_profile(row: &PgRow) -> Result<UserProfile, UserError> {
        Ok(UserProfile {
            id: UserId(row.get("id")),
            name: DisplayName::new(row.get("name"))?,
            email: EmailAddress::new(row.get("email"))?,
            role: RoleName::new(row.get("role_name")).map_err(RoleError::from)?,
        })
    }

    /// Translate constraint violations into domain errors.
    ///
    /// The unique index on live emails is what keeps concurrent
    /// registrations from both succeeding.
    fn map_write_error(e: sqlx::Error, email: &EmailAddress, role_id: RoleId) -> UserError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                return UserError::EmailAlreadyExists(email.to_string());
            }
            if db_err.is_foreign_key_violation()
                && db_err.constraint() == Some("users_role_id_fkey")
            {
                return UserError::RoleNotFound(role_id);
            }
        }
        UserError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, password, role_id, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role_id.0)
        .bind(user.created_by.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &user.email, user.role_id))?;

        Ok(User {
            id: UserId(row.get("id")),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role_id: user.role_id,
        })
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password, role_id
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password, role_id
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_profile_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserProfile>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.name, u.email, r.name AS role_name
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE u.email = $1 AND u.deleted_at IS NULL
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_profile).transpose()
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, UserError> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.name, u.email, r.name AS role_name
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE u.deleted_at IS NULL
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_profile).collect()
    }

    async fn update(&self, user: User, updated_by: &str) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, password = $4, role_id = $5,
                updated_at = NOW(), updated_by = $6
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user.id.0)
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role_id.0)
        .bind(updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &user.email, user.role_id))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id));
        }

        Ok(user)
    }

    async fn delete(&self, id: UserId, deleted_by: &str) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = NOW(), deleted_by = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .bind(deleted_by)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}
