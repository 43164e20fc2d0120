use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::role::errors::RoleError;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleId;
use crate::domain::role::models::RoleName;
use crate::domain::role::ports::RoleRepository;

pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_role(row: &PgRow) -> Result<Role, RoleError> {
        Ok(Role {
            id: RoleId(row.get("id")),
            name: RoleName::new(row.get("name"))?,
        })
    }

    fn map_write_error(e: sqlx::Error, name: &RoleName) -> RoleError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("roles_name_key") {
                return RoleError::NameAlreadyExists(name.to_string());
            }
        }
        RoleError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn create(&self, name: RoleName, created_by: &str) -> Result<Role, RoleError> {
        let row = sqlx::query(
            r#"
            INSERT INTO roles (name, created_by)
            VALUES ($1, $2)
            RETURNING id, name
            "#,
        )
        .bind(name.as_str())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &name))?;

        Self::row_to_role(&row)
    }

    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, RoleError> {
        let row = sqlx::query(
            r#"
            SELECT id, name
            FROM roles
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RoleError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_role).transpose()
    }

    async fn find_by_name(&self, name: &RoleName) -> Result<Option<Role>, RoleError> {
        let row = sqlx::query(
            r#"
            SELECT id, name
            FROM roles
            WHERE name = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RoleError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_role).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Role>, RoleError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name
            FROM roles
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RoleError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_role).collect()
    }

    async fn update(&self, role: Role, updated_by: &str) -> Result<Role, RoleError> {
        let result = sqlx::query(
            r#"
            UPDATE roles
            SET name = $2, updated_at = NOW(), updated_by = $3
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(role.id.0)
        .bind(role.name.as_str())
        .bind(updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &role.name))?;

        if result.rows_affected() == 0 {
            return Err(RoleError::NotFound(role.id));
        }

        Ok(role)
    }

    async fn is_assigned(&self, id: RoleId) -> Result<bool, RoleError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM users WHERE role_id = $1 AND deleted_at IS NULL
            ) AS assigned
            "#,
        )
        .bind(id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RoleError::DatabaseError(e.to_string()))?;

        Ok(row.get("assigned"))
    }

    async fn delete(&self, id: RoleId, deleted_by: &str) -> Result<(), RoleError> {
        let result = sqlx::query(
            r#"
            UPDATE roles
            SET deleted_at = NOW(), deleted_by = $2
            WHERE id = $1 AND deleted_at IS NULL
              AND NOT EXISTS (
                  SELECT 1 FROM users WHERE role_id = $1 AND deleted_at IS NULL
              )
            "#,
        )
        .bind(id.0)
        .bind(deleted_by)
        .execute(&self.pool)
        .await
        .map_err(|e| RoleError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            // Either the role is gone or a live user still holds it.
            return match self.find_by_id(id).await? {
                Some(_) => Err(RoleError::InUse(id)),
                None => Err(RoleError::NotFound(id)),
            };
        }

        Ok(())
    }
}
