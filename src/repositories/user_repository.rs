use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Driver, Role, User};
use crate::repositories::UserRepository;
use crate::utils::errors::{map_unique_violation, AppResult};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Mensaje de conflicto según la restricción violada
fn registration_conflict(constraint: Option<&str>) -> String {
    match constraint {
        Some("users_pkey") | Some("drivers_pkey") => "Phone number already exists",
        Some("users_email_key") => "Email already exists",
        Some("drivers_license_number_key") => "License number already registered",
        _ => "User already exists",
    }
    .to_string()
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_with_driver(&self, user: &User, driver: &Driver) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (phone, username, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&user.phone)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, registration_conflict))?;

        sqlx::query(
            r#"
            INSERT INTO drivers (phone, name, email, license_number, license_expiry, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&driver.phone)
        .bind(&driver.name)
        .bind(&driver.email)
        .bind(&driver.license_number)
        .bind(driver.license_expiry)
        .bind(driver.status.as_str())
        .bind(driver.created_at)
        .bind(driver.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, registration_conflict))?;

        // Si algo falla antes de aquí, el drop de `tx` hace rollback
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn update_role(&self, phone: &str, role: Role) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE phone = $1
            RETURNING *
            "#,
        )
        .bind(phone)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, phone: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE phone = $1")
            .bind(phone)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
