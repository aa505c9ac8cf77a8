use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::models::Driver;
use crate::repositories::DriverRepository;
use crate::utils::errors::{map_unique_violation, AppResult};

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn driver_conflict(constraint: Option<&str>) -> String {
    match constraint {
        Some("drivers_license_number_key") => "License number already exists",
        Some("drivers_pkey") => "Driver phone already exists",
        _ => "Driver already exists",
    }
    .to_string()
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn create(&self, driver: &Driver) -> AppResult<Driver> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (phone, name, email, license_number, license_expiry, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
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
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, driver_conflict))?;

        Ok(driver)
    }

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    async fn find_by_license_number(&self, license_number: &str) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE license_number = $1")
            .bind(license_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    async fn list(&self) -> AppResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }

    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = $2, email = $3, license_number = $4, license_expiry = $5, status = $6, updated_at = $7
            WHERE phone = $1
            RETURNING *
            "#,
        )
        .bind(&driver.phone)
        .bind(&driver.name)
        .bind(&driver.email)
        .bind(&driver.license_number)
        .bind(driver.license_expiry)
        .bind(driver.status.as_str())
        .bind(driver.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, driver_conflict))?;

        Ok(driver)
    }

    async fn delete(&self, phone: &str) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let unassigned = sqlx::query(
            "UPDATE vehicles SET driver_phone = NULL, updated_at = NOW() WHERE driver_phone = $1",
        )
        .bind(phone)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let deleted = sqlx::query("DELETE FROM drivers WHERE phone = $1")
            .bind(phone)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;

        if unassigned > 0 {
            info!("🚗 {} vehículo(s) desasignados del conductor {}", unassigned, phone);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_conflict_messages() {
        assert_eq!(
            driver_conflict(Some("drivers_license_number_key")),
            "License number already exists"
        );
        assert_eq!(driver_conflict(Some("drivers_pkey")), "Driver phone already exists");
        assert_eq!(driver_conflict(None), "Driver already exists");
    }
}
