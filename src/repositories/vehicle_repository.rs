use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::Vehicle;
use crate::repositories::VehicleRepository;
use crate::utils::errors::{map_unique_violation, AppResult};

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn vehicle_conflict(_constraint: Option<&str>) -> String {
    "Vehicle number already exists".to_string()
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (vehicle_number, holding_capacity, mileage, status, driver_phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&vehicle.vehicle_number)
        .bind(vehicle.holding_capacity)
        .bind(vehicle.mileage)
        .bind(vehicle.status.as_str())
        .bind(&vehicle.driver_phone)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, vehicle_conflict))?;

        Ok(vehicle)
    }

    async fn find_by_number(&self, vehicle_number: &str) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE vehicle_number = $1")
            .bind(vehicle_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET holding_capacity = $2, mileage = $3, status = $4, driver_phone = $5, updated_at = $6
            WHERE vehicle_number = $1
            RETURNING *
            "#,
        )
        .bind(&vehicle.vehicle_number)
        .bind(vehicle.holding_capacity)
        .bind(vehicle.mileage)
        .bind(vehicle.status.as_str())
        .bind(&vehicle.driver_phone)
        .bind(vehicle.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn delete(&self, vehicle_number: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE vehicle_number = $1")
            .bind(vehicle_number)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_conflict_message() {
        assert_eq!(vehicle_conflict(Some("vehicles_pkey")), "Vehicle number already exists");
        assert_eq!(vehicle_conflict(None), "Vehicle number already exists");
    }
}
