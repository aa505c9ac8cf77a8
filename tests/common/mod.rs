#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum_test::{TestResponse, TestServer};
use chrono::Utc;
use serde_json::{json, Value};

use fleet_management::config::EnvironmentConfig;
use fleet_management::models::{Driver, Role, User, Vehicle};
use fleet_management::repositories::{DriverRepository, UserRepository, VehicleRepository};
use fleet_management::utils::errors::{AppError, AppResult};
use fleet_management::{create_router, AppState};

pub const MASTER_PHONE: &str = "+9868995742";
pub const PASSWORD: &str = "pw123";

// ── InMemoryStore ────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tables {
    users: BTreeMap<String, User>,
    drivers: BTreeMap<String, Driver>,
    vehicles: BTreeMap<String, Vehicle>,
}

/// Implementa los tres repositorios con las mismas restricciones únicas y
/// reglas transaccionales que el esquema de PostgreSQL.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn set_role(&self, phone: &str, role: Role) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.get_mut(phone) {
            user.role = role;
        }
    }

    pub fn user(&self, phone: &str) -> Option<User> {
        self.tables.lock().unwrap().users.get(phone).cloned()
    }

    pub fn driver(&self, phone: &str) -> Option<Driver> {
        self.tables.lock().unwrap().drivers.get(phone).cloned()
    }

    pub fn vehicle(&self, vehicle_number: &str) -> Option<Vehicle> {
        self.tables.lock().unwrap().vehicles.get(vehicle_number).cloned()
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        let tables = self.tables.lock().unwrap();
        (tables.users.len(), tables.drivers.len(), tables.vehicles.len())
    }
}

fn conflict(message: &str) -> AppError {
    AppError::Conflict(message.to_string())
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_with_driver(&self, user: &User, driver: &Driver) -> AppResult<()> {
        let mut tables = self.tables.lock().unwrap();

        if tables.users.contains_key(&user.phone) || tables.drivers.contains_key(&driver.phone) {
            return Err(conflict("Phone number already exists"));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(conflict("Email already exists"));
        }
        if tables
            .drivers
            .values()
            .any(|d| d.license_number == driver.license_number)
        {
            return Err(conflict("License number already registered"));
        }

        tables.users.insert(user.phone.clone(), user.clone());
        tables.drivers.insert(driver.phone.clone(), driver.clone());
        Ok(())
    }

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<User>> {
        Ok(self.user(phone))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.tables.lock().unwrap().users.values().cloned().collect())
    }

    async fn update_role(&self, phone: &str, role: Role) -> AppResult<Option<User>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.users.get_mut(phone).map(|user| {
            user.role = role;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete(&self, phone: &str) -> AppResult<bool> {
        Ok(self.tables.lock().unwrap().users.remove(phone).is_some())
    }
}

#[async_trait]
impl DriverRepository for InMemoryStore {
    async fn create(&self, driver: &Driver) -> AppResult<Driver> {
        let mut tables = self.tables.lock().unwrap();

        if tables.drivers.contains_key(&driver.phone) {
            return Err(conflict("Driver phone already exists"));
        }
        if tables
            .drivers
            .values()
            .any(|d| d.license_number == driver.license_number)
        {
            return Err(conflict("License number already exists"));
        }

        tables.drivers.insert(driver.phone.clone(), driver.clone());
        Ok(driver.clone())
    }

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<Driver>> {
        Ok(self.driver(phone))
    }

    async fn find_by_license_number(&self, license_number: &str) -> AppResult<Option<Driver>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .drivers
            .values()
            .find(|d| d.license_number == license_number)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Driver>> {
        Ok(self.tables.lock().unwrap().drivers.values().cloned().collect())
    }

    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>> {
        let mut tables = self.tables.lock().unwrap();

        if tables
            .drivers
            .values()
            .any(|d| d.phone != driver.phone && d.license_number == driver.license_number)
        {
            return Err(conflict("License number already exists"));
        }

        Ok(tables.drivers.get_mut(&driver.phone).map(|stored| {
            *stored = driver.clone();
            stored.clone()
        }))
    }

    async fn delete(&self, phone: &str) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();

        if tables.drivers.remove(phone).is_none() {
            return Ok(false);
        }
        for vehicle in tables.vehicles.values_mut() {
            if vehicle.driver_phone.as_deref() == Some(phone) {
                vehicle.driver_phone = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.lock().unwrap();

        if tables.vehicles.contains_key(&vehicle.vehicle_number) {
            return Err(conflict("Vehicle number already exists"));
        }
        tables
            .vehicles
            .insert(vehicle.vehicle_number.clone(), vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn find_by_number(&self, vehicle_number: &str) -> AppResult<Option<Vehicle>> {
        Ok(self.vehicle(vehicle_number))
    }

    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.tables.lock().unwrap().vehicles.values().cloned().collect())
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .vehicles
            .get_mut(&vehicle.vehicle_number)
            .map(|stored| {
                *stored = vehicle.clone();
                stored.clone()
            }))
    }

    async fn delete(&self, vehicle_number: &str) -> AppResult<bool> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .vehicles
            .remove(vehicle_number)
            .is_some())
    }
}

// ── TestApp ──────────────────────────────────────────────────────────────────

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryStore>,
}

pub fn test_config() -> EnvironmentConfig {
    let mut config = EnvironmentConfig::new("test-secret", MASTER_PHONE);
    config.bcrypt_cost = 4;
    config
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_config())
}

pub fn spawn_app_with(config: EnvironmentConfig) -> TestApp {
    let store = Arc::new(InMemoryStore::default());
    let state = AppState::with_repositories(config, store.clone(), store.clone(), store.clone());
    let server = TestServer::new(create_router(state)).unwrap();
    TestApp { server, store }
}

pub fn auth_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    )
}

pub fn registration(phone: &str, email: &str, license_number: &str) -> Value {
    json!({
        "phone": phone,
        "email": email,
        "password": PASSWORD,
        "license_number": license_number,
    })
}

impl TestApp {
    pub async fn register(&self, phone: &str, email: &str, license_number: &str) -> TestResponse {
        self.server
            .post("/api/auth/register")
            .json(&registration(phone, email, license_number))
            .await
    }

    /// Devuelve (access_token, refresh_token)
    pub async fn login(&self, phone: &str) -> (String, String) {
        let response = self
            .server
            .post("/api/auth/login")
            .json(&json!({ "phone": phone, "password": PASSWORD }))
            .await;
        let body = response.json::<Value>();
        (
            body["access_token"].as_str().unwrap().to_string(),
            body["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Registra una cuenta, le asigna el rol y devuelve su access token
    pub async fn actor(&self, phone: &str, role: Role) -> String {
        let digits = phone.trim_start_matches('+');
        self.register(phone, &format!("{}@fleet.test", digits), &format!("L-{}", digits))
            .await;
        self.store.set_role(phone, role);
        self.login(phone).await.0
    }

    pub async fn get(&self, path: &str, token: &str) -> TestResponse {
        let (name, value) = auth_header(token);
        self.server.get(path).add_header(name, value).await
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> TestResponse {
        let (name, value) = auth_header(token);
        self.server.post(path).add_header(name, value).json(&body).await
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> TestResponse {
        let (name, value) = auth_header(token);
        self.server.put(path).add_header(name, value).json(&body).await
    }

    /// Envía el cuerpo tal cual, declarado como JSON aunque no lo sea
    pub async fn send_raw(&self, method: Method, path: &str, token: &str, body: &'static [u8]) -> TestResponse {
        let (name, value) = auth_header(token);
        self.server
            .method(method, path)
            .add_header(name, value)
            .content_type("application/json")
            .bytes(Bytes::from_static(body))
            .await
    }

    pub async fn delete(&self, path: &str, token: &str) -> TestResponse {
        let (name, value) = auth_header(token);
        self.server.delete(path).add_header(name, value).await
    }
}
