//! Servicio de autenticación
//!
//! Registro de conductores, login por teléfono y contraseña, renovación del
//! access token y resolución del usuario actual. bcrypt es costoso en CPU:
//! el hash y la verificación corren en `spawn_blocking`.

use std::sync::Arc;

use crate::dto::auth_dto::{CurrentUser, LoginRequest, LoginResponse, RefreshResponse, RegisterRequest};
use crate::dto::user_dto::UserResponse;
use crate::models::{Driver, DriverStatus, TokenType, User};
use crate::repositories::{DriverRepository, UserRepository};
use crate::services::jwt_service::JwtService;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{
    ensure_email, ensure_phone, parse_license_expiry_lenient, present, require_all,
};

const INVALID_CREDENTIALS: &str = "Invalid phone or password";

/// Servicio de autenticación
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    drivers: Arc<dyn DriverRepository>,
    jwt_service: Arc<JwtService>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        drivers: Arc<dyn DriverRepository>,
        jwt_service: Arc<JwtService>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            drivers,
            jwt_service,
            bcrypt_cost,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.users.clone(),
            state.drivers.clone(),
            state.jwt.clone(),
            state.config.bcrypt_cost,
        )
    }

    /// Registra un usuario con rol `driver` y su registro de conductor
    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        let [phone, email, password] = require_all(
            [request.phone, request.email, request.password],
            "Missing required fields",
        )?;
        let license_number = present(request.license_number)
            .ok_or_else(|| AppError::BadRequest("License number is required".to_string()))?;

        ensure_phone(&phone)?;
        ensure_email(&email)?;

        // Comprobación previa para dar un mensaje claro; la transacción
        // sigue protegida por las restricciones únicas de la base de datos.
        if self.users.find_by_phone(&phone).await?.is_some() {
            return Err(AppError::Conflict("Phone number already exists".to_string()));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
        if self.drivers.find_by_license_number(&license_number).await?.is_some() {
            return Err(AppError::Conflict("License number already registered".to_string()));
        }

        let username = present(request.username);
        let name = present(request.name).or_else(|| username.clone());
        let license_expiry = parse_license_expiry_lenient(request.license_expiry.as_deref());

        let password_hash = hash_password(password, self.bcrypt_cost).await?;

        let user = User::new_driver(phone.clone(), username, email.clone(), password_hash);
        let driver = Driver::new(
            phone,
            name,
            Some(email),
            license_number,
            license_expiry,
            DriverStatus::Available,
        );

        self.users.create_with_driver(&user, &driver).await?;
        tracing::info!("✅ Conductor registrado: {}", user.phone);

        Ok(user.into())
    }

    /// Login por teléfono y contraseña; emite access y refresh token
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let [phone, password] = require_all(
            [request.phone, request.password],
            "Missing phone or password",
        )?;

        let user = match self.users.find_by_phone(&phone).await? {
            Some(user) => user,
            None => {
                tracing::warn!("🔐 Login fallido para {}", phone);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !verify_password(password, user.password_hash.clone()).await? {
            tracing::warn!("🔐 Login fallido para {}", phone);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let access_token = self.jwt_service.generate_access_token(&user.phone)?;
        let refresh_token = self.jwt_service.generate_refresh_token(&user.phone)?;

        tracing::info!("🔑 Login exitoso: {} ({})", user.phone, user.role);

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            access_token,
            refresh_token,
            user: user.into(),
        })
    }

    /// Nuevo access token a partir de un refresh token
    pub fn refresh(&self, refresh_token: &str) -> AppResult<RefreshResponse> {
        let access_token = self.jwt_service.refresh_access_token(refresh_token)?;
        Ok(RefreshResponse { access_token })
    }

    /// Resuelve el usuario de un access token; 404 si ya no existe
    pub async fn authenticate(&self, access_token: &str) -> AppResult<User> {
        let claims = self.jwt_service.verify(access_token, TokenType::Access)?;
        self.users
            .find_by_phone(&claims.sub)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Usuario actual con `display_name`: nombre del conductor, o username
    pub async fn current_user(&self, user: User) -> AppResult<CurrentUser> {
        let driver_name = self
            .drivers
            .find_by_phone(&user.phone)
            .await?
            .and_then(|driver| present(driver.name));
        let display_name = driver_name.or_else(|| present(user.username.clone()));

        Ok(CurrentUser {
            user: user.into(),
            display_name,
        })
    }
}

/// Hash bcrypt fuera del runtime async
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}

/// Verificación bcrypt fuera del runtime async
pub async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_password_hash_roundtrip() {
        let hash = hash_password("s3cret".to_string(), 4).await.unwrap();

        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        let result = verify_password("s3cret".to_string(), "not-a-hash".to_string()).await;
        assert!(matches!(result, Err(AppError::Hash(_))));
    }
}
