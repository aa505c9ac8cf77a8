use std::sync::Arc;

use crate::dto::user_dto::{UpdateRoleRequest, UserEnvelope, UserListResponse, UserResponse};
use crate::dto::MessageResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::Role;
use crate::repositories::UserRepository;
use crate::services::authorization_service::{Action, AuthorizationPolicy};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::present;

fn target_not_found() -> AppError {
    AppError::NotFound("Target user not found".to_string())
}

/// Administración de cuentas de usuario
pub struct UserController {
    repository: Arc<dyn UserRepository>,
    policy: Arc<AuthorizationPolicy>,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.users.clone(),
            policy: state.policy.clone(),
        }
    }

    pub async fn list(&self, actor: &AuthenticatedUser) -> AppResult<UserListResponse> {
        self.policy
            .ensure(actor.role, &actor.phone, Action::ListUsers, None)?;

        let users = self.repository.list().await?;
        Ok(UserListResponse {
            users: users.into_iter().map(UserResponse::from).collect(),
            master_phone: self.policy.master_phone().to_string(),
        })
    }

    /// Orden de comprobación: permiso (403), existencia (404), cuerpo y rol
    /// válidos (400). El cuerpo llega sin validar para respetar ese orden.
    pub async fn update_role(
        &self,
        actor: &AuthenticatedUser,
        phone: &str,
        request: AppResult<UpdateRoleRequest>,
    ) -> AppResult<UserEnvelope> {
        self.policy
            .ensure(actor.role, &actor.phone, Action::UpdateUserRole, Some(phone))?;

        if self.repository.find_by_phone(phone).await?.is_none() {
            return Err(target_not_found());
        }

        let role = match present(request?.role) {
            Some(value) => value.parse::<Role>()?,
            None => {
                return Err(AppError::BadRequest(
                    "Invalid role. Must be one of: user, admin, manager, driver".to_string(),
                ))
            }
        };

        let user = self
            .repository
            .update_role(phone, role)
            .await?
            .ok_or_else(target_not_found)?;
        tracing::info!("👤 Rol de {} cambiado a {} por {}", user.phone, role, actor.phone);

        Ok(UserEnvelope {
            message: "Role updated successfully".to_string(),
            user: user.into(),
        })
    }

    /// Solo la cuenta maestra; el registro de conductor asociado se conserva
    pub async fn delete(&self, actor: &AuthenticatedUser, phone: &str) -> AppResult<MessageResponse> {
        self.policy
            .ensure(actor.role, &actor.phone, Action::DeleteUser, Some(phone))?;

        if !self.repository.delete(phone).await? {
            return Err(target_not_found());
        }
        tracing::info!("🗑️ Usuario eliminado: {} por {}", phone, actor.phone);

        Ok(MessageResponse::new("User deleted successfully"))
    }
}
