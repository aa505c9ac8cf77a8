//! Política de autorización
//!
//! Función pura que decide, antes de cada mutación, si un actor puede
//! realizar una acción. La tabla acción × rol está en `allowed_roles`; la
//! cuenta maestra añade dos reglas: conserva la administración de usuarios
//! sin importar su rol, y nadie (ni ella misma) puede modificarla o borrarla.

use crate::models::Role;
use crate::utils::errors::{AppError, AppResult};

/// Acciones protegidas por la política
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateDriver,
    UpdateDriver,
    DeleteDriver,
    CreateVehicle,
    UpdateVehicle,
    DeleteVehicle,
    ListUsers,
    UpdateUserRole,
    DeleteUser,
}

impl Action {
    /// Roles que pueden realizar la acción
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Action::CreateDriver
            | Action::UpdateDriver
            | Action::CreateVehicle
            | Action::UpdateVehicle
            | Action::ListUsers
            | Action::UpdateUserRole => &[Role::Admin, Role::Manager],
            Action::DeleteDriver | Action::DeleteVehicle => &[Role::Admin],
            Action::DeleteUser => &[],
        }
    }

    /// La cuenta maestra puede realizarla aunque su rol no aparezca en la tabla
    fn master_allowed(&self) -> bool {
        matches!(self, Action::ListUsers | Action::UpdateUserRole | Action::DeleteUser)
    }

    /// La acción apunta a una cuenta de usuario concreta
    fn targets_account(&self) -> bool {
        matches!(self, Action::UpdateUserRole | Action::DeleteUser)
    }

    fn describe(&self) -> &'static str {
        match self {
            Action::CreateDriver => "create driver",
            Action::UpdateDriver => "update driver",
            Action::DeleteDriver => "delete driver",
            Action::CreateVehicle => "create vehicle",
            Action::UpdateVehicle => "update vehicle",
            Action::DeleteVehicle => "delete vehicle",
            Action::ListUsers => "list users",
            Action::UpdateUserRole => "update user role",
            Action::DeleteUser => "delete users",
        }
    }
}

/// Motivo de una denegación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    InsufficientRole,
    MasterOnly,
    MasterImmutable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

/// Política de autorización con el teléfono maestro inyectado desde la configuración
#[derive(Debug, Clone)]
pub struct AuthorizationPolicy {
    master_phone: String,
}

impl AuthorizationPolicy {
    pub fn new(master_phone: impl Into<String>) -> Self {
        Self {
            master_phone: master_phone.into(),
        }
    }

    pub fn master_phone(&self) -> &str {
        &self.master_phone
    }

    pub fn is_master(&self, phone: &str) -> bool {
        phone == self.master_phone
    }

    pub fn authorize(
        &self,
        actor_role: Role,
        actor_phone: &str,
        action: Action,
        target_phone: Option<&str>,
    ) -> Decision {
        if action.targets_account() && target_phone.is_some_and(|phone| self.is_master(phone)) {
            return Decision::Deny(DenyReason::MasterImmutable);
        }

        if action.allowed_roles().contains(&actor_role) {
            return Decision::Allow;
        }

        if action.master_allowed() && self.is_master(actor_phone) {
            return Decision::Allow;
        }

        if action.allowed_roles().is_empty() {
            Decision::Deny(DenyReason::MasterOnly)
        } else {
            Decision::Deny(DenyReason::InsufficientRole)
        }
    }

    /// Igual que `authorize`, convirtiendo la denegación en 403
    pub fn ensure(
        &self,
        actor_role: Role,
        actor_phone: &str,
        action: Action,
        target_phone: Option<&str>,
    ) -> AppResult<()> {
        match self.authorize(actor_role, actor_phone, action, target_phone) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => {
                tracing::warn!(
                    "🚫 {} ({}) no puede {}: {:?}",
                    actor_phone,
                    actor_role,
                    action.describe(),
                    reason
                );
                let message = match reason {
                    DenyReason::InsufficientRole => "Unauthorized".to_string(),
                    DenyReason::MasterOnly => {
                        format!("Only master account can {}", action.describe())
                    }
                    DenyReason::MasterImmutable => match action {
                        Action::DeleteUser => "Cannot delete master account".to_string(),
                        _ => "Cannot modify master account".to_string(),
                    },
                };
                Err(AppError::Forbidden(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "+9868995742";

    fn policy() -> AuthorizationPolicy {
        AuthorizationPolicy::new(MASTER)
    }

    #[test]
    fn test_registry_mutations_by_role() {
        let policy = policy();
        let creates = [Action::CreateDriver, Action::UpdateDriver, Action::CreateVehicle, Action::UpdateVehicle];

        for action in creates {
            assert_eq!(policy.authorize(Role::Admin, "+1", action, None), Decision::Allow);
            assert_eq!(policy.authorize(Role::Manager, "+1", action, None), Decision::Allow);
            assert_eq!(
                policy.authorize(Role::User, "+1", action, None),
                Decision::Deny(DenyReason::InsufficientRole)
            );
            assert_eq!(
                policy.authorize(Role::Driver, "+1", action, None),
                Decision::Deny(DenyReason::InsufficientRole)
            );
        }
    }

    #[test]
    fn test_registry_deletes_are_admin_only() {
        let policy = policy();
        for action in [Action::DeleteDriver, Action::DeleteVehicle] {
            assert_eq!(policy.authorize(Role::Admin, "+1", action, None), Decision::Allow);
            assert!(matches!(policy.authorize(Role::Manager, "+1", action, None), Decision::Deny(_)));
            // El teléfono maestro no amplía permisos sobre el registro
            assert!(matches!(policy.authorize(Role::User, MASTER, action, None), Decision::Deny(_)));
        }
    }

    #[test]
    fn test_user_administration_allows_master_regardless_of_role() {
        let policy = policy();

        assert_eq!(policy.authorize(Role::Driver, MASTER, Action::ListUsers, None), Decision::Allow);
        assert_eq!(policy.authorize(Role::Manager, "+1", Action::ListUsers, None), Decision::Allow);
        assert!(matches!(policy.authorize(Role::Driver, "+1", Action::ListUsers, None), Decision::Deny(_)));

        assert_eq!(
            policy.authorize(Role::User, MASTER, Action::UpdateUserRole, Some("+2")),
            Decision::Allow
        );
        assert_eq!(
            policy.authorize(Role::Admin, "+1", Action::UpdateUserRole, Some("+2")),
            Decision::Allow
        );
    }

    #[test]
    fn test_only_master_deletes_users() {
        let policy = policy();

        assert_eq!(policy.authorize(Role::Driver, MASTER, Action::DeleteUser, Some("+2")), Decision::Allow);
        assert_eq!(
            policy.authorize(Role::Admin, "+1", Action::DeleteUser, Some("+2")),
            Decision::Deny(DenyReason::MasterOnly)
        );
    }

    #[test]
    fn test_master_account_is_immutable_even_for_itself() {
        let policy = policy();

        assert_eq!(
            policy.authorize(Role::Admin, MASTER, Action::DeleteUser, Some(MASTER)),
            Decision::Deny(DenyReason::MasterImmutable)
        );
        assert_eq!(
            policy.authorize(Role::Admin, "+1", Action::UpdateUserRole, Some(MASTER)),
            Decision::Deny(DenyReason::MasterImmutable)
        );
    }

    #[test]
    fn test_ensure_maps_to_forbidden() {
        let policy = policy();

        match policy.ensure(Role::Admin, MASTER, Action::DeleteUser, Some(MASTER)) {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, "Cannot delete master account"),
            other => panic!("unexpected {:?}", other),
        }
        match policy.ensure(Role::Admin, "+1", Action::DeleteUser, Some("+2")) {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, "Only master account can delete users"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(policy.ensure(Role::Admin, "+1", Action::CreateVehicle, None).is_ok());
    }
}
