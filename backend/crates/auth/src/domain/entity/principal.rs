//! Principal
//!
//! The authenticated identity attached to a request. Outside this crate it
//! can only be read, never built: the sole constructor takes a payload that
//! already passed signature verification.

use crate::domain::value_object::{
    TenantId, UserId, token_payload::TokenPayload, user_role::UserRole,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    id: UserId,
    tenant_id: TenantId,
    role: UserRole,
}

impl Principal {
    pub(crate) fn from_verified(payload: TokenPayload) -> Self {
        Self {
            id: payload.id,
            tenant_id: payload.tenant_id,
            role: payload.role,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_any_role() {
        let principal = Principal::from_verified(TokenPayload {
            id: UserId::new(1),
            tenant_id: TenantId::new(1),
            role: UserRole::HouseOwner,
        });

        assert!(principal.has_any_role(&[UserRole::HouseOwner]));
        assert!(principal.has_any_role(&UserRole::ALL));
        assert!(!principal.has_any_role(&[UserRole::Administrator]));
        assert!(!principal.has_any_role(&[]));
    }
}
