//! User Entity
//!
//! The credential record of a condominium user.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{
    TenantId, UserId, email::Email, token_payload::TokenPayload, user_role::UserRole,
};

/// Stored user
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    /// Condominium the user belongs to
    pub tenant_id: TenantId,
    /// Unique system-wide
    pub email: Email,
    pub password_hash: HashedPassword,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Apply profile changes. Id, condominium, role and password stay as they are.
    pub fn update(&mut self, changes: UserUpdate) {
        self.email = changes.email;
        self.first_name = changes.first_name;
        self.last_name = changes.last_name;
        self.phone = changes.phone;
    }

    pub fn belongs_to(&self, tenant_id: TenantId) -> bool {
        self.tenant_id == tenant_id
    }

    /// Claims for tokens minted on behalf of this user
    pub fn token_payload(&self) -> TokenPayload {
        TokenPayload {
            id: self.id,
            tenant_id: self.tenant_id,
            role: self.role,
        }
    }
}

/// User about to be inserted; the store assigns id and timestamps
#[derive(Debug, Clone)]
pub struct NewUser {
    pub tenant_id: TenantId,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: UserRole,
}

/// Editable profile fields, already validated
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}
