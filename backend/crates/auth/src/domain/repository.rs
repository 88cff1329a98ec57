//! Repository Traits
//!
//! Interface for user persistence. Implementations are in the infrastructure
//! layer.

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{UserId, email::Email};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user.
    ///
    /// Fails with `UserAlreadyExists` if the email is taken and with
    /// `TenantNotFound` if the condominium does not exist.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Persist the profile fields of an existing user and refresh `updated_at`.
    ///
    /// Fails with `UserNotFound` if the user is gone and with
    /// `UserAlreadyExists` if the new email belongs to someone else.
    async fn update(&self, user: &User) -> AuthResult<User>;

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Exact, case-sensitive match
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// `false` if there was nothing to delete
    async fn delete(&self, id: UserId) -> AuthResult<bool>;
}
