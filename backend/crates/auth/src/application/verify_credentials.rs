//! Verify Credentials Use Case
//!
//! Checks an email/password pair against the stored user.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordHasher};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult, InvalidCredentials};

pub struct VerifyCredentialsUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<PasswordHasher>,
}

impl<U> VerifyCredentialsUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<PasswordHasher>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn execute(&self, email: &str, password: String) -> AuthResult<User> {
        // A malformed address cannot match a stored one
        let email = Email::new(email).map_err(|_| InvalidCredentials::Email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(InvalidCredentials::Email)?;

        let password = ClearTextPassword::new(password).map_err(|_| InvalidCredentials::Password)?;

        let hasher = Arc::clone(&self.hasher);
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))?;

        if !matches {
            return Err(InvalidCredentials::Password.into());
        }

        Ok(user)
    }
}
