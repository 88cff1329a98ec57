//! Sign Up Use Case
//!
//! Creates a new user in a condominium.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordHasher};

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{TenantId, email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub tenant_id: TenantId,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: UserRole,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<PasswordHasher>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<PasswordHasher>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        if input.tenant_id.value() <= 0 {
            return Err(AuthError::Validation(
                "Condominium id must be a positive integer".to_string(),
            ));
        }

        let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let first_name = required_field("firstName", input.first_name)?;
        let last_name = required_field("lastName", input.last_name)?;
        let phone = required_field("phone", input.phone)?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let hasher = Arc::clone(&self.hasher);
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))??;

        let user = self
            .user_repo
            .create(&NewUser {
                tenant_id: input.tenant_id,
                email,
                password_hash,
                first_name,
                last_name,
                phone,
                role: input.role,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            tenant_id = %user.tenant_id,
            role = %user.role,
            "User signed up"
        );

        Ok(user)
    }
}

pub(crate) fn required_field(name: &str, value: String) -> AuthResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::Validation(format!("{name} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;

    fn use_case() -> SignUpUseCase<InMemoryUserRepository> {
        SignUpUseCase::new(
            Arc::new(InMemoryUserRepository::with_tenants([TenantId::new(1)])),
            Arc::new(PasswordHasher::new(1).unwrap()),
        )
    }

    fn input(email: &str) -> SignUpInput {
        SignUpInput {
            tenant_id: TenantId::new(1),
            email: email.to_string(),
            password: "pw123".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            phone: "555-0100".to_string(),
            role: UserRole::HouseOwner,
        }
    }

    #[tokio::test]
    async fn test_sign_up_stores_hashed_password() {
        let user = use_case().execute(input("a@b.com")).await.unwrap();

        assert_eq!(user.email.as_str(), "a@b.com");
        assert_eq!(user.tenant_id, TenantId::new(1));
        assert_ne!(user.password_hash.as_phc_string(), "pw123");
        assert!(
            PasswordHasher::new(1).unwrap().verify(
                &ClearTextPassword::new("pw123".to_string()).unwrap(),
                &user.password_hash
            )
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let use_case = use_case();
        use_case.execute(input("a@b.com")).await.unwrap();

        let err = use_case.execute(input("a@b.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists(email) if email == "a@b.com"));
    }

    #[tokio::test]
    async fn test_unknown_tenant() {
        let err = use_case()
            .execute(SignUpInput {
                tenant_id: TenantId::new(42),
                ..input("a@b.com")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::TenantNotFound(id) if id == TenantId::new(42)));
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let use_case = use_case();

        let err = use_case.execute(input("not-an-email")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = use_case
            .execute(SignUpInput {
                first_name: "  ".to_string(),
                ..input("a@b.com")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(msg) if msg.contains("firstName")));

        let err = use_case
            .execute(SignUpInput {
                password: String::new(),
                ..input("a@b.com")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }
}
