//! Log In Use Case
//!
//! Verifies credentials and mints an access/refresh token pair.

use std::sync::Arc;

use platform::password::PasswordHasher;

use crate::application::token_service::{TokenPair, TokenService};
use crate::application::verify_credentials::VerifyCredentialsUseCase;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Log in input
pub struct LogInInput {
    pub email: String,
    pub password: String,
}

/// A user together with a fresh token pair
///
/// Returned by every flow that starts or extends a session.
#[derive(Debug)]
pub struct SessionOutput {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct LogInUseCase<U>
where
    U: UserRepository,
{
    verifier: VerifyCredentialsUseCase<U>,
    tokens: Arc<TokenService>,
}

impl<U> LogInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<PasswordHasher>, tokens: Arc<TokenService>) -> Self {
        Self {
            verifier: VerifyCredentialsUseCase::new(user_repo, hasher),
            tokens,
        }
    }

    pub async fn execute(&self, input: LogInInput) -> AuthResult<SessionOutput> {
        let user = self.verifier.execute(&input.email, input.password).await?;
        let tokens = self.tokens.issue_pair(&user.token_payload())?;

        tracing::info!(
            user_id = %user.id,
            tenant_id = %user.tenant_id,
            role = %user.role,
            "User logged in"
        );

        Ok(SessionOutput { user, tokens })
    }
}
