//! Validate Access Token Use Case
//!
//! Confirms an access token still belongs to an existing user and hands out
//! a fresh pair, exactly like a login.

use std::sync::Arc;

use crate::application::get_user::GetUserUseCase;
use crate::application::log_in::SessionOutput;
use crate::application::token_service::TokenService;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

pub struct ValidateAccessTokenUseCase<U>
where
    U: UserRepository,
{
    get_user: GetUserUseCase<U>,
    tokens: Arc<TokenService>,
}

impl<U> ValidateAccessTokenUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self {
            get_user: GetUserUseCase::new(user_repo),
            tokens,
        }
    }

    pub async fn execute(&self, access_token: &str) -> AuthResult<SessionOutput> {
        let principal = self.tokens.authenticate_access(access_token)?;
        let user = self.get_user.execute(principal.id()).await?;
        let tokens = self.tokens.issue_pair(&user.token_payload())?;

        tracing::debug!(user_id = %user.id, "Access token validated");

        Ok(SessionOutput { user, tokens })
    }
}
