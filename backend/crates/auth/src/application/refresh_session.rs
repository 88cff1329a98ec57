//! Refresh Session Use Case
//!
//! Trades a refresh token for a new token pair. The user is re-read from the
//! store, so a deleted user cannot refresh and a changed role takes effect
//! on the next pair.

use std::sync::Arc;

use crate::application::get_user::GetUserUseCase;
use crate::application::log_in::SessionOutput;
use crate::application::token_service::TokenService;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Stand-in for an absent cookie. Never verifies.
pub const MISSING_REFRESH_TOKEN: &str = "invalid-token";

pub struct RefreshSessionUseCase<U>
where
    U: UserRepository,
{
    get_user: GetUserUseCase<U>,
    tokens: Arc<TokenService>,
}

impl<U> RefreshSessionUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self {
            get_user: GetUserUseCase::new(user_repo),
            tokens,
        }
    }

    pub async fn execute(&self, refresh_token: Option<&str>) -> AuthResult<SessionOutput> {
        let token = refresh_token.unwrap_or(MISSING_REFRESH_TOKEN);
        let payload = self.tokens.authenticate_refresh(token)?;

        let user = self.get_user.execute(payload.id).await?;

        if user.role != payload.role {
            tracing::info!(
                user_id = %user.id,
                from = %payload.role,
                to = %user.role,
                "Role changed since last token issue"
            );
        }

        let tokens = self.tokens.issue_pair(&user.token_payload())?;

        tracing::info!(user_id = %user.id, tenant_id = %user.tenant_id, "Session refreshed");

        Ok(SessionOutput { user, tokens })
    }
}
