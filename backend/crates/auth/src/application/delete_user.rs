//! Delete User Use Case
//!
//! Administrators remove users of their own condominium. Users of other
//! condominiums read as not found.

use std::sync::Arc;

use crate::application::get_user::GetUserUseCase;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, actor: &Principal, id: UserId) -> AuthResult<()> {
        let user = GetUserUseCase::new(Arc::clone(&self.user_repo))
            .execute(id)
            .await?;

        if !user.belongs_to(actor.tenant_id()) {
            return Err(AuthError::UserNotFound(id));
        }

        if !self.user_repo.delete(id).await? {
            return Err(AuthError::UserNotFound(id));
        }

        tracing::info!(
            user_id = %id,
            tenant_id = %user.tenant_id,
            deleted_by = %actor.id(),
            "User deleted"
        );

        Ok(())
    }
}
