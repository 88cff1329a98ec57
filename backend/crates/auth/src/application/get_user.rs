//! Get User Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

pub struct GetUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Fails with `UserNotFound` if the user was deleted
    pub async fn execute(&self, id: UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound(id))
    }
}
