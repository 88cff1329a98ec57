//! Update User Use Case
//!
//! Edits the profile fields of a user: email, names and phone. Role,
//! condominium and password are out of reach here. The target must belong to
//! the actor's condominium, which always holds when users edit themselves.

use std::sync::Arc;

use crate::application::get_user::GetUserUseCase;
use crate::application::sign_up::required_field;
use crate::domain::entity::principal::Principal;
use crate::domain::entity::user::{User, UserUpdate};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, email::Email};
use crate::error::{AuthError, AuthResult};

/// Update user input
pub struct UpdateUserInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl UpdateUserInput {
    fn validate(self) -> AuthResult<UserUpdate> {
        Ok(UserUpdate {
            email: Email::new(self.email).map_err(|e| AuthError::Validation(e.to_string()))?,
            first_name: required_field("firstName", self.first_name)?,
            last_name: required_field("lastName", self.last_name)?,
            phone: required_field("phone", self.phone)?,
        })
    }
}

pub struct UpdateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(
        &self,
        actor: &Principal,
        id: UserId,
        input: UpdateUserInput,
    ) -> AuthResult<User> {
        let changes = input.validate()?;

        let mut user = GetUserUseCase::new(Arc::clone(&self.user_repo))
            .execute(id)
            .await?;

        if !user.belongs_to(actor.tenant_id()) {
            return Err(AuthError::UserNotFound(id));
        }

        user.update(changes);
        let user = self.user_repo.update(&user).await?;

        tracing::info!(
            user_id = %user.id,
            tenant_id = %user.tenant_id,
            updated_by = %actor.id(),
            "User updated"
        );

        Ok(user)
    }
}
