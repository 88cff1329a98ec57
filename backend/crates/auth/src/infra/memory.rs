//! In-Memory Repository
//!
//! Same contract as the PostgreSQL repository, including the unique email
//! and known-condominium constraints. Backs the use case and router tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{TenantId, UserId, email::Email};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    next_id: i64,
    tenants: HashSet<TenantId>,
    users: BTreeMap<i64, User>,
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenants(tenants: impl IntoIterator<Item = TenantId>) -> Self {
        let repo = Self::new();
        for tenant in tenants {
            repo.add_tenant(tenant);
        }
        repo
    }

    pub fn add_tenant(&self, tenant: TenantId) {
        self.lock().tenants.insert(tenant);
    }

    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    // A panic while holding the lock cannot leave `State` half-written, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut state = self.lock();

        if state.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists(user.email.to_string()));
        }
        if !state.tenants.contains(&user.tenant_id) {
            return Err(AuthError::TenantNotFound(user.tenant_id));
        }

        state.next_id += 1;
        let now = Utc::now();
        let stored = User {
            id: UserId::new(state.next_id),
            tenant_id: user.tenant_id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(stored.id.value(), stored.clone());

        Ok(stored)
    }

    async fn update(&self, user: &User) -> AuthResult<User> {
        let mut state = self.lock();

        if state
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AuthError::UserAlreadyExists(user.email.to_string()));
        }

        let stored = state
            .users
            .get_mut(&user.id.value())
            .ok_or(AuthError::UserNotFound(user.id))?;
        stored.email = user.email.clone();
        stored.first_name = user.first_name.clone();
        stored.last_name = user.last_name.clone();
        stored.phone = user.phone.clone();
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.lock().users.get(&id.value()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn delete(&self, id: UserId) -> AuthResult<bool> {
        Ok(self.lock().users.remove(&id.value()).is_some())
    }
}
