//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::{PG_FOREIGN_KEY_VIOLATION, PG_UNIQUE_VIOLATION};
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{TenantId, UserId, email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    id,
    condominium_id,
    email,
    password,
    first_name,
    last_name,
    phone,
    role,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let query = format!(
            r#"
            INSERT INTO users (
                condominium_id,
                email,
                password,
                first_name,
                last_name,
                phone,
                role
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user.tenant_id.value())
            .bind(user.email.as_str())
            .bind(user.password_hash.as_phc_string())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone)
            .bind(user.role.code())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_write_error(e, &user.email, user.tenant_id))?;

        row.into_user()
    }

    async fn update(&self, user: &User) -> AuthResult<User> {
        let query = format!(
            r#"
            UPDATE users SET
                email = $2,
                first_name = $3,
                last_name = $4,
                phone = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id.value())
            .bind(user.email.as_str())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_write_error(e, &user.email, user.tenant_id))?
            .ok_or(AuthError::UserNotFound(user.id))?;

        row.into_user()
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn delete(&self, id: UserId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

/// The store enforces email uniqueness and the condominium foreign key
fn classify_write_error(err: sqlx::Error, email: &Email, tenant_id: TenantId) -> AuthError {
    let code = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        Some(PG_UNIQUE_VIOLATION) => AuthError::UserAlreadyExists(email.to_string()),
        Some(PG_FOREIGN_KEY_VIOLATION) => AuthError::TenantNotFound(tenant_id),
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    condominium_id: i64,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    phone: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role in store: {}", self.role)))?;

        let password_hash = HashedPassword::from_phc_string(self.password)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash for user {}: {e}", self.id)))?;

        Ok(User {
            id: UserId::new(self.id),
            tenant_id: TenantId::new(self.condominium_id),
            email: Email::from_db(self.email),
            password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
