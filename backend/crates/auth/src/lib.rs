//! Auth (Authentication & Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Use cases, token service, configuration
//! - `infra/` - PostgreSQL repository (in-memory one behind `test-support`)
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Email + password login issuing an access / refresh token pair
//! - Refresh token rotation through an HttpOnly cookie
//! - Bearer token guard attaching the authenticated [`domain::Principal`]
//! - Role gate (Administrator, HouseOwner) layered after the guard
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Access and refresh tokens signed with distinct secrets, never interchangeable
//! - Tenant and role are trusted only from a verified token
//! - No server-side session state; expiry is embedded in the token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError};
pub use error::{AuthError, AuthResult, Endpoint, TokenError};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{api_router, auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
