//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{CurrentPrincipal, RequiredRoles, require_access_token, require_roles};
pub use router::{api_router, auth_router, auth_routes, user_routes};
