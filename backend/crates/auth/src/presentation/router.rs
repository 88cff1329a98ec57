//! Auth Router
//!
//! `/auth/*` is public. `/user/*` sits behind the access guard, and the
//! administrator-only routes add the role gate inside it. `PUT /user` edits
//! the caller's own profile and is open to every role.

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};
use sqlx::PgPool;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{RequiredRoles, require_access_token, require_roles};

/// Create the API router with the PostgreSQL repository
pub fn auth_router(pool: PgPool, config: AuthConfig) -> AuthResult<Router> {
    let state = AuthAppState::new(PgUserRepository::new(pool), config)?;
    Ok(api_router(state))
}

/// `/auth` and `/user` routes for any repository implementation
pub fn api_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .nest("/auth", auth_routes(state.clone()))
        .nest("/user", user_routes(state))
}

/// Public session endpoints
pub fn auth_routes<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/sign-up", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::log_in::<R>))
        .route(
            "/validate-access-token",
            post(handlers::validate_access_token::<R>),
        )
        .route(
            "/refresh-access-token",
            post(handlers::refresh_access_token::<R>),
        )
        .with_state(state)
}

/// User endpoints, all requiring an access token
pub fn user_routes<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let admin_only = middleware::from_fn_with_state(RequiredRoles::ADMINISTRATOR, require_roles);
    let access_guard = middleware::from_fn_with_state(state.tokens.clone(), require_access_token);

    Router::new()
        .route("/info", get(handlers::user_info::<R>))
        .route(
            "/",
            put(handlers::update_current_user::<R>)
                .merge(post(handlers::create_user::<R>).route_layer(admin_only.clone())),
        )
        .route(
            "/{id}",
            patch(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>)
                .route_layer(admin_only),
        )
        .route_layer(access_guard)
        .with_state(state)
}
