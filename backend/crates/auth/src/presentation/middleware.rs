//! Auth Middleware
//!
//! Two gates for protected routes, layered in this order:
//!
//! 1. [`require_access_token`] verifies the bearer token and attaches the
//!    [`Principal`] to the request.
//! 2. [`require_roles`] admits the request only if the principal holds one
//!    of the route's roles. Routes open to any authenticated user skip it.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::token_service::TokenService;
use crate::domain::entity::principal::Principal;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult, TokenError};

const BEARER_PREFIX: &str = "Bearer ";

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, TokenError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(TokenError::NotFound)
}

/// Middleware that requires a valid access token
pub async fn require_access_token(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let principal = {
        let token = bearer_token(req.headers())?;
        tokens.authenticate_access(token)?
    };

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Non-empty set of roles a route admits
#[derive(Debug, Clone, Copy)]
pub struct RequiredRoles(&'static [UserRole]);

impl RequiredRoles {
    pub const ADMINISTRATOR: Self = Self::new(&[UserRole::Administrator]);

    pub const fn new(roles: &'static [UserRole]) -> Self {
        assert!(!roles.is_empty(), "a role requirement needs at least one role");
        Self(roles)
    }

    /// Fails closed when no principal was attached
    pub fn authorize(&self, principal: Option<&Principal>) -> AuthResult<()> {
        let principal = principal.ok_or(TokenError::NotFound)?;

        if principal.has_any_role(self.0) {
            Ok(())
        } else {
            tracing::debug!(
                user_id = %principal.id(),
                role = %principal.role(),
                "Principal lacks a required role"
            );
            Err(AuthError::Forbidden)
        }
    }
}

/// Middleware that requires one of the given roles. Layer it inside
/// [`require_access_token`].
pub async fn require_roles(
    State(required): State<RequiredRoles>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    required.authorize(req.extensions().get::<Principal>())?;
    Ok(next.run(req).await)
}

/// Principal attached by [`require_access_token`]
#[derive(Debug, Clone, Copy)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .map(CurrentPrincipal)
            .ok_or(AuthError::Token(TokenError::NotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::token_payload::TokenPayload;
    use crate::domain::value_object::{TenantId, UserId};
    use axum::http::HeaderValue;

    fn principal(role: UserRole) -> Principal {
        Principal::from_verified(TokenPayload {
            id: UserId::new(1),
            tenant_id: TenantId::new(1),
            role,
        })
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), Err(TokenError::NotFound));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), Err(TokenError::NotFound));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), Err(TokenError::NotFound));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer a.b.c"));
        assert_eq!(bearer_token(&headers), Ok("a.b.c"));
    }

    #[test]
    fn test_house_owner_is_forbidden_from_admin_routes() {
        let owner = principal(UserRole::HouseOwner);
        assert!(matches!(
            RequiredRoles::ADMINISTRATOR.authorize(Some(&owner)),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn test_matching_role_is_allowed() {
        let owner = principal(UserRole::HouseOwner);
        assert!(
            RequiredRoles::new(&[UserRole::HouseOwner])
                .authorize(Some(&owner))
                .is_ok()
        );
        assert!(RequiredRoles::new(&UserRole::ALL).authorize(Some(&owner)).is_ok());
        assert!(
            RequiredRoles::ADMINISTRATOR
                .authorize(Some(&principal(UserRole::Administrator)))
                .is_ok()
        );
    }

    #[test]
    fn test_missing_principal_fails_closed() {
        assert!(matches!(
            RequiredRoles::ADMINISTRATOR.authorize(None),
            Err(AuthError::Token(TokenError::NotFound))
        ));
    }
}
