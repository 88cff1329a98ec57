//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! The HTTP status of an error depends on which endpoint raised it: an
//! unclassified failure is a 400 on sign-up and login but a 500 on the token
//! endpoints, and a missing user is a 401 while refreshing but a 404 on a
//! protected resource. [`AuthError::kind_for`] is the single lookup for that
//! policy.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::{TenantId, UserId};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Which half of an email/password pair failed
///
/// Both halves are the same error kind; only the message differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidCredentials {
    #[error("Invalid email")]
    Email,

    #[error("Invalid password")]
    Password,
}

/// Bearer token rejection reasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No `Authorization: Bearer <token>` header
    #[error("Token not found")]
    NotFound,

    /// Bad signature, expired, malformed or wrong payload shape
    #[error("Invalid token")]
    Invalid,
}

impl TokenError {
    pub const fn code(&self) -> &'static str {
        match self {
            TokenError::NotFound => "TOKEN_NOT_FOUND",
            TokenError::Invalid => "TOKEN_INVALID",
        }
    }
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    InvalidCredentials(#[from] InvalidCredentials),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    /// Principal's role is not in the route's required set
    #[error("Insufficient role for this resource")]
    Forbidden,

    #[error("User with id {0} not found")]
    UserNotFound(UserId),

    #[error("Condominium with id {0} not found")]
    TenantNotFound(TenantId),

    #[error("User with email {0} already exists")]
    UserAlreadyExists(String),

    #[error("{0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    #[error("Token encoding error: {0}")]
    TokenEncoding(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// HTTP surface an error is reported through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    SignUp,
    LogIn,
    ValidateAccessToken,
    RefreshAccessToken,
    /// Any route behind the access guard
    Protected,
}

impl Endpoint {
    /// Kind used for errors this endpoint does not classify
    pub const fn fallback_kind(self) -> ErrorKind {
        match self {
            Endpoint::SignUp | Endpoint::LogIn => ErrorKind::BadRequest,
            Endpoint::ValidateAccessToken | Endpoint::RefreshAccessToken | Endpoint::Protected => {
                ErrorKind::InternalServerError
            }
        }
    }
}

impl AuthError {
    /// Error kind as reported by `endpoint`
    pub fn kind_for(&self, endpoint: Endpoint) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials(_)
            | AuthError::Token(_)
            | AuthError::RefreshTokenExpired => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound(_) => match endpoint {
                Endpoint::ValidateAccessToken | Endpoint::RefreshAccessToken => {
                    ErrorKind::Unauthorized
                }
                Endpoint::Protected => ErrorKind::NotFound,
                Endpoint::SignUp | Endpoint::LogIn => endpoint.fallback_kind(),
            },
            AuthError::TenantNotFound(_) => match endpoint {
                Endpoint::SignUp | Endpoint::Protected => ErrorKind::NotFound,
                _ => endpoint.fallback_kind(),
            },
            AuthError::UserAlreadyExists(_) => ErrorKind::Conflict,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::PasswordHash(_)
            | AuthError::TokenEncoding(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => endpoint.fallback_kind(),
        }
    }

    /// Failures that carry infrastructure detail the caller must not see
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            AuthError::PasswordHash(_)
                | AuthError::TokenEncoding(_)
                | AuthError::Database(_)
                | AuthError::Internal(_)
        )
    }

    /// Convert to AppError as reported by `endpoint`
    pub fn to_app_error(&self, endpoint: Endpoint) -> AppError {
        let kind = self.kind_for(endpoint);

        if self.is_unexpected() {
            return AppError::new(kind, "Unexpected error");
        }

        let err = AppError::new(kind, self.to_string());
        match self {
            AuthError::Token(_) | AuthError::RefreshTokenExpired => {
                err.with_action("Log in again to obtain a new token")
            }
            _ => err,
        }
    }

    /// Report at a level matching the kind: server faults are errors,
    /// credential and token rejections are warnings.
    fn log(&self, kind: ErrorKind) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, status = kind.status_code(), "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, status = kind.status_code(), "Password hashing failed");
            }
            AuthError::TokenEncoding(msg) | AuthError::Internal(msg) => {
                tracing::error!(message = %msg, status = kind.status_code(), "Auth internal error");
            }
            AuthError::InvalidCredentials(reason) => {
                tracing::warn!(reason = %reason, "Invalid login attempt");
            }
            AuthError::Token(e) => {
                tracing::warn!(code = e.code(), "Bearer token rejected");
            }
            AuthError::RefreshTokenExpired => {
                tracing::warn!("Refresh token rejected");
            }
            AuthError::Forbidden => {
                tracing::warn!("Role check failed");
            }
            _ => {
                tracing::debug!(error = %self, status = kind.status_code(), "Auth error");
            }
        }
    }

    /// Bind this error to the endpoint that reports it
    pub fn at(self, endpoint: Endpoint) -> EndpointError {
        EndpointError {
            endpoint,
            error: self,
        }
    }
}

/// An [`AuthError`] paired with the endpoint whose status policy applies
#[derive(Debug)]
pub struct EndpointError {
    pub endpoint: Endpoint,
    pub error: AuthError,
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        let kind = self.error.kind_for(self.endpoint);
        self.error.log(kind);
        self.error.to_app_error(self.endpoint).into_response()
    }
}

/// Errors escaping guarded routes and middleware
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.at(Endpoint::Protected).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_messages() {
        assert_eq!(
            AuthError::from(InvalidCredentials::Email).to_string(),
            "Invalid email"
        );
        assert_eq!(
            AuthError::from(InvalidCredentials::Password).to_string(),
            "Invalid password"
        );
    }

    #[test]
    fn test_unclassified_errors_depend_on_endpoint() {
        let err = AuthError::Internal("boom".to_string());
        assert_eq!(err.kind_for(Endpoint::SignUp), ErrorKind::BadRequest);
        assert_eq!(err.kind_for(Endpoint::LogIn), ErrorKind::BadRequest);
        assert_eq!(
            err.kind_for(Endpoint::ValidateAccessToken),
            ErrorKind::InternalServerError
        );
        assert_eq!(
            err.kind_for(Endpoint::RefreshAccessToken),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_user_not_found_depends_on_endpoint() {
        let err = AuthError::UserNotFound(UserId::new(1));
        assert_eq!(err.kind_for(Endpoint::RefreshAccessToken), ErrorKind::Unauthorized);
        assert_eq!(err.kind_for(Endpoint::ValidateAccessToken), ErrorKind::Unauthorized);
        assert_eq!(err.kind_for(Endpoint::Protected), ErrorKind::NotFound);
    }

    #[test]
    fn test_sign_up_kinds() {
        assert_eq!(
            AuthError::UserAlreadyExists("a@b.com".into()).kind_for(Endpoint::SignUp),
            ErrorKind::Conflict
        );
        assert_eq!(
            AuthError::TenantNotFound(TenantId::new(9)).kind_for(Endpoint::SignUp),
            ErrorKind::NotFound
        );
        assert_eq!(
            AuthError::Validation("bad".into()).kind_for(Endpoint::SignUp),
            ErrorKind::BadRequest
        );
    }

    #[test]
    fn test_auth_failures_are_unauthorized_everywhere() {
        for endpoint in [
            Endpoint::LogIn,
            Endpoint::ValidateAccessToken,
            Endpoint::RefreshAccessToken,
            Endpoint::Protected,
        ] {
            assert_eq!(
                AuthError::from(InvalidCredentials::Password).kind_for(endpoint),
                ErrorKind::Unauthorized
            );
            assert_eq!(
                AuthError::from(TokenError::NotFound).kind_for(endpoint),
                ErrorKind::Unauthorized
            );
            assert_eq!(
                AuthError::RefreshTokenExpired.kind_for(endpoint),
                ErrorKind::Unauthorized
            );
        }
        assert_eq!(
            AuthError::Forbidden.kind_for(Endpoint::Protected),
            ErrorKind::Forbidden
        );
    }

    #[test]
    fn test_unexpected_errors_hide_detail() {
        let app_err = AuthError::Internal("connection string leaked".to_string())
            .to_app_error(Endpoint::RefreshAccessToken);
        assert_eq!(app_err.status_code(), 500);
        assert!(!app_err.message().contains("connection string"));
    }
}
