//! Error Kind
//!
//! Closed classification of failures. Every kind maps to exactly one HTTP
//! status through [`ErrorKind::status_code`], which is the only place the
//! mapping lives.

use serde::Serialize;

/// Error classification
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
/// assert_eq!(ErrorKind::Conflict.as_str(), "Conflict");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - malformed input or an unclassified failure on input-driven endpoints
    BadRequest,
    /// 401 - missing, invalid or expired credentials
    Unauthorized,
    /// 403 - authenticated but not allowed
    Forbidden,
    /// 404 - the primary subject of the call does not exist
    NotFound,
    /// 409 - conflicts with stored state (e.g. duplicate email)
    Conflict,
    /// 422
    UnprocessableEntity,
    /// 500
    InternalServerError,
    /// 503 - a backing service (database) is unavailable
    ServiceUnavailable,
}

/// `(kind, status, reason phrase)`
const STATUS_TABLE: [(ErrorKind, u16, &str); 8] = [
    (ErrorKind::BadRequest, 400, "Bad Request"),
    (ErrorKind::Unauthorized, 401, "Unauthorized"),
    (ErrorKind::Forbidden, 403, "Forbidden"),
    (ErrorKind::NotFound, 404, "Not Found"),
    (ErrorKind::Conflict, 409, "Conflict"),
    (ErrorKind::UnprocessableEntity, 422, "Unprocessable Entity"),
    (ErrorKind::InternalServerError, 500, "Internal Server Error"),
    (ErrorKind::ServiceUnavailable, 503, "Service Unavailable"),
];

impl ErrorKind {
    #[inline]
    const fn entry(&self) -> (ErrorKind, u16, &'static str) {
        STATUS_TABLE[*self as usize]
    }

    /// HTTP status code for this kind
    #[inline]
    pub const fn status_code(&self) -> u16 {
        self.entry().1
    }

    /// Standard reason phrase, used as the problem `title`
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.entry().2
    }

    /// 5xx kinds. These are the ones worth an `error!` log line.
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
