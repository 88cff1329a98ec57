//! Cookie Helpers
//!
//! Building `Set-Cookie` values and reading a single cookie from a request.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    /// Cross-site requests allowed; browsers require `Secure` alongside it
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes shared by every cookie of one name
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl CookieConfig {
    /// `name=value; HttpOnly; Secure; SameSite=..; Path=..; Max-Age=..`
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut attributes = vec![format!("{}={}", self.name, value)];

        if self.http_only {
            attributes.push("HttpOnly".to_string());
        }
        if self.secure {
            attributes.push("Secure".to_string());
        }
        attributes.push(format!("SameSite={}", self.same_site.as_str()));
        attributes.push(format!("Path={}", self.path));
        if let Some(max_age) = self.max_age_secs {
            attributes.push(format!("Max-Age={}", max_age));
        }

        attributes.join("; ")
    }

    /// `Set-Cookie` header value. `None` if `value` holds bytes a header cannot carry.
    pub fn set_cookie_header(&self, value: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value)).ok()
    }
}

/// Value of the first cookie called `name`
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}
