//! Token Service
//!
//! Holds one codec per token kind. Access and refresh tokens differ only by
//! secret and lifetime, so a token of one kind never verifies as the other.

use chrono::{DateTime, Utc};
use platform::token::{TokenCodec, TokenCodecError};

use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;
use crate::domain::value_object::token_payload::TokenPayload;
use crate::error::{AuthError, AuthResult, TokenError};

/// Freshly minted access and refresh tokens
#[derive(Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair").finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct TokenService {
    access: TokenCodec,
    refresh: TokenCodec,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access: TokenCodec::new(&config.access_token),
            refresh: TokenCodec::new(&config.refresh_token),
        }
    }

    pub fn issue_pair(&self, payload: &TokenPayload) -> AuthResult<TokenPair> {
        self.issue_pair_at(payload, Utc::now())
    }

    pub fn issue_pair_at(
        &self,
        payload: &TokenPayload,
        issued_at: DateTime<Utc>,
    ) -> AuthResult<TokenPair> {
        let encoding_error = |e: TokenCodecError| AuthError::TokenEncoding(e.to_string());

        Ok(TokenPair {
            access_token: self
                .access
                .mint_at(payload, issued_at)
                .map_err(encoding_error)?,
            refresh_token: self
                .refresh
                .mint_at(payload, issued_at)
                .map_err(encoding_error)?,
        })
    }

    /// Verify an access token and turn its payload into a [`Principal`]
    pub fn authenticate_access(&self, token: &str) -> Result<Principal, TokenError> {
        let payload = verify_and_parse(&self.access, token).map_err(|reason| {
            tracing::debug!(%reason, "Access token rejected");
            TokenError::Invalid
        })?;

        Ok(Principal::from_verified(payload))
    }

    /// Verify a refresh token. Every failure reads as an expired session.
    pub fn authenticate_refresh(&self, token: &str) -> AuthResult<TokenPayload> {
        verify_and_parse(&self.refresh, token).map_err(|reason| {
            tracing::debug!(%reason, "Refresh token rejected");
            AuthError::RefreshTokenExpired
        })
    }
}

fn verify_and_parse(codec: &TokenCodec, token: &str) -> Result<TokenPayload, String> {
    codec.verify(token).map_err(|e| e.to_string())?;
    let claims = codec.decode(token).map_err(|e| e.to_string())?;
    TokenPayload::parse(claims).map_err(|e| e.to_string())
}
