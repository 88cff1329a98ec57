//! Signed Tokens
//!
//! Compact HS256 JWTs carrying an arbitrary serializable payload plus the
//! registered `jti` / `iat` / `exp` claims. `jti` is random per token, so two
//! tokens minted in the same second for the same payload still differ.
//!
//! One [`TokenCodec`] is bound to one secret
//! and one TTL; a token minted by one codec never verifies under another
//! codec's secret.
//!
//! [`TokenCodec::decode`] reads the payload WITHOUT checking the signature.
//! Call it only after [`TokenCodec::verify`] succeeded.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{Rng, rngs::OsRng};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenCodecError {
    #[error("Token expired")]
    Expired,

    #[error("Token signature mismatch")]
    InvalidSignature,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenCodecError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => TokenCodecError::Expired,
            JwtErrorKind::InvalidSignature => TokenCodecError::InvalidSignature,
            _ => TokenCodecError::Malformed(err.to_string()),
        }
    }
}

/// Secret and lifetime for one kind of token
#[derive(Clone)]
pub struct TokenKey {
    pub secret: Vec<u8>,
    pub ttl: Duration,
}

impl TokenKey {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKey")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[derive(Serialize)]
struct Envelope<'a, P> {
    #[serde(flatten)]
    payload: &'a P,
    jti: String,
    iat: i64,
    exp: i64,
}

/// HS256 codec bound to one [`TokenKey`]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(key: &TokenKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(&key.secret),
            decoding: DecodingKey::from_secret(&key.secret),
            ttl: key.ttl,
            validation,
        }
    }

    /// Mint a token issued now
    pub fn mint<P: Serialize>(&self, payload: &P) -> Result<String, TokenCodecError> {
        self.mint_at(payload, Utc::now())
    }

    /// Mint a token as if issued at `issued_at`
    pub fn mint_at<P: Serialize>(
        &self,
        payload: &P,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenCodecError> {
        let envelope = Envelope {
            payload,
            jti: format!("{:032x}", OsRng.r#gen::<u128>()),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &envelope, &self.encoding)
            .map_err(|e| TokenCodecError::Encoding(e.to_string()))
    }

    /// Check signature and expiry
    pub fn verify(&self, token: &str) -> Result<(), TokenCodecError> {
        jsonwebtoken::decode::<Value>(token, &self.decoding, &self.validation)?;
        Ok(())
    }

    /// Extract the claims without verifying anything
    pub fn decode(&self, token: &str) -> Result<Value, TokenCodecError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<Value>(token, &DecodingKey::from_secret(&[]), &validation)?;
        Ok(data.claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn codec(secret: &str, ttl_secs: i64) -> TokenCodec {
        TokenCodec::new(&TokenKey::new(secret, Duration::seconds(ttl_secs)))
    }

    #[test]
    fn test_mint_verify_decode_roundtrip() {
        let codec = codec("access-secret", 900);
        let payload = json!({ "id": 1, "tenant_id": 9, "role": "administrator" });

        let token = codec.mint(&payload).unwrap();
        codec.verify(&token).unwrap();

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims["id"], 1);
        assert_eq!(claims["tenant_id"], 9);
        assert_eq!(claims["role"], "administrator");
        assert_eq!(
            claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap(),
            900
        );
    }

    #[test]
    fn test_tokens_minted_together_differ() {
        let codec = codec("secret", 60);
        let payload = json!({ "id": 1 });
        let issued_at = Utc::now();

        let first = codec.mint_at(&payload, issued_at).unwrap();
        let second = codec.mint_at(&payload, issued_at).unwrap();
        assert_ne!(first, second);

        let jti = codec.decode(&first).unwrap()["jti"].as_str().unwrap().to_string();
        assert_eq!(jti.len(), 32);
        assert_ne!(jti, codec.decode(&second).unwrap()["jti"]);
    }

    #[test]
    fn test_token_has_three_segments() {
        let token = codec("s", 60).mint(&json!({ "id": 1 })).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let access = codec("access-secret", 900);
        let refresh = codec("refresh-secret", 3600);
        let payload = json!({ "id": 1 });

        let access_token = access.mint(&payload).unwrap();
        let refresh_token = refresh.mint(&payload).unwrap();

        assert_eq!(
            refresh.verify(&access_token),
            Err(TokenCodecError::InvalidSignature)
        );
        assert_eq!(
            access.verify(&refresh_token),
            Err(TokenCodecError::InvalidSignature)
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let codec = codec("secret", 60);
        let issued_at = Utc::now() - Duration::seconds(120);

        let token = codec.mint_at(&json!({ "id": 1 }), issued_at).unwrap();
        assert_eq!(codec.verify(&token), Err(TokenCodecError::Expired));
    }

    #[test]
    fn test_recent_token_is_accepted() {
        let codec = codec("secret", 60);
        let issued_at = Utc::now() - Duration::seconds(30);

        let token = codec.mint_at(&json!({ "id": 1 }), issued_at).unwrap();
        assert!(codec.verify(&token).is_ok());
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let codec = codec("secret", 60);
        let token = codec.mint(&json!({ "id": 1 })).unwrap();
        let forged = codec.mint(&json!({ "id": 2 })).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = forged.split('.').nth(1).unwrap();
        let spliced = parts.join(".");

        assert_eq!(
            codec.verify(&spliced),
            Err(TokenCodecError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = codec("secret", 60);
        assert!(matches!(
            codec.verify("invalid-token"),
            Err(TokenCodecError::Malformed(_))
        ));
        assert!(matches!(
            codec.decode("invalid-token"),
            Err(TokenCodecError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_ignores_signature_and_expiry() {
        let minted = codec("secret", 60)
            .mint_at(&json!({ "id": 5 }), Utc::now() - Duration::seconds(600))
            .unwrap();

        let claims = codec("another-secret", 60).decode(&minted).unwrap();
        assert_eq!(claims["id"], 5);
    }

    #[test]
    fn test_debug_hides_secret() {
        let key = TokenKey::new("super-secret", Duration::seconds(1));
        assert!(!format!("{key:?}").contains("super-secret"));
    }
}
