//! Token Payload
//!
//! The claims a token carries besides `iat` / `exp`. Decoded claims are
//! untrusted until [`TokenPayload::parse`] accepts them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::user_role::UserRole;
use super::{TenantId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub id: UserId,
    pub tenant_id: TenantId,
    pub role: UserRole,
}

#[derive(Debug, Error)]
#[error("Token payload has an unexpected shape: {0}")]
pub struct PayloadShapeError(#[from] serde_json::Error);

impl TokenPayload {
    /// Parse-or-reject: `id` and `tenant_id` must be integers and `role` a
    /// known role code. Registered claims are ignored.
    pub fn parse(claims: Value) -> Result<Self, PayloadShapeError> {
        Ok(serde_json::from_value(claims)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_accepts_expected_shape() {
        let payload = TokenPayload::parse(json!({
            "id": 4,
            "tenant_id": 2,
            "role": "house_owner",
            "iat": 1_700_000_000,
            "exp": 1_700_000_900,
        }))
        .unwrap();

        assert_eq!(payload.id, UserId::new(4));
        assert_eq!(payload.tenant_id, TenantId::new(2));
        assert_eq!(payload.role, UserRole::HouseOwner);
    }

    #[test]
    fn test_parse_rejects_missing_role() {
        assert!(TokenPayload::parse(json!({ "id": 4, "tenant_id": 2 })).is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        assert!(
            TokenPayload::parse(json!({ "id": "4", "tenant_id": 2, "role": "administrator" }))
                .is_err()
        );
        assert!(
            TokenPayload::parse(json!({ "id": 4.5, "tenant_id": 2, "role": "administrator" }))
                .is_err()
        );
        assert!(TokenPayload::parse(json!({ "id": 4, "tenant_id": 2, "role": "root" })).is_err());
        assert!(TokenPayload::parse(json!("not an object")).is_err());
    }
}
