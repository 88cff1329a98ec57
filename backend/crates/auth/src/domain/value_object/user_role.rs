use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Closed set of roles a condominium user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Administrator,
    HouseOwner,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown user role: {0}")]
pub struct UnknownRole(pub String);

impl UserRole {
    pub const ALL: [UserRole; 2] = [UserRole::Administrator, UserRole::HouseOwner];

    /// Storage and wire code
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Administrator => "administrator",
            HouseOwner => "house_owner",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "administrator" => Some(Administrator),
            "house_owner" => Some(HouseOwner),
            _ => None,
        }
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::from_code(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
