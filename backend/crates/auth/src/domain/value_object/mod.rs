//! Value Object Module

pub mod email;
pub mod token_payload;
pub mod user_role;

pub use kernel::id::{TenantId, UserId};
