//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - Error kinds with their HTTP status table, and the unified [`error::app_error::AppError`]
//! - Typed integer ids for persisted entities
//!
//! Nothing here knows about tokens, passwords or HTTP routing.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
