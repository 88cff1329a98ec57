//! Domain Layer
//!
//! Entities, value objects, and the repository trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    principal::Principal,
    user::{NewUser, User, UserUpdate},
};
pub use repository::UserRepository;
