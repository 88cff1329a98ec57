//! Platform Crate - Technical Infrastructure
//!
//! Security primitives the auth crate builds on:
//! - Password hashing (Argon2id with a configurable work factor)
//! - Signed, expiring tokens (HS256 JWT)
//! - Cookie building and parsing

pub mod cookie;
pub mod password;
pub mod token;
