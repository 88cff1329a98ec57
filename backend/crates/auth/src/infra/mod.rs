//! Infrastructure Layer
//!
//! Database implementations. The in-memory store is compiled only for tests
//! and for crates enabling the `test-support` feature.

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
