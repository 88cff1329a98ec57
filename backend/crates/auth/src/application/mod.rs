//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod delete_user;
pub mod get_user;
pub mod log_in;
pub mod refresh_session;
pub mod sign_up;
pub mod token_service;
pub mod update_user;
pub mod validate_access_token;
pub mod verify_credentials;

// Re-exports
pub use config::AuthConfig;
pub use delete_user::DeleteUserUseCase;
pub use get_user::GetUserUseCase;
pub use log_in::{LogInInput, LogInUseCase, SessionOutput};
pub use refresh_session::RefreshSessionUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use token_service::{TokenPair, TokenService};
pub use update_user::{UpdateUserInput, UpdateUserUseCase};
pub use validate_access_token::ValidateAccessTokenUseCase;
pub use verify_credentials::VerifyCredentialsUseCase;
