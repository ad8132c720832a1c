//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod register;
pub mod session;
pub mod token;
pub mod validate_token;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use session::{AuthSession, UserProfile};
pub use validate_token::{AuthenticatedUser, ValidateTokenUseCase};
