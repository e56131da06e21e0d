//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod config;
pub mod current_user;
pub mod login;
pub mod register;
pub mod token;

// Re-exports
pub use authorize::{authorize, authorize_any};
pub use config::AuthConfig;
pub use current_user::{CurrentUserOutput, CurrentUserUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token::TokenService;
