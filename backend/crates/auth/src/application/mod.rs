//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod config;
pub mod create_user;
pub mod current_user;
pub mod get_user;
pub mod list_users;
pub mod sign_in;
pub mod sign_up;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AuthConfig;
pub use create_user::{CreateUserInput, CreateUserUseCase};
pub use current_user::CurrentUserUseCase;
pub use get_user::GetUserUseCase;
pub use list_users::{ListUsersInput, ListUsersUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
