//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod sign_in;
pub mod sign_up;
pub mod token;
pub mod verify_email;

// Re-exports
pub use check_session::{Identity, SessionVerdict, verify_session};
pub use config::AuthConfig;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase, prepare_account};
pub use verify_email::{VerifyEmailUseCase, VerifyOutcome, send_verification_mail};
