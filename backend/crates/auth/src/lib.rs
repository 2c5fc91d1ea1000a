//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, credential value objects, repository trait
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, role guard
//!
//! ## Features
//! - One account per (role, e-mail) for companies, candidates and admins
//! - Login per role with a signed, stateless session cookie
//! - E-mail verification links with expiry and re-issue
//! - Role guard middleware for the protected areas
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Session and verification tokens signed with HMAC-SHA256
//! - Login answers never reveal whether an e-mail is registered

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::check_session::Identity;
pub use application::config::AuthConfig;
pub use domain::value_object::role::Role;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
