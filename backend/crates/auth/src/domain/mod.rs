//! Domain Layer
//!
//! Account entity, credential value objects and the repository trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::account::Account;
pub use repository::AccountRepository;
pub use value_object::{email::Email, role::Role};
