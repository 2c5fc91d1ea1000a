//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, middleware and views.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;

pub use handlers::AuthAppState;
pub use middleware::{RoleGuard, guard_role, guarded, require_role};
pub use router::auth_router;
