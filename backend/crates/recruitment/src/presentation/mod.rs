//! Presentation Layer
//!
//! HTTP handlers, form DTOs, routers and views.

pub mod dto;
pub mod handlers;
pub mod multipart;
pub mod router;
pub mod state;
pub mod views;

pub use router::{UPLOAD_BODY_LIMIT, recruitment_router, registration_router};
pub use state::RecruitmentState;
