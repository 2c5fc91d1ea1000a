//! Recruitment Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Profiles, postings, applications, evaluations, search filter
//! - `application/` - Use cases per workflow
//! - `infra/` - PostgreSQL store
//! - `presentation/` - HTTP handlers, form DTOs, routers, views
//!
//! ## Features
//! - Company and candidate registration with e-mail verification
//! - Job postings with applicant selection
//! - Candidate search with free text, catalog facets and pagination
//! - Company evaluations, open only to selected candidates
//! - Logo and résumé uploads
//! - Administration with cascading deletes
//!
//! ## Consistency
//! - One application per (candidate, job) and one evaluation per
//!   (candidate, company), enforced by unique indexes
//! - Registration writes account and profile in one transaction
//! - Stored files are swapped only after the record points at the new one

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use domain::repository::RecruitmentStore;
pub use error::{RecruitmentError, RecruitmentResult};
pub use infra::postgres::PgRecruitmentRepository;
pub use presentation::{RecruitmentState, recruitment_router, registration_router};
