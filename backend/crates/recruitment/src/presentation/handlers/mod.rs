//! HTTP Handlers
//!
//! One module per area. Mutations answer 303 to the page that lists the
//! result; validation problems re-render the originating form with 400.
//! Handlers return `RecruitmentResult<Response>` so other failures render
//! through `RecruitmentError`'s `IntoResponse`.

pub mod admin;
pub mod candidate;
pub mod company;
pub mod public;
pub mod registration;

use axum::response::{IntoResponse, Redirect, Response};

use crate::error::RecruitmentError;

/// Re-render the form when the error belongs there, plain response otherwise
fn form_failure(e: RecruitmentError, render: impl FnOnce(&[String]) -> Response) -> Response {
    match e.form_errors() {
        Some(errors) => {
            e.log();
            render(&errors)
        }
        None => e.into_response(),
    }
}

fn see_other(path: &str) -> Response {
    Redirect::to(path).into_response()
}
