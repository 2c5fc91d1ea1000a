//! Entity Module

pub mod application;
pub mod candidate;
pub mod company;
pub mod evaluation;
pub mod history;
pub mod job;
