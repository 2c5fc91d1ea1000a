//! Value Object Module

pub mod address;
pub mod catalog;
pub mod document;
pub mod fields;
pub mod period;
pub mod rating;
