//! Value Object Module

pub mod account_password;
pub mod email;
pub mod role;
