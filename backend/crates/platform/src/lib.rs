//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the web crates:
//! - Signed tokens and other crypto helpers (HMAC-SHA256, Base64)
//! - Password hashing (Argon2id)
//! - Cookie building and parsing
//! - HTML escaping and the page shell
//! - Transactional mail
//! - Upload storage and the image pipeline

pub mod cookie;
pub mod crypto;
pub mod html;
pub mod mail;
pub mod media;
pub mod password;
