//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Signed access tokens (JWT, HMAC)

pub mod password;
pub mod token;
