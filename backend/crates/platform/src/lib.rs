//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with optional pepper)
//! - Client identification for rate-limit keys
//! - Fixed-window rate limiting: policies, keyed stores, axum middleware

pub mod client;
pub mod password;
pub mod rate_limit;
