//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every other crate speaks:
//! - Error classification and the unified [`error::app_error::AppError`]
//! - Typed UUID identifiers for users and grocery items
//! - A JSON body extractor that reports malformed input as `400 Bad Request`
//!
//! Only things whose meaning is identical across `auth` and `grocery`
//! belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
