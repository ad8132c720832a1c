//! Grocery Backend Module
//!
//! Per-user grocery item CRUD.
//!
//! - `domain/` - `GroceryItem`, value objects, repository trait
//! - `application/` - create, list, get, update and delete use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - DTOs, handlers, router
//!
//! Items are always scoped to the authenticated owner: another user's item
//! answers exactly like a missing one (`404`).

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use error::{GroceryError, GroceryResult};
pub use infra::{InMemoryGroceryRepository, PgGroceryRepository};
pub use presentation::router::{grocery_router, grocery_router_generic};
