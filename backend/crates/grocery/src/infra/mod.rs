//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::InMemoryGroceryRepository;
pub use postgres::PgGroceryRepository;
