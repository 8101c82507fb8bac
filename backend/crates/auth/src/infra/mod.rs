//! Infrastructure Layer
//!
//! Database implementations and the in-memory session table.

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryAuthRepository, InMemorySessionStore};
pub use postgres::PgAuthRepository;
