//! # fibra-database
//!
//! PostgreSQL connection management, bounded retry for pool exhaustion,
//! and concrete repository implementations for all Fibra Core entities.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod retry;

pub use connection::DatabasePool;
pub use retry::with_pool_retry;
