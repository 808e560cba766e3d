//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection, provides strongly-typed
//! operations for one entity, and returns models from
//! [`crate::db::models`]. The owned entities (clients, reservations)
//! implement [`OwnedRepository`]; accounts and statistics have their own
//! shapes.

pub mod accounts;
pub mod clients;
pub mod repository;
pub mod reservations;
pub mod stats;

pub use accounts::Accounts;
pub use clients::Clients;
pub use repository::OwnedRepository;
pub use reservations::Reservations;
pub use stats::Stats;
