//! Database layer: PostgreSQL access via SQLx behind per-entity
//! repositories.
//!
//! Every table except `usuarios` is owned by an account through its
//! `usuario_id` column, and every repository method on those tables takes
//! the owner id and folds it into the WHERE clause. That keeps the single
//! access-control boundary of the system - the owning-account filter - in
//! one layer instead of repeated per handler.
//!
//! - [`handlers`]: repository implementations (queries live here)
//! - [`models`]: database-facing request/row structs
//! - [`errors`]: classification of sqlx errors into [`errors::DbError`]
//!
//! Repositories wrap a `&mut PgConnection`, so they work over a pool
//! connection or inside a transaction alike:
//!
//! ```ignore
//! let mut conn = pool.acquire().await?;
//! let mut clients = Clients::new(&mut conn);
//! let rows = clients.list(account_id).await?;
//! ```
//!
//! Migrations live in `migrations/` and run on startup via
//! [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
