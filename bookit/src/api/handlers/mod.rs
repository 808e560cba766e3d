//! HTTP request handlers, one module per resource.
//!
//! Every handler follows the same shape: session check (via the
//! [`crate::auth::CurrentAccount`] extractor), explicit validation of the
//! payload, one repository call, JSON response. Validation failures return
//! immediately; there is no partial success.
//!
//! - [`auth`]: registration, login, logout, session check
//! - [`clients`]: client CRUD
//! - [`reservations`]: reservation CRUD
//! - [`stats`]: dashboard aggregates (today metrics, weekly histogram,
//!   upcoming reservations)

pub mod auth;
pub mod clients;
pub mod reservations;
pub mod stats;

use crate::errors::Error;

/// Router-wide fallback for a known path hit with the wrong verb.
pub async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}
