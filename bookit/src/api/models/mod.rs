//! API request and response data models.
//!
//! These structures define the public wire contract: Spanish field names,
//! `{error}` bodies on failure, `{mensaje, ...}` bodies on success. They are
//! distinct from the database models so the API and the storage layer can
//! evolve independently.
//!
//! Request DTOs declare every field as `Option` and handlers validate
//! presence explicitly. A missing field is a contract-level 400 with a
//! Spanish message, not a serde deserialization rejection.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub mod auth;
pub mod clients;
pub mod reservations;
pub mod stats;

/// Plain confirmation body: `{"mensaje": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub mensaje: String,
}

impl MessageResponse {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self { mensaje: mensaje.into() }
    }
}

/// `?id=` query parameter used by the get-one and delete endpoints.
/// Optional so its absence surfaces as the contract's 400, not a query
/// rejection.
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct IdQuery {
    pub id: Option<i64>,
}
