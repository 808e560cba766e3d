//! Database models for clients.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::types::ClientId;

/// Database request for creating a client. Optional contact fields are
/// stored as NULL when absent.
#[derive(Debug, Clone)]
pub struct ClientCreateDBRequest {
    pub nombre: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub preferencias: Option<String>,
}

/// Database request for updating a client in place.
#[derive(Debug, Clone)]
pub struct ClientUpdateDBRequest {
    pub nombre: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub preferencias: Option<String>,
}

/// Database row for a client (owner column omitted; scoping happens in the
/// repository).
#[derive(Debug, Clone, FromRow)]
pub struct ClientDBResponse {
    pub id: ClientId,
    pub nombre: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub preferencias: Option<String>,
    pub visitas: i32,
    pub ultima_visita: Option<NaiveDate>,
    pub fecha_creacion: DateTime<Utc>,
}
