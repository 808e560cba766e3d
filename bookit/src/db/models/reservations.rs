//! Database models for reservations.

use chrono::{NaiveDate, NaiveTime};
use sqlx::FromRow;

use crate::api::models::reservations::ReservationStatus;
use crate::types::{ClientId, MesaId, ReservationId};

/// Database request for creating a reservation.
///
/// There is no `estado` field on purpose: creation always persists
/// `pendiente`, so the type makes supplying anything else impossible.
#[derive(Debug, Clone)]
pub struct ReservationCreateDBRequest {
    pub cliente_id: ClientId,
    pub mesa_id: Option<MesaId>,
    pub numero_personas: i32,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub notas_especiales: Option<String>,
}

/// Database request for updating a reservation. Only the status is mutable
/// through the API.
#[derive(Debug, Clone)]
pub struct ReservationUpdateDBRequest {
    pub estado: ReservationStatus,
}

/// Database row for a reservation, flattened with the joined client fields
/// and the (optional) assigned table.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationDBResponse {
    pub id: ReservationId,
    pub cliente_id: ClientId,
    pub mesa_id: Option<MesaId>,
    pub numero_personas: i32,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub estado: ReservationStatus,
    pub notas_especiales: Option<String>,
    pub cliente_nombre: String,
    pub cliente_telefono: Option<String>,
    pub cliente_email: Option<String>,
    pub mesa_numero: Option<i32>,
    pub mesa_capacidad: Option<i32>,
}
