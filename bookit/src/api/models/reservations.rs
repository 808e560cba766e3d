//! API models for the reservations resource.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::reservations::ReservationDBResponse;
use crate::types::{ClientId, MesaId, ReservationId};

/// Reservation lifecycle status.
///
/// Stored as the PostgreSQL enum `estado_reserva` and serialized with the
/// lowercase Spanish names the frontend expects. Any status may follow any
/// other; the update endpoint only checks membership in this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "estado_reserva", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pendiente,
    Confirmada,
    Cancelada,
    Completada,
}

impl ReservationStatus {
    /// Parse a wire value. Returns `None` for anything outside the four
    /// states, which the update endpoint turns into a 400.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pendiente" => Some(Self::Pendiente),
            "confirmada" => Some(Self::Confirmada),
            "cancelada" => Some(Self::Cancelada),
            "completada" => Some(Self::Completada),
            _ => None,
        }
    }
}

/// Creation payload. `fecha`/`hora` arrive as strings (`AAAA-MM-DD`,
/// `HH:MM` or `HH:MM:SS`) and are parsed in the handler so format errors
/// produce the contract's 400. A supplied `estado` is ignored entirely.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReservationCreateRequest {
    pub cliente_id: Option<ClientId>,
    pub numero_personas: Option<i32>,
    pub fecha: Option<String>,
    pub hora: Option<String>,
    pub mesa_id: Option<MesaId>,
    pub notas_especiales: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReservationUpdateRequest {
    pub id: Option<ReservationId>,
    pub estado: Option<String>,
}

/// One row of the reservations list: reservation fields flattened with the
/// client's contact data and the assigned table number (if any).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub numero_personas: i32,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub estado: ReservationStatus,
    pub notas_especiales: Option<String>,
    pub cliente_nombre: String,
    pub cliente_telefono: Option<String>,
    pub cliente_email: Option<String>,
    pub mesa_numero: Option<i32>,
}

impl From<ReservationDBResponse> for ReservationResponse {
    fn from(db: ReservationDBResponse) -> Self {
        Self {
            id: db.id,
            numero_personas: db.numero_personas,
            fecha: db.fecha,
            hora: db.hora,
            estado: db.estado,
            notas_especiales: db.notas_especiales,
            cliente_nombre: db.cliente_nombre,
            cliente_telefono: db.cliente_telefono,
            cliente_email: db.cliente_email,
            mesa_numero: db.mesa_numero,
        }
    }
}

/// The single-reservation view adds the raw foreign keys and the table
/// capacity, which the reservation form needs for editing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationDetailResponse {
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

impl From<ReservationDBResponse> for ReservationDetailResponse {
    fn from(db: ReservationDBResponse) -> Self {
        Self {
            id: db.id,
            cliente_id: db.cliente_id,
            mesa_id: db.mesa_id,
            numero_personas: db.numero_personas,
            fecha: db.fecha,
            hora: db.hora,
            estado: db.estado,
            notas_especiales: db.notas_especiales,
            cliente_nombre: db.cliente_nombre,
            cliente_telefono: db.cliente_telefono,
            cliente_email: db.cliente_email,
            mesa_numero: db.mesa_numero,
            mesa_capacidad: db.mesa_capacidad,
        }
    }
}

/// Body of a successful creation: `{mensaje, id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationCreatedResponse {
    pub mensaje: String,
    pub id: ReservationId,
}
