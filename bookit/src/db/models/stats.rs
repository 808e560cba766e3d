//! Database models for dashboard statistics.

use chrono::{NaiveDate, NaiveTime};
use sqlx::FromRow;

use crate::api::models::reservations::ReservationStatus;
use crate::types::ReservationId;

/// Occupied vs. total dining tables for one account.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct OccupancyDBResponse {
    pub ocupadas: i64,
    pub total: i64,
}

/// One upcoming reservation with the client's name joined in.
#[derive(Debug, Clone, FromRow)]
pub struct UpcomingReservationDBResponse {
    pub id: ReservationId,
    pub numero_personas: i32,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub estado: ReservationStatus,
    pub notas_especiales: Option<String>,
    pub cliente_nombre: String,
}
