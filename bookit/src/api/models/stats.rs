//! API models for the dashboard statistics endpoints.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::models::reservations::ReservationStatus;
use crate::db::models::stats::{OccupancyDBResponse, UpcomingReservationDBResponse};
use crate::types::ReservationId;

/// Table occupancy block of the today-metrics payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OccupancyResponse {
    pub porcentaje: i64,
    pub ocupadas: i64,
    pub total: i64,
}

impl From<OccupancyDBResponse> for OccupancyResponse {
    fn from(db: OccupancyDBResponse) -> Self {
        Self {
            porcentaje: occupancy_percentage(db.ocupadas, db.total),
            ocupadas: db.ocupadas,
            total: db.total,
        }
    }
}

/// Occupancy as a whole percentage, rounded to nearest. An account with no
/// tables reports 0 rather than dividing by zero.
pub fn occupancy_percentage(ocupadas: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    ((ocupadas as f64 / total as f64) * 100.0).round() as i64
}

/// `GET /estadisticas/metricas-hoy` payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TodayMetricsResponse {
    pub reservas_hoy: i64,
    pub clientes_nuevos: i64,
    pub ocupacion: OccupancyResponse,
    pub ingresos_hoy: i64,
}

/// `GET /estadisticas/reservas-semana` payload: always exactly seven keys,
/// zero-filled, in Monday-to-Sunday order. Modeled as a struct (not a map)
/// so the shape is part of the type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekHistogramResponse {
    #[serde(rename = "Lun")]
    pub lun: i64,
    #[serde(rename = "Mar")]
    pub mar: i64,
    #[serde(rename = "Mié")]
    pub mie: i64,
    #[serde(rename = "Jue")]
    pub jue: i64,
    #[serde(rename = "Vie")]
    pub vie: i64,
    #[serde(rename = "Sáb")]
    pub sab: i64,
    #[serde(rename = "Dom")]
    pub dom: i64,
}

impl WeekHistogramResponse {
    /// Fold per-date counts into weekday buckets. The caller bounds the
    /// date range to seven days, so each bucket receives at most one date.
    pub fn from_daily_counts(counts: &[(NaiveDate, i64)]) -> Self {
        let mut histogram = Self::default();
        for (fecha, cantidad) in counts {
            let bucket = match fecha.weekday() {
                Weekday::Mon => &mut histogram.lun,
                Weekday::Tue => &mut histogram.mar,
                Weekday::Wed => &mut histogram.mie,
                Weekday::Thu => &mut histogram.jue,
                Weekday::Fri => &mut histogram.vie,
                Weekday::Sat => &mut histogram.sab,
                Weekday::Sun => &mut histogram.dom,
            };
            *bucket += cantidad;
        }
        histogram
    }
}

/// One entry of `GET /estadisticas/proximas-reservas`. Field names here are
/// the short forms the dashboard list widget consumes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpcomingReservationResponse {
    pub id: ReservationId,
    pub cliente: String,
    pub personas: i32,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub estado: ReservationStatus,
    pub notas: Option<String>,
}

impl From<UpcomingReservationDBResponse> for UpcomingReservationResponse {
    fn from(db: UpcomingReservationDBResponse) -> Self {
        Self {
            id: db.id,
            cliente: db.cliente_nombre,
            personas: db.numero_personas,
            fecha: db.fecha,
            hora: db.hora,
            estado: db.estado,
            notas: db.notas_especiales,
        }
    }
}
