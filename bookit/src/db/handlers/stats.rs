//! Aggregate queries behind the dashboard statistics endpoints.
//!
//! All read-only, all scoped by the owner account. Date arithmetic happens
//! in the caller; these methods take explicit dates so they stay
//! deterministic under test.

use chrono::NaiveDate;
use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    models::stats::{OccupancyDBResponse, UpcomingReservationDBResponse},
};
use crate::types::AccountId;

pub struct Stats<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Stats<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Number of reservations on the given date.
    #[instrument(skip(self), fields(owner = owner), err)]
    pub async fn reservations_on(&mut self, owner: AccountId, date: NaiveDate) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reservas WHERE usuario_id = $1 AND fecha = $2")
            .bind(owner)
            .bind(date)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    /// Number of clients created on the given date.
    #[instrument(skip(self), fields(owner = owner), err)]
    pub async fn clients_created_on(&mut self, owner: AccountId, date: NaiveDate) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clientes WHERE usuario_id = $1 AND fecha_creacion::date = $2")
                .bind(owner)
                .bind(date)
                .fetch_one(&mut *self.db)
                .await?;

        Ok(count)
    }

    /// Occupied vs. total dining tables.
    #[instrument(skip(self), fields(owner = owner), err)]
    pub async fn occupancy(&mut self, owner: AccountId) -> Result<OccupancyDBResponse> {
        let occupancy = sqlx::query_as::<_, OccupancyDBResponse>(
            "SELECT COUNT(*) FILTER (WHERE estado = 'ocupada') AS ocupadas, COUNT(*) AS total
             FROM mesas WHERE usuario_id = $1",
        )
        .bind(owner)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(occupancy)
    }

    /// Sum of party sizes across confirmed/completed reservations on a date.
    /// Feeds the estimated-revenue metric.
    #[instrument(skip(self), fields(owner = owner), err)]
    pub async fn confirmed_guests_on(&mut self, owner: AccountId, date: NaiveDate) -> Result<i64> {
        let guests = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(numero_personas), 0) FROM reservas
             WHERE usuario_id = $1 AND fecha = $2 AND estado IN ('confirmada', 'completada')",
        )
        .bind(owner)
        .bind(date)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(guests)
    }

    /// Reservation counts per date over a closed date range (both ends
    /// inclusive). Dates with no reservations are simply absent; the caller
    /// zero-fills the weekday buckets.
    #[instrument(skip(self), fields(owner = owner), err)]
    pub async fn daily_counts(&mut self, owner: AccountId, from: NaiveDate, to: NaiveDate) -> Result<Vec<(NaiveDate, i64)>> {
        let counts = sqlx::query_as::<_, (NaiveDate, i64)>(
            "SELECT fecha, COUNT(*) FROM reservas
             WHERE usuario_id = $1 AND fecha >= $2 AND fecha <= $3
             GROUP BY fecha ORDER BY fecha",
        )
        .bind(owner)
        .bind(from)
        .bind(to)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(counts)
    }

    /// The next `limit` pending/confirmed reservations from `date` onward,
    /// soonest first.
    #[instrument(skip(self), fields(owner = owner), err)]
    pub async fn upcoming(&mut self, owner: AccountId, date: NaiveDate, limit: i64) -> Result<Vec<UpcomingReservationDBResponse>> {
        let reservations = sqlx::query_as::<_, UpcomingReservationDBResponse>(
            "SELECT r.id, r.numero_personas, r.fecha, r.hora, r.estado, r.notas_especiales,
                    c.nombre AS cliente_nombre
             FROM reservas r
             INNER JOIN clientes c ON r.cliente_id = c.id
             WHERE r.usuario_id = $1 AND r.fecha >= $2 AND r.estado IN ('confirmada', 'pendiente')
             ORDER BY r.fecha ASC, r.hora ASC
             LIMIT $3",
        )
        .bind(owner)
        .bind(date)
        .bind(limit)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(reservations)
    }
}
