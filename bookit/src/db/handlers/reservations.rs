//! Database repository for reservations.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::OwnedRepository,
    models::reservations::{ReservationCreateDBRequest, ReservationDBResponse, ReservationUpdateDBRequest},
};
use crate::types::{AccountId, ReservationId};

pub struct Reservations<'c> {
    db: &'c mut PgConnection,
}

/// Reservation rows are always read through this join: the client is
/// mandatory (inner join), the table assignment optional (left join).
const RESERVATION_SELECT: &str = "SELECT r.id, r.cliente_id, r.mesa_id, r.numero_personas, r.fecha, r.hora, r.estado,
            r.notas_especiales,
            c.nombre AS cliente_nombre, c.telefono AS cliente_telefono, c.email AS cliente_email,
            m.numero AS mesa_numero, m.capacidad AS mesa_capacidad
     FROM reservas r
     INNER JOIN clientes c ON r.cliente_id = c.id
     LEFT JOIN mesas m ON r.mesa_id = m.id";

impl<'c> Reservations<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> OwnedRepository for Reservations<'c> {
    type CreateRequest = ReservationCreateDBRequest;
    type UpdateRequest = ReservationUpdateDBRequest;
    type Response = ReservationDBResponse;
    type Id = ReservationId;

    /// Insert a reservation with status forced to `pendiente`.
    ///
    /// The insert selects the client row instead of trusting `cliente_id`,
    /// so a client (or table) belonging to another account inserts nothing
    /// and surfaces as [`DbError::NotFound`].
    #[instrument(skip(self, request), fields(owner = owner, cliente_id = request.cliente_id), err)]
    async fn create(&mut self, owner: AccountId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let inserted: Option<ReservationId> = sqlx::query_scalar(
            "INSERT INTO reservas (cliente_id, usuario_id, mesa_id, numero_personas, fecha, hora, estado, notas_especiales)
             SELECT c.id, $2, $3, $4, $5, $6, 'pendiente', $7
             FROM clientes c
             WHERE c.id = $1
               AND c.usuario_id = $2
               AND ($3::BIGINT IS NULL OR EXISTS (SELECT 1 FROM mesas m WHERE m.id = $3 AND m.usuario_id = $2))
             RETURNING id",
        )
        .bind(request.cliente_id)
        .bind(owner)
        .bind(request.mesa_id)
        .bind(request.numero_personas)
        .bind(request.fecha)
        .bind(request.hora)
        .bind(&request.notas_especiales)
        .fetch_optional(&mut *self.db)
        .await?;

        let id = inserted.ok_or(DbError::NotFound)?;
        self.get_by_id(owner, id).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(owner = owner, reservation_id = id), err)]
    async fn get_by_id(&mut self, owner: AccountId, id: Self::Id) -> Result<Option<Self::Response>> {
        let reservation =
            sqlx::query_as::<_, ReservationDBResponse>(&format!("{RESERVATION_SELECT} WHERE r.id = $1 AND r.usuario_id = $2"))
                .bind(id)
                .bind(owner)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(reservation)
    }

    /// Most recent first, as the dashboard shows them.
    #[instrument(skip(self), fields(owner = owner), err)]
    async fn list(&mut self, owner: AccountId) -> Result<Vec<Self::Response>> {
        let reservations = sqlx::query_as::<_, ReservationDBResponse>(&format!(
            "{RESERVATION_SELECT} WHERE r.usuario_id = $1 ORDER BY r.fecha DESC, r.hora DESC"
        ))
        .bind(owner)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(reservations)
    }

    /// Status is the only mutable field. Any of the four states may replace
    /// any other; there is no transition guard.
    #[instrument(skip(self, request), fields(owner = owner, reservation_id = id), err)]
    async fn update(&mut self, owner: AccountId, id: Self::Id, request: &Self::UpdateRequest) -> Result<bool> {
        let result = sqlx::query("UPDATE reservas SET estado = $3 WHERE id = $1 AND usuario_id = $2")
            .bind(id)
            .bind(owner)
            .bind(request.estado)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(owner = owner, reservation_id = id), err)]
    async fn delete(&mut self, owner: AccountId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reservas WHERE id = $1 AND usuario_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
