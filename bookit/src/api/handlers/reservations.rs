use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, NaiveTime};

use crate::{
    AppState,
    api::models::{
        IdQuery, MessageResponse,
        reservations::{
            ReservationCreateRequest, ReservationCreatedResponse, ReservationDetailResponse, ReservationResponse, ReservationStatus,
            ReservationUpdateRequest,
        },
    },
    auth::CurrentAccount,
    db::{
        errors::DbError,
        handlers::{OwnedRepository, Reservations},
        models::reservations::{ReservationCreateDBRequest, ReservationUpdateDBRequest},
    },
    errors::{Error, Result},
};

fn parse_fecha(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| Error::bad_request("El formato de la fecha no es válido (AAAA-MM-DD)"))
}

fn parse_hora(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| Error::bad_request("El formato de la hora no es válido (HH:MM)"))
}

/// List all reservations of the account, most recent first
#[utoipa::path(
    get,
    path = "/reservas/obtener-todas",
    tag = "reservas",
    responses(
        (status = 200, description = "Reservations with client and table joined", body = Vec<ReservationResponse>),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_reservations(State(state): State<AppState>, account: CurrentAccount) -> Result<Json<Vec<ReservationResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reservations::new(&mut conn);

    let reservations = repo.list(account.id).await?;
    Ok(Json(reservations.into_iter().map(ReservationResponse::from).collect()))
}

/// Fetch a single reservation by id
#[utoipa::path(
    get,
    path = "/reservas/obtener-una",
    tag = "reservas",
    params(IdQuery),
    responses(
        (status = 200, description = "The reservation", body = ReservationDetailResponse),
        (status = 400, description = "Missing id"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such reservation for this account"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_reservation(
    State(state): State<AppState>,
    account: CurrentAccount,
    Query(query): Query<IdQuery>,
) -> Result<Json<ReservationDetailResponse>> {
    let id = query.id.ok_or_else(|| Error::bad_request("Se requiere el ID de la reserva"))?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reservations::new(&mut conn);

    match repo.get_by_id(account.id, id).await? {
        Some(reservation) => Ok(Json(ReservationDetailResponse::from(reservation))),
        None => Err(Error::not_found("Reserva no encontrada")),
    }
}

/// Create a reservation. Status always starts as `pendiente`.
#[utoipa::path(
    post,
    path = "/reservas/crear",
    tag = "reservas",
    request_body = ReservationCreateRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationCreatedResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_reservation(
    State(state): State<AppState>,
    account: CurrentAccount,
    Json(request): Json<ReservationCreateRequest>,
) -> Result<(StatusCode, Json<ReservationCreatedResponse>)> {
    let fecha = request.fecha.as_deref().filter(|s| !s.is_empty());
    let hora = request.hora.as_deref().filter(|s| !s.is_empty());
    let (Some(cliente_id), Some(numero_personas), Some(fecha), Some(hora)) = (request.cliente_id, request.numero_personas, fecha, hora)
    else {
        return Err(Error::bad_request("Faltan campos obligatorios: cliente, personas, fecha y hora"));
    };

    if numero_personas < 1 {
        return Err(Error::bad_request("El número de personas debe ser al menos 1"));
    }
    let fecha = parse_fecha(fecha)?;
    let hora = parse_hora(hora)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reservations::new(&mut conn);

    let reservation = repo
        .create(
            account.id,
            &ReservationCreateDBRequest {
                cliente_id,
                mesa_id: request.mesa_id,
                numero_personas,
                fecha,
                hora,
                notas_especiales: request.notas_especiales.filter(|s| !s.is_empty()),
            },
        )
        .await
        .map_err(|e| match e {
            // The guarded insert found no owned client/table to reference
            DbError::NotFound => Error::bad_request("El cliente o la mesa indicados no existen"),
            other => Error::Database(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ReservationCreatedResponse {
            mensaje: "Reserva creada exitosamente".to_string(),
            id: reservation.id,
        }),
    ))
}

/// Update a reservation's status
#[utoipa::path(
    put,
    path = "/reservas/actualizar",
    tag = "reservas",
    request_body = ReservationUpdateRequest,
    responses(
        (status = 200, description = "Reservation updated", body = MessageResponse),
        (status = 400, description = "Missing id/estado or estado outside the four states"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such reservation for this account"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_reservation(
    State(state): State<AppState>,
    account: CurrentAccount,
    Json(request): Json<ReservationUpdateRequest>,
) -> Result<Json<MessageResponse>> {
    let estado = request.estado.unwrap_or_default();
    let id = match request.id {
        Some(id) if !estado.is_empty() => id,
        _ => return Err(Error::bad_request("Se requiere ID y estado")),
    };

    let estado = ReservationStatus::parse(&estado)
        .ok_or_else(|| Error::bad_request("Estado no válido. Opciones: pendiente, confirmada, cancelada, completada"))?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reservations::new(&mut conn);

    let updated = repo.update(account.id, id, &ReservationUpdateDBRequest { estado }).await?;
    if !updated {
        return Err(Error::not_found("Reserva no encontrada"));
    }
    Ok(Json(MessageResponse::new("Reserva actualizada exitosamente")))
}

/// Delete a reservation
#[utoipa::path(
    delete,
    path = "/reservas/eliminar",
    tag = "reservas",
    params(IdQuery),
    responses(
        (status = 200, description = "Reservation deleted", body = MessageResponse),
        (status = 400, description = "Missing id"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such reservation for this account"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    account: CurrentAccount,
    Query(query): Query<IdQuery>,
) -> Result<Json<MessageResponse>> {
    let id = query.id.ok_or_else(|| Error::bad_request("Se requiere el ID de la reserva"))?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reservations::new(&mut conn);

    let deleted = repo.delete(account.id, id).await?;
    if !deleted {
        return Err(Error::not_found("Reserva no encontrada"));
    }
    Ok(Json(MessageResponse::new("Reserva eliminada exitosamente")))
}
