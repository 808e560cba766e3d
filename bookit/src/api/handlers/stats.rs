use axum::{Json, extract::State};
use chrono::{Days, Local};

use crate::{
    AppState,
    api::models::stats::{TodayMetricsResponse, UpcomingReservationResponse, WeekHistogramResponse},
    auth::CurrentAccount,
    db::handlers::Stats,
    errors::{Error, Result},
};

/// The dashboard shows at most this many upcoming reservations.
const UPCOMING_LIMIT: i64 = 10;

/// Today's dashboard metrics
#[utoipa::path(
    get,
    path = "/estadisticas/metricas-hoy",
    tag = "estadisticas",
    responses(
        (status = 200, description = "Counts, occupancy and estimated revenue for today", body = TodayMetricsResponse),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn today_metrics(State(state): State<AppState>, account: CurrentAccount) -> Result<Json<TodayMetricsResponse>> {
    let hoy = Local::now().date_naive();

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut stats = Stats::new(&mut conn);

    let reservas_hoy = stats.reservations_on(account.id, hoy).await?;
    let clientes_nuevos = stats.clients_created_on(account.id, hoy).await?;
    let ocupacion = stats.occupancy(account.id).await?;
    let comensales = stats.confirmed_guests_on(account.id, hoy).await?;

    Ok(Json(TodayMetricsResponse {
        reservas_hoy,
        clientes_nuevos,
        ocupacion: ocupacion.into(),
        ingresos_hoy: comensales * state.config.stats.revenue_per_guest,
    }))
}

/// Reservation counts for the trailing week, bucketed by weekday
#[utoipa::path(
    get,
    path = "/estadisticas/reservas-semana",
    tag = "estadisticas",
    responses(
        (status = 200, description = "Seven zero-filled weekday buckets", body = WeekHistogramResponse),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn week_histogram(State(state): State<AppState>, account: CurrentAccount) -> Result<Json<WeekHistogramResponse>> {
    let hoy = Local::now().date_naive();
    // The 7 calendar days ending today, so every weekday occurs exactly once
    let desde = hoy - Days::new(6);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut stats = Stats::new(&mut conn);

    let counts = stats.daily_counts(account.id, desde, hoy).await?;
    Ok(Json(WeekHistogramResponse::from_daily_counts(&counts)))
}

/// The next pending/confirmed reservations, soonest first
#[utoipa::path(
    get,
    path = "/estadisticas/proximas-reservas",
    tag = "estadisticas",
    responses(
        (status = 200, description = "Up to ten upcoming reservations", body = Vec<UpcomingReservationResponse>),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upcoming_reservations(
    State(state): State<AppState>,
    account: CurrentAccount,
) -> Result<Json<Vec<UpcomingReservationResponse>>> {
    let hoy = Local::now().date_naive();

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut stats = Stats::new(&mut conn);

    let reservations = stats.upcoming(account.id, hoy, UPCOMING_LIMIT).await?;
    Ok(Json(reservations.into_iter().map(UpcomingReservationResponse::from).collect()))
}
