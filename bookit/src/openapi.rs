//! OpenAPI document for the HTTP API, served at `/docs`.

use utoipa::OpenApi;

use crate::api::handlers;
use crate::api::models::{
    IdQuery, MessageResponse,
    auth::{AccountResponse, AccountSummary, AuthResponse, LoginRequest, RegisterRequest, RegisterResponse, SessionStatusResponse},
    clients::{ClientCreateRequest, ClientCreatedResponse, ClientResponse, ClientUpdateRequest},
    reservations::{
        ReservationCreateRequest, ReservationCreatedResponse, ReservationDetailResponse, ReservationResponse, ReservationStatus,
        ReservationUpdateRequest,
    },
    stats::{OccupancyResponse, TodayMetricsResponse, UpcomingReservationResponse, WeekHistogramResponse},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookit API",
        description = "Reservation and operations backend for restaurants: session-gated CRUD over clients and reservations plus dashboard statistics."
    ),
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::check_session,
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::reservations::list_reservations,
        handlers::reservations::get_reservation,
        handlers::reservations::create_reservation,
        handlers::reservations::update_reservation,
        handlers::reservations::delete_reservation,
        handlers::stats::today_metrics,
        handlers::stats::week_histogram,
        handlers::stats::upcoming_reservations,
    ),
    components(schemas(
        MessageResponse,
        IdQuery,
        RegisterRequest,
        LoginRequest,
        AccountResponse,
        AccountSummary,
        RegisterResponse,
        AuthResponse,
        SessionStatusResponse,
        ClientCreateRequest,
        ClientUpdateRequest,
        ClientResponse,
        ClientCreatedResponse,
        ReservationStatus,
        ReservationCreateRequest,
        ReservationUpdateRequest,
        ReservationResponse,
        ReservationDetailResponse,
        ReservationCreatedResponse,
        OccupancyResponse,
        TodayMetricsResponse,
        WeekHistogramResponse,
        UpcomingReservationResponse,
    )),
    tags(
        (name = "autenticacion", description = "Registration, login and session management"),
        (name = "clientes", description = "Client directory of the restaurant"),
        (name = "reservas", description = "Reservation lifecycle"),
        (name = "estadisticas", description = "Dashboard aggregates"),
    )
)]
pub struct ApiDoc;
