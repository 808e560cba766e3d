//! # bookit: Restaurant Reservation & Operations Backend
//!
//! `bookit` is the backend of a reservation and operations dashboard for
//! restaurants. It exposes a JSON-over-HTTP API for a single-page frontend:
//! operator accounts authenticate with email and password, and everything
//! else - clients, reservations, dashboard statistics - is scoped to the
//! authenticated account.
//!
//! ## Overview
//!
//! Each restaurant operator owns a flat slice of the relational schema:
//! their clients (`clientes`), their reservations (`reservas`), and their
//! dining tables (`mesas`). Every read and write filters by the owning
//! account id taken from the server-side session, which is the system's
//! single access-control boundary.
//!
//! ### Request Flow
//!
//! A request arrives carrying a session cookie. The [`auth::CurrentAccount`]
//! extractor resolves the opaque token against the injected
//! [`auth::session::SessionStore`] and rejects with 401 when no live session
//! exists. The handler validates the payload explicitly - missing fields and
//! bad values come back as 400 with a Spanish `{error}` body, matching what
//! the frontend displays - and then makes a single repository call. The
//! repositories in [`db::handlers`] own all SQL and fold the
//! owning-account filter into every statement.
//!
//! Sessions are established by `POST /autenticacion/login`, destroyed by
//! `POST /autenticacion/cerrar-sesion`, and probed by
//! `GET /autenticacion/verificar-sesion`. The cookie holds nothing but a
//! random token; account data lives server-side.
//!
//! ### Core Components
//!
//! - [`api`]: Axum handlers and wire models (the contract keeps the
//!   original Spanish paths and field names)
//! - [`auth`]: Argon2id password hashing, the session store, the
//!   `CurrentAccount` extractor
//! - [`db`]: SQLx repositories and database models over PostgreSQL
//! - [`config`]: YAML + environment configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use bookit::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = bookit::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     bookit::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The application requires PostgreSQL and runs its migrations on startup:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! bookit::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post, put},
};
use bon::Builder;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::auth::session::{InMemorySessionStore, SessionStore};
use crate::config::CorsOrigin;
use crate::openapi::ApiDoc;

pub use config::Config;
pub use types::{AccountId, ClientId, MesaId, ReservationId};

/// Application state shared across all request handlers.
///
/// - `db`: PostgreSQL connection pool
/// - `config`: application configuration
/// - `sessions`: server-side session store behind its interface, injected
///   here rather than living in a process-wide global
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub sessions: Arc<dyn SessionStore>,
}

/// Get the bookit database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the CORS layer from configuration.
///
/// The frontend is a browser SPA on another origin that authenticates with
/// a cookie, so the configured origins are explicit and credentials are
/// allowed. Preflight OPTIONS requests are answered by this layer.
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.security.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            // Url serializes with a trailing slash; Origin headers carry none
            CorsOrigin::Url(url) => url.as_str().trim_end_matches('/').parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.security.cors.allow_credentials)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if let Some(max_age) = config.security.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        // Authentication
        .route("/autenticacion/registro", post(api::handlers::auth::register))
        .route("/autenticacion/login", post(api::handlers::auth::login))
        .route("/autenticacion/cerrar-sesion", post(api::handlers::auth::logout))
        .route("/autenticacion/verificar-sesion", get(api::handlers::auth::check_session))
        // Clients
        .route("/clientes/obtener-todos", get(api::handlers::clients::list_clients))
        .route("/clientes/obtener-uno", get(api::handlers::clients::get_client))
        .route("/clientes/crear", post(api::handlers::clients::create_client))
        .route("/clientes/actualizar", put(api::handlers::clients::update_client))
        // Reservations
        .route("/reservas/obtener-todas", get(api::handlers::reservations::list_reservations))
        .route("/reservas/obtener-una", get(api::handlers::reservations::get_reservation))
        .route("/reservas/crear", post(api::handlers::reservations::create_reservation))
        .route("/reservas/actualizar", put(api::handlers::reservations::update_reservation))
        .route("/reservas/eliminar", delete(api::handlers::reservations::delete_reservation))
        // Statistics
        .route("/estadisticas/metricas-hoy", get(api::handlers::stats::today_metrics))
        .route("/estadisticas/reservas-semana", get(api::handlers::stats::week_histogram))
        .route("/estadisticas/proximas-reservas", get(api::handlers::stats::upcoming_reservations))
        // Known path, wrong verb: the contract's 405 body
        .method_not_allowed_fallback(api::handlers::method_not_allowed)
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns the router, configuration and pool.
///
/// 1. **Create**: [`Application::new`] connects to PostgreSQL, runs
///    migrations and builds the router
/// 2. **Serve**: [`Application::serve`] binds the TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database.pool.max_connections)
            .min_connections(config.database.pool.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.database.pool.acquire_timeout_secs))
            .connect(&config.database.url)
            .await?;

        migrator().run(&pool).await?;

        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(config.auth.session.timeout));
        let state = AppState::builder().db(pool.clone()).config(config.clone()).sessions(sessions).build();
        let router = build_router(&state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving until the shutdown future resolves, then close the
    /// pool.
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Bookit listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
