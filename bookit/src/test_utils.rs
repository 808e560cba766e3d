//! Test fixtures shared by the endpoint and repository tests.

use std::sync::Arc;

use axum_test::{TestServer, TestServerConfig};
use chrono::NaiveDate;
use serde_json::{Value, json};
use sqlx::PgPool;

use crate::{
    AppState,
    auth::{
        password,
        session::{InMemorySessionStore, SessionStore},
    },
    build_router,
    config::Config,
    db::{
        handlers::{Accounts, Clients, OwnedRepository},
        models::{
            accounts::{AccountCreateDBRequest, AccountDBResponse},
            clients::{ClientCreateDBRequest, ClientDBResponse},
        },
    },
    types::{AccountId, ClientId, MesaId, ReservationId},
};

pub fn create_test_config() -> Config {
    let mut config = Config::default();
    // Cheap argon2 parameters keep the suite fast; production defaults are
    // far heavier
    config.auth.password.argon2_memory_kib = 1024;
    config.auth.password.argon2_iterations = 1;
    config
}

/// Build a test server over the full router with a cookie jar, so a login
/// in a test carries its session into subsequent requests automatically.
pub fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(config.auth.session.timeout));
    let state = AppState::builder().db(pool).config(config).sessions(sessions).build();
    let router = build_router(&state).expect("Failed to build router");

    let server_config = TestServerConfig {
        save_cookies: true,
        ..Default::default()
    };
    TestServer::new_with_config(router, server_config).expect("Failed to create test server")
}

/// Register an account through the API.
pub async fn register_account(server: &TestServer, email: &str, contrasena: &str) {
    server
        .post("/autenticacion/registro")
        .json(&json!({
            "nombre": "Test",
            "email": email,
            "contrasena": contrasena,
            "restaurante": "Test Restaurant"
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}

/// Login through the API, asserting success; returns the response body.
pub async fn login_as(server: &TestServer, email: &str, contrasena: &str) -> Value {
    let response = server
        .post("/autenticacion/login")
        .json(&json!({"email": email, "contrasena": contrasena}))
        .await;
    response.assert_status_ok();
    response.json()
}

/// Register and login in one step; returns the new account id.
pub async fn register_and_login(server: &TestServer, email: &str) -> AccountId {
    register_account(server, email, "abcdef").await;
    let body = login_as(server, email, "abcdef").await;
    body["usuario"]["id"].as_i64().expect("login response carries the account id")
}

/// Insert an account directly through the repository (no HTTP).
pub async fn create_test_account(pool: &PgPool, email: &str, contrasena: &str) -> AccountDBResponse {
    let config = create_test_config();
    let password_hash = password::hash_password(contrasena, &config.auth.password).expect("Failed to hash test password");

    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Accounts::new(&mut conn);
    repo.create(&AccountCreateDBRequest {
        nombre: "Test".to_string(),
        email: email.to_string(),
        password_hash,
        restaurante: "Test Restaurant".to_string(),
        telefono: String::new(),
    })
    .await
    .expect("Failed to create test account")
}

pub async fn create_test_client(pool: &PgPool, owner: AccountId, nombre: &str) -> ClientDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Clients::new(&mut conn);
    repo.create(
        owner,
        &ClientCreateDBRequest {
            nombre: nombre.to_string(),
            telefono: None,
            email: None,
            preferencias: None,
        },
    )
    .await
    .expect("Failed to create test client")
}

/// Insert a dining table directly; there is no endpoint for these.
pub async fn create_test_mesa(pool: &PgPool, owner: AccountId, numero: i32, estado: &str) -> MesaId {
    sqlx::query_scalar(
        "INSERT INTO mesas (usuario_id, numero, capacidad, estado)
         VALUES ($1, $2, 4, $3::estado_mesa) RETURNING id",
    )
    .bind(owner)
    .bind(numero)
    .bind(estado)
    .fetch_one(pool)
    .await
    .expect("Failed to create test mesa")
}

/// Insert a reservation directly, with an arbitrary status and date. The
/// API only ever creates pending reservations for today onward, so the
/// statistics tests seed history through this instead.
pub async fn create_test_reservation(
    pool: &PgPool,
    owner: AccountId,
    cliente_id: ClientId,
    fecha: NaiveDate,
    hora: &str,
    estado: &str,
    personas: i32,
) -> ReservationId {
    sqlx::query_scalar(
        "INSERT INTO reservas (cliente_id, usuario_id, numero_personas, fecha, hora, estado)
         VALUES ($1, $2, $3, $4, $5::time, $6::estado_reserva) RETURNING id",
    )
    .bind(cliente_id)
    .bind(owner)
    .bind(personas)
    .bind(fecha)
    .bind(hora)
    .bind(estado)
    .fetch_one(pool)
    .await
    .expect("Failed to create test reservation")
}
