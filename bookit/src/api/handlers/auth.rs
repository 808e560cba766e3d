use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::{
    AppState,
    api::models::{
        MessageResponse,
        auth::{
            AccountResponse, AccountSummary, AuthResponse, LoginRequest, RegisterRequest, RegisterResponse, SessionStatusResponse,
            WithSessionCookie,
        },
    },
    auth::{CurrentAccount, password, session},
    db::{handlers::Accounts, models::accounts::AccountCreateDBRequest},
    errors::{Error, Result},
};

/// Just-enough email validation: one `@`, non-empty local part, a dotted
/// domain, no whitespace. Anything fancier belongs to a confirmation mail,
/// which this system does not send.
fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.') && !domain.contains('@') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Register a new operator account
#[utoipa::path(
    post,
    path = "/autenticacion/registro",
    tag = "autenticacion",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered", body = RegisterResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email already registered"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(State(state): State<AppState>, Json(request): Json<RegisterRequest>) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let nombre = request.nombre.unwrap_or_default();
    let email = request.email.unwrap_or_default();
    let contrasena = request.contrasena.unwrap_or_default();

    if nombre.is_empty() || email.is_empty() || contrasena.is_empty() {
        return Err(Error::bad_request("Nombre, email y contraseña son requeridos"));
    }
    if !is_valid_email(&email) {
        return Err(Error::bad_request("El formato del email no es válido"));
    }

    let password_config = &state.config.auth.password;
    if contrasena.len() < password_config.min_length {
        return Err(Error::bad_request(format!(
            "La contraseña debe tener al menos {} caracteres",
            password_config.min_length
        )));
    }
    if contrasena.len() > password_config.max_length {
        return Err(Error::bad_request(format!(
            "La contraseña no puede tener más de {} caracteres",
            password_config.max_length
        )));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut accounts = Accounts::new(&mut conn);

    if accounts.get_by_email(&email).await?.is_some() {
        return Err(Error::Conflict {
            message: "Ya existe un usuario con ese email".to_string(),
        });
    }

    // Hash on a blocking thread to keep argon2 off the async runtime
    let hash_config = password_config.clone();
    let plaintext = contrasena.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext, &hash_config))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;

    let account = accounts
        .create(&AccountCreateDBRequest {
            nombre,
            email,
            password_hash,
            restaurante: request.restaurante.unwrap_or_default(),
            telefono: request.telefono.unwrap_or_default(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            mensaje: "Usuario registrado exitosamente".to_string(),
            usuario: AccountSummary {
                id: account.id,
                nombre: account.nombre,
                email: account.email,
            },
        }),
    ))
}

/// Login with email and password, establishing a session
#[utoipa::path(
    post,
    path = "/autenticacion/login",
    tag = "autenticacion",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Bad credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<WithSessionCookie<AuthResponse>> {
    let email = request.email.unwrap_or_default();
    let contrasena = request.contrasena.unwrap_or_default();

    if email.is_empty() || contrasena.is_empty() {
        return Err(Error::bad_request("Email y contraseña son requeridos"));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut accounts = Accounts::new(&mut conn);

    // Same message whether the email is unknown or the password is wrong
    let account = accounts.get_by_email(&email).await?.ok_or_else(|| Error::Unauthenticated {
        message: Some("Credenciales incorrectas".to_string()),
    })?;

    let hash = account.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || password::verify_password(&contrasena, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })??;

    if !is_valid {
        return Err(Error::Unauthenticated {
            message: Some("Credenciales incorrectas".to_string()),
        });
    }

    let token = session::generate_session_token();
    state.sessions.insert(
        token.clone(),
        session::SessionData {
            account_id: account.id,
            nombre: account.nombre.clone(),
            email: account.email.clone(),
            restaurante: account.restaurante.clone(),
        },
    );
    let cookie = session::session_cookie(&token, &state.config.auth.session);

    Ok(WithSessionCookie {
        body: AuthResponse {
            mensaje: "Login exitoso".to_string(),
            usuario: AccountResponse::from(&account),
        },
        cookie,
    })
}

/// Logout: destroy the session, clear the cookie. Always succeeds, with or
/// without an active session.
#[utoipa::path(
    post,
    path = "/autenticacion/cerrar-sesion",
    tag = "autenticacion",
    responses(
        (status = 200, description = "Session destroyed", body = MessageResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> WithSessionCookie<MessageResponse> {
    if let Some(token) = session::token_from_headers(&headers, &state.config.auth.session.cookie_name) {
        state.sessions.remove(&token);
    }

    WithSessionCookie {
        body: MessageResponse::new("Sesión cerrada exitosamente"),
        cookie: session::clear_session_cookie(&state.config.auth.session),
    }
}

/// Report whether the request carries a live session.
#[utoipa::path(
    get,
    path = "/autenticacion/verificar-sesion",
    tag = "autenticacion",
    responses(
        (status = 200, description = "Authenticated", body = SessionStatusResponse),
        (status = 401, description = "Not authenticated", body = SessionStatusResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn check_session(account: Option<CurrentAccount>) -> (StatusCode, Json<SessionStatusResponse>) {
    match account {
        Some(account) => (
            StatusCode::OK,
            Json(SessionStatusResponse {
                autenticado: true,
                usuario: Some(AccountResponse {
                    id: account.id,
                    nombre: account.nombre,
                    email: account.email,
                    restaurante: account.restaurante,
                }),
            }),
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(SessionStatusResponse {
                autenticado: false,
                usuario: None,
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, login_as, register_account};
    use serde_json::{Value, json};
    use sqlx::PgPool;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ana@x.com"));
        assert!(is_valid_email("ana.garcia+test@sub.example.org"));

        assert!(!is_valid_email("ana"));
        assert!(!is_valid_email("ana@"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("ana@localhost"));
        assert!(!is_valid_email("ana@.com"));
        assert!(!is_valid_email("ana maria@x.com"));
        assert!(!is_valid_email("ana@x@y.com"));
    }

    #[sqlx::test]
    async fn test_register_then_duplicate_conflict(pool: PgPool) {
        let server = create_test_app(pool);

        let response = server
            .post("/autenticacion/registro")
            .json(&json!({"nombre": "Ana", "email": "ana@x.com", "contrasena": "abcdef"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["mensaje"], "Usuario registrado exitosamente");
        assert!(body["usuario"]["id"].as_i64().unwrap() > 0);
        assert_eq!(body["usuario"]["email"], "ana@x.com");

        // Same email again
        let response = server
            .post("/autenticacion/registro")
            .json(&json!({"nombre": "Otra", "email": "ana@x.com", "contrasena": "abcdef"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["error"], "Ya existe un usuario con ese email");
    }

    #[sqlx::test]
    async fn test_register_validation(pool: PgPool) {
        let server = create_test_app(pool);

        // Missing required fields
        let response = server.post("/autenticacion/registro").json(&json!({"email": "a@x.com"})).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Bad email format
        let response = server
            .post("/autenticacion/registro")
            .json(&json!({"nombre": "Ana", "email": "no-es-un-email", "contrasena": "abcdef"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "El formato del email no es válido");

        // Short password
        let response = server
            .post("/autenticacion/registro")
            .json(&json!({"nombre": "Ana", "email": "ana@x.com", "contrasena": "abc"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "La contraseña debe tener al menos 6 caracteres");
    }

    #[sqlx::test]
    async fn test_login_failures_are_indistinguishable(pool: PgPool) {
        let server = create_test_app(pool);
        register_account(&server, "ana@x.com", "abcdef").await;

        let wrong_password = server
            .post("/autenticacion/login")
            .json(&json!({"email": "ana@x.com", "contrasena": "equivocada"}))
            .await;
        wrong_password.assert_status(StatusCode::UNAUTHORIZED);

        let unknown_email = server
            .post("/autenticacion/login")
            .json(&json!({"email": "nadie@x.com", "contrasena": "abcdef"}))
            .await;
        unknown_email.assert_status(StatusCode::UNAUTHORIZED);

        // Identical body for both failure modes
        let a: Value = wrong_password.json();
        let b: Value = unknown_email.json();
        assert_eq!(a, b);
        assert_eq!(a["error"], "Credenciales incorrectas");
    }

    #[sqlx::test]
    async fn test_login_missing_fields(pool: PgPool) {
        let server = create_test_app(pool);

        let response = server.post("/autenticacion/login").json(&json!({"email": "ana@x.com"})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Email y contraseña son requeridos");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_session_lifecycle(pool: PgPool) {
        let server = create_test_app(pool);
        register_account(&server, "ana@x.com", "abcdef").await;

        // Not authenticated before login
        let response = server.get("/autenticacion/verificar-sesion").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["autenticado"], false);
        assert!(body.get("error").is_none());

        // Login sets the session cookie
        let response = server
            .post("/autenticacion/login")
            .json(&json!({"email": "ana@x.com", "contrasena": "abcdef"}))
            .await;
        response.assert_status_ok();
        assert!(response.headers().get("set-cookie").is_some());
        let body: Value = response.json();
        assert_eq!(body["mensaje"], "Login exitoso");
        assert_eq!(body["usuario"]["email"], "ana@x.com");
        assert!(body["usuario"].get("contrasena").is_none());

        // Session is now live
        let response = server.get("/autenticacion/verificar-sesion").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["autenticado"], true);
        assert_eq!(body["usuario"]["email"], "ana@x.com");

        // Logout destroys it
        let response = server.post("/autenticacion/cerrar-sesion").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["mensaje"], "Sesión cerrada exitosamente");

        let response = server.get("/autenticacion/verificar-sesion").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["autenticado"], false);
    }

    #[sqlx::test]
    async fn test_login_response_includes_restaurant(pool: PgPool) {
        let server = create_test_app(pool.clone());

        server
            .post("/autenticacion/registro")
            .json(&json!({
                "nombre": "Ana",
                "email": "ana@x.com",
                "contrasena": "abcdef",
                "restaurante": "La Terraza",
                "telefono": "600111222"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let body = login_as(&server, "ana@x.com", "abcdef").await;
        assert_eq!(body["usuario"]["restaurante"], "La Terraza");
    }

    #[sqlx::test]
    async fn test_wrong_method_is_405(pool: PgPool) {
        let server = create_test_app(pool);

        let response = server.get("/autenticacion/login").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = response.json();
        assert_eq!(body["error"], "Método no permitido");
    }

    #[sqlx::test]
    async fn test_password_is_stored_hashed(pool: PgPool) {
        let server = create_test_app(pool.clone());
        register_account(&server, "ana@x.com", "abcdef").await;

        let stored: String = sqlx::query_scalar("SELECT contrasena FROM usuarios WHERE email = $1")
            .bind("ana@x.com")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(!stored.contains("abcdef"));
    }
}
