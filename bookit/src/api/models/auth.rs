//! API models for authentication endpoints.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::accounts::AccountDBResponse;
use crate::types::AccountId;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub contrasena: Option<String>,
    pub restaurante: Option<String>,
    pub telefono: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub contrasena: Option<String>,
}

/// Sanitized account as returned by login and check-session. The password
/// hash never appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: AccountId,
    pub nombre: String,
    pub email: String,
    pub restaurante: String,
}

impl From<&AccountDBResponse> for AccountResponse {
    fn from(db: &AccountDBResponse) -> Self {
        Self {
            id: db.id,
            nombre: db.nombre.clone(),
            email: db.email.clone(),
            restaurante: db.restaurante.clone(),
        }
    }
}

/// The slimmer account echo of the registration response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountSummary {
    pub id: AccountId,
    pub nombre: String,
    pub email: String,
}

/// Body of a successful registration: `{mensaje, usuario}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub mensaje: String,
    pub usuario: AccountSummary,
}

/// Body of a successful login: `{mensaje, usuario}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub mensaje: String,
    pub usuario: AccountResponse,
}

/// Body of check-session: `{autenticado, usuario?}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionStatusResponse {
    pub autenticado: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario: Option<AccountResponse>,
}

/// A JSON body plus a Set-Cookie header. Login and logout both answer with
/// one of these; the cookie is the session mechanism, the body the wire
/// contract.
#[derive(Debug)]
pub struct WithSessionCookie<T> {
    pub body: T,
    pub cookie: String,
}

impl<T: Serialize> IntoResponse for WithSessionCookie<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.body).into_response();
        match header::HeaderValue::from_str(&self.cookie) {
            Ok(value) => {
                response.headers_mut().insert(header::SET_COOKIE, value);
                response
            }
            Err(e) => {
                tracing::error!("Session cookie is not a valid header value: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
