//! Database models for operator accounts.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::types::AccountId;

/// Database request for creating a new account.
///
/// `password_hash` must already be an Argon2 PHC string; the repository
/// never sees a plaintext password.
#[derive(Debug, Clone)]
pub struct AccountCreateDBRequest {
    pub nombre: String,
    pub email: String,
    pub password_hash: String,
    pub restaurante: String,
    pub telefono: String,
}

/// Database row for an account.
#[derive(Debug, Clone, FromRow)]
pub struct AccountDBResponse {
    pub id: AccountId,
    pub nombre: String,
    pub email: String,
    pub password_hash: String,
    pub restaurante: String,
    pub telefono: String,
    pub fecha_creacion: DateTime<Utc>,
}
