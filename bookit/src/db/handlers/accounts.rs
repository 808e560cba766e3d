//! Database repository for operator accounts.
//!
//! Accounts are the owners of everything else, so this repository is not
//! scoped by an owner id. The system never deletes accounts.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    models::accounts::{AccountCreateDBRequest, AccountDBResponse},
};

pub struct Accounts<'c> {
    db: &'c mut PgConnection,
}

const ACCOUNT_COLUMNS: &str = "id, nombre, email, contrasena AS password_hash, restaurante, telefono, fecha_creacion";

impl<'c> Accounts<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    pub async fn create(&mut self, request: &AccountCreateDBRequest) -> Result<AccountDBResponse> {
        let account = sqlx::query_as::<_, AccountDBResponse>(&format!(
            "INSERT INTO usuarios (nombre, email, contrasena, restaurante, telefono)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(&request.nombre)
        .bind(&request.email)
        .bind(&request.password_hash)
        .bind(&request.restaurante)
        .bind(&request.telefono)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(account)
    }

    /// Exact-match lookup used by login and duplicate-email checks.
    #[instrument(skip(self, email), err)]
    pub async fn get_by_email(&mut self, email: &str) -> Result<Option<AccountDBResponse>> {
        let account =
            sqlx::query_as::<_, AccountDBResponse>(&format!("SELECT {ACCOUNT_COLUMNS} FROM usuarios WHERE email = $1"))
                .bind(email)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(account)
    }
}
