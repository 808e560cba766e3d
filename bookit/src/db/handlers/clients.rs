//! Database repository for clients.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    handlers::repository::OwnedRepository,
    models::clients::{ClientCreateDBRequest, ClientDBResponse, ClientUpdateDBRequest},
};
use crate::types::{AccountId, ClientId};

pub struct Clients<'c> {
    db: &'c mut PgConnection,
}

const CLIENT_COLUMNS: &str = "id, nombre, telefono, email, preferencias, visitas, ultima_visita, fecha_creacion";

impl<'c> Clients<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> OwnedRepository for Clients<'c> {
    type CreateRequest = ClientCreateDBRequest;
    type UpdateRequest = ClientUpdateDBRequest;
    type Response = ClientDBResponse;
    type Id = ClientId;

    #[instrument(skip(self, request), fields(owner = owner), err)]
    async fn create(&mut self, owner: AccountId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let client = sqlx::query_as::<_, ClientDBResponse>(&format!(
            "INSERT INTO clientes (usuario_id, nombre, telefono, email, preferencias)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {CLIENT_COLUMNS}"
        ))
        .bind(owner)
        .bind(&request.nombre)
        .bind(&request.telefono)
        .bind(&request.email)
        .bind(&request.preferencias)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(client)
    }

    #[instrument(skip(self), fields(owner = owner, client_id = id), err)]
    async fn get_by_id(&mut self, owner: AccountId, id: Self::Id) -> Result<Option<Self::Response>> {
        let client = sqlx::query_as::<_, ClientDBResponse>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clientes WHERE id = $1 AND usuario_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(client)
    }

    #[instrument(skip(self), fields(owner = owner), err)]
    async fn list(&mut self, owner: AccountId) -> Result<Vec<Self::Response>> {
        let clients = sqlx::query_as::<_, ClientDBResponse>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clientes WHERE usuario_id = $1 ORDER BY nombre ASC"
        ))
        .bind(owner)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(clients)
    }

    #[instrument(skip(self, request), fields(owner = owner, client_id = id), err)]
    async fn update(&mut self, owner: AccountId, id: Self::Id, request: &Self::UpdateRequest) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE clientes SET nombre = $3, telefono = $4, email = $5, preferencias = $6
             WHERE id = $1 AND usuario_id = $2",
        )
        .bind(id)
        .bind(owner)
        .bind(&request.nombre)
        .bind(&request.telefono)
        .bind(&request.email)
        .bind(&request.preferencias)
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(owner = owner, client_id = id), err)]
    async fn delete(&mut self, owner: AccountId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1 AND usuario_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
