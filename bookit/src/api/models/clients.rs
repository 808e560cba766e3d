//! API models for the clients resource.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::clients::ClientDBResponse;
use crate::types::ClientId;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClientCreateRequest {
    pub nombre: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub preferencias: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClientUpdateRequest {
    pub id: Option<ClientId>,
    pub nombre: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub preferencias: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientResponse {
    pub id: ClientId,
    pub nombre: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub preferencias: Option<String>,
    pub visitas: i32,
    pub ultima_visita: Option<NaiveDate>,
    pub fecha_creacion: DateTime<Utc>,
}

impl From<ClientDBResponse> for ClientResponse {
    fn from(db: ClientDBResponse) -> Self {
        Self {
            id: db.id,
            nombre: db.nombre,
            telefono: db.telefono,
            email: db.email,
            preferencias: db.preferencias,
            visitas: db.visitas,
            ultima_visita: db.ultima_visita,
            fecha_creacion: db.fecha_creacion,
        }
    }
}

/// Body of a successful creation: `{mensaje, cliente}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientCreatedResponse {
    pub mensaje: String,
    pub cliente: ClientResponse,
}
