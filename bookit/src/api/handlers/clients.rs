use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        IdQuery, MessageResponse,
        clients::{ClientCreateRequest, ClientCreatedResponse, ClientResponse, ClientUpdateRequest},
    },
    auth::CurrentAccount,
    db::{
        handlers::{Clients, OwnedRepository},
        models::clients::{ClientCreateDBRequest, ClientUpdateDBRequest},
    },
    errors::{Error, Result},
};

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// List all clients of the account, ordered by name
#[utoipa::path(
    get,
    path = "/clientes/obtener-todos",
    tag = "clientes",
    responses(
        (status = 200, description = "Clients of the account", body = Vec<ClientResponse>),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_clients(State(state): State<AppState>, account: CurrentAccount) -> Result<Json<Vec<ClientResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Clients::new(&mut conn);

    let clients = repo.list(account.id).await?;
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

/// Fetch a single client by id
#[utoipa::path(
    get,
    path = "/clientes/obtener-uno",
    tag = "clientes",
    params(IdQuery),
    responses(
        (status = 200, description = "The client", body = ClientResponse),
        (status = 400, description = "Missing id"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such client for this account"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_client(
    State(state): State<AppState>,
    account: CurrentAccount,
    Query(query): Query<IdQuery>,
) -> Result<Json<ClientResponse>> {
    let id = query.id.ok_or_else(|| Error::bad_request("Se requiere el ID del cliente"))?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Clients::new(&mut conn);

    match repo.get_by_id(account.id, id).await? {
        Some(client) => Ok(Json(ClientResponse::from(client))),
        None => Err(Error::not_found("Cliente no encontrado")),
    }
}

/// Create a client owned by the session account
#[utoipa::path(
    post,
    path = "/clientes/crear",
    tag = "clientes",
    request_body = ClientCreateRequest,
    responses(
        (status = 201, description = "Client created", body = ClientCreatedResponse),
        (status = 400, description = "Missing name"),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_client(
    State(state): State<AppState>,
    account: CurrentAccount,
    Json(request): Json<ClientCreateRequest>,
) -> Result<(StatusCode, Json<ClientCreatedResponse>)> {
    let nombre = request.nombre.unwrap_or_default();
    if nombre.trim().is_empty() {
        return Err(Error::bad_request("El nombre del cliente es requerido"));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Clients::new(&mut conn);

    let client = repo
        .create(
            account.id,
            &ClientCreateDBRequest {
                nombre,
                telefono: none_if_empty(request.telefono),
                email: none_if_empty(request.email),
                preferencias: none_if_empty(request.preferencias),
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ClientCreatedResponse {
            mensaje: "Cliente creado exitosamente".to_string(),
            cliente: ClientResponse::from(client),
        }),
    ))
}

/// Update a client in place
#[utoipa::path(
    put,
    path = "/clientes/actualizar",
    tag = "clientes",
    request_body = ClientUpdateRequest,
    responses(
        (status = 200, description = "Client updated", body = MessageResponse),
        (status = 400, description = "Missing id or name"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such client for this account"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_client(
    State(state): State<AppState>,
    account: CurrentAccount,
    Json(request): Json<ClientUpdateRequest>,
) -> Result<Json<MessageResponse>> {
    let nombre = request.nombre.unwrap_or_default();
    let id = match request.id {
        Some(id) if !nombre.trim().is_empty() => id,
        _ => return Err(Error::bad_request("Se requiere ID y nombre del cliente")),
    };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Clients::new(&mut conn);

    let updated = repo
        .update(
            account.id,
            id,
            &ClientUpdateDBRequest {
                nombre,
                telefono: none_if_empty(request.telefono),
                email: none_if_empty(request.email),
                preferencias: none_if_empty(request.preferencias),
            },
        )
        .await?;

    if !updated {
        return Err(Error::not_found("Cliente no encontrado"));
    }
    Ok(Json(MessageResponse::new("Cliente actualizado exitosamente")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, create_test_client, register_and_login};
    use serde_json::{Value, json};
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_endpoints_require_session(pool: PgPool) {
        let server = create_test_app(pool);

        server.get("/clientes/obtener-todos").await.assert_status(StatusCode::UNAUTHORIZED);
        server
            .post("/clientes/crear")
            .json(&json!({"nombre": "Carlos"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .put("/clientes/actualizar")
            .json(&json!({"id": 1, "nombre": "Carlos"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_create_and_list(pool: PgPool) {
        let server = create_test_app(pool);
        register_and_login(&server, "ana@x.com").await;

        let response = server
            .post("/clientes/crear")
            .json(&json!({"nombre": "Marta", "telefono": "611222333", "email": "", "preferencias": "terraza"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["mensaje"], "Cliente creado exitosamente");
        assert_eq!(body["cliente"]["nombre"], "Marta");
        assert_eq!(body["cliente"]["visitas"], 0);
        // Empty string stored as null
        assert_eq!(body["cliente"]["email"], Value::Null);

        server
            .post("/clientes/crear")
            .json(&json!({"nombre": "Andrés"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get("/clientes/obtener-todos").await;
        response.assert_status_ok();
        let body: Value = response.json();
        let names: Vec<_> = body.as_array().unwrap().iter().map(|c| c["nombre"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Andrés", "Marta"]);
    }

    #[sqlx::test]
    async fn test_create_requires_name(pool: PgPool) {
        let server = create_test_app(pool);
        register_and_login(&server, "ana@x.com").await;

        let response = server.post("/clientes/crear").json(&json!({"telefono": "611"})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "El nombre del cliente es requerido");
    }

    #[sqlx::test]
    async fn test_get_one(pool: PgPool) {
        let server = create_test_app(pool.clone());
        let account = register_and_login(&server, "ana@x.com").await;
        let client = create_test_client(&pool, account, "Marta").await;

        // Missing id
        let response = server.get("/clientes/obtener-uno").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Unknown id
        let response = server.get("/clientes/obtener-uno").add_query_param("id", 999999).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "Cliente no encontrado");

        // Found
        let response = server.get("/clientes/obtener-uno").add_query_param("id", client.id).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["id"], client.id);
        assert_eq!(body["nombre"], "Marta");
    }

    #[sqlx::test]
    async fn test_update(pool: PgPool) {
        let server = create_test_app(pool.clone());
        let account = register_and_login(&server, "ana@x.com").await;
        let client = create_test_client(&pool, account, "Marta").await;

        // Missing name
        let response = server.put("/clientes/actualizar").json(&json!({"id": client.id})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Se requiere ID y nombre del cliente");

        // Nonexistent id
        let response = server
            .put("/clientes/actualizar")
            .json(&json!({"id": 999999, "nombre": "Nadie"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        // Successful update
        let response = server
            .put("/clientes/actualizar")
            .json(&json!({"id": client.id, "nombre": "Marta López", "preferencias": "ventana"}))
            .await;
        response.assert_status_ok();

        let response = server.get("/clientes/obtener-uno").add_query_param("id", client.id).await;
        let body: Value = response.json();
        assert_eq!(body["nombre"], "Marta López");
        assert_eq!(body["preferencias"], "ventana");
    }

    #[sqlx::test]
    async fn test_cross_account_isolation(pool: PgPool) {
        let server_a = create_test_app(pool.clone());
        let account_a = register_and_login(&server_a, "a@x.com").await;
        let client_a = create_test_client(&pool, account_a, "Solo de A").await;

        let server_b = create_test_app(pool.clone());
        register_and_login(&server_b, "b@x.com").await;

        // B's listing does not include A's client
        let response = server_b.get("/clientes/obtener-todos").await;
        response.assert_status_ok();
        assert!(response.json::<Value>().as_array().unwrap().is_empty());

        // B cannot fetch or update it either
        server_b
            .get("/clientes/obtener-uno")
            .add_query_param("id", client_a.id)
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server_b
            .put("/clientes/actualizar")
            .json(&json!({"id": client_a.id, "nombre": "Robado"}))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        // A's view is untouched
        let response = server_a.get("/clientes/obtener-uno").add_query_param("id", client_a.id).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["nombre"], "Solo de A");
    }
}
