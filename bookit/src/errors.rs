use crate::db::errors::DbError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

/// API error taxonomy. Every failure a handler can produce maps onto one of
/// these variants, and every variant serializes as `{"error": "..."}` with
/// the matching HTTP status. User-facing messages are in Spanish because
/// that is the wire contract the frontend displays verbatim.
#[derive(ThisError, Debug)]
pub enum Error {
    /// No active session for a protected endpoint, or bad credentials. The
    /// message is deliberately generic for credential failures so unknown
    /// email and wrong password are indistinguishable.
    #[error("Not authenticated")]
    Unauthenticated { message: Option<String> },

    /// Invalid request data (missing field, bad value, bad enum)
    #[error("{message}")]
    BadRequest { message: String },

    /// Row not found, or found but owned by another account. The two cases
    /// deliberately collapse: ownership must not be probeable. Carries the
    /// full wire message ("Cliente no encontrado", "Reserva no encontrada")
    /// since Spanish gender does not mechanize well.
    #[error("{message}")]
    NotFound { message: String },

    /// Duplicate unique key (registration email)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Wrong HTTP verb for a known path
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Error::BadRequest { message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound { message: message.into() }
    }

    pub fn unauthenticated() -> Self {
        Error::Unauthenticated { message: None }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal detail.
    /// Database error text in particular never reaches a response body.
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthenticated { message } => message.clone().unwrap_or_else(|| "No autenticado".to_string()),
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { message } => message.clone(),
            Error::Conflict { message } => message.clone(),
            Error::MethodNotAllowed => "Método no permitido".to_string(),
            Error::Internal { .. } => "Error interno del servidor".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Recurso no encontrado".to_string(),
                DbError::UniqueViolation { constraint, table, .. } => match (table.as_deref(), constraint.as_deref()) {
                    (Some("usuarios"), Some(c)) if c.contains("email") => "Ya existe un usuario con ese email".to_string(),
                    _ => "El recurso ya existe".to_string(),
                },
                DbError::ForeignKeyViolation { .. } => "Referencia a un recurso inexistente".to_string(),
                DbError::CheckViolation { .. } => "Datos no válidos".to_string(),
                DbError::Other(_) => "Error interno del servidor".to_string(),
            },
            Error::Other(_) => "Error interno del servidor".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - level depends on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::Unauthenticated { .. } => {
                tracing::info!("Authorization error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } | Error::MethodNotAllowed => {
                tracing::debug!("Client error: {}", self);
            }
            Error::Conflict { .. } => {
                tracing::warn!("Conflict error: {}", self);
            }
        }

        let status = self.status_code();
        let body = json!({ "error": self.user_message() });
        (status, axum::response::Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::unauthenticated().status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::not_found("Reserva no encontrada").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            Error::Conflict {
                message: "dup".to_string()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(Error::Database(DbError::NotFound).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_errors_do_not_leak_detail() {
        let err = Error::Other(anyhow::anyhow!("connection refused to 10.0.0.3:5432"));
        assert_eq!(err.user_message(), "Error interno del servidor");

        let err = Error::Internal {
            operation: "spawn blocking task".to_string(),
        };
        assert!(!err.user_message().contains("spawn"));
    }

    #[test]
    fn test_duplicate_email_message() {
        let err = Error::Database(DbError::UniqueViolation {
            constraint: Some("usuarios_email_key".to_string()),
            table: Some("usuarios".to_string()),
            message: "duplicate key value".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.user_message(), "Ya existe un usuario con ese email");
    }
}
