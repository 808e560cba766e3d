//! Common type definitions.
//!
//! Entity identifiers are `BIGINT` identity columns in PostgreSQL, exposed on
//! the wire as plain JSON numbers. The aliases exist so signatures say what
//! kind of id they take.

/// Restaurant operator account id (`usuarios.id`).
pub type AccountId = i64;
/// Client id (`clientes.id`).
pub type ClientId = i64;
/// Reservation id (`reservas.id`).
pub type ReservationId = i64;
/// Dining table id (`mesas.id`).
pub type MesaId = i64;
