//! Base repository trait for account-owned entities.

use crate::db::errors::Result;
use crate::types::AccountId;

/// CRUD interface for tables carrying an owning `usuario_id`.
///
/// Every method takes the owner account id and scopes its statement by it,
/// which is what makes "exists but belongs to someone else" and "does not
/// exist" indistinguishable by construction: both come back as `None`,
/// `false`, or an empty list.
#[async_trait::async_trait]
pub trait OwnedRepository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The row/DTO type returned by reads
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// Insert a new entity owned by `owner`. Fails with
    /// [`crate::db::errors::DbError::NotFound`] when the request references
    /// a row the owner does not hold (e.g. another account's client).
    async fn create(&mut self, owner: AccountId, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Fetch one entity by id, scoped by owner
    async fn get_by_id(&mut self, owner: AccountId, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List all entities of the owner in the entity's canonical order
    async fn list(&mut self, owner: AccountId) -> Result<Vec<Self::Response>>;

    /// Update one entity scoped by owner; `false` means no row matched
    async fn update(&mut self, owner: AccountId, id: Self::Id, request: &Self::UpdateRequest) -> Result<bool>;

    /// Delete one entity scoped by owner; `false` means no row matched
    async fn delete(&mut self, owner: AccountId, id: Self::Id) -> Result<bool>;
}
