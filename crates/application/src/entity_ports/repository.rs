use async_trait::async_trait;
use campusline_core::AppResult;
use campusline_domain::{EntityKind, EntityRecord};
use serde_json::{Map, Value};

/// Repository port for entity collections.
///
/// Implementations keep each write atomic with respect to concurrent reads.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Lists the full unfiltered collection in insertion order.
    async fn list_records(&self, kind: EntityKind) -> AppResult<Vec<EntityRecord>>;

    /// Finds a record by identifier.
    async fn find_record(&self, kind: EntityKind, record_id: &str)
    -> AppResult<Option<EntityRecord>>;

    /// Stores a new record with a fresh identifier and `createdAt = updatedAt = now`.
    async fn create_record(
        &self,
        kind: EntityKind,
        data: Map<String, Value>,
    ) -> AppResult<EntityRecord>;

    /// Merges the provided fields into an existing record and bumps `updatedAt`.
    ///
    /// Fails with `NotFound` for unknown identifiers.
    async fn update_record(
        &self,
        kind: EntityKind,
        record_id: &str,
        patch: Map<String, Value>,
    ) -> AppResult<EntityRecord>;

    /// Removes a record and returns whether it existed.
    async fn delete_record(&self, kind: EntityKind, record_id: &str) -> AppResult<bool>;
}
