use std::collections::HashMap;

use async_trait::async_trait;
use campusline_application::EntityRepository;
use campusline_core::{AppError, AppResult};
use campusline_domain::{EntityKind, EntityRecord};
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory entity store keyed by collection.
///
/// One lock guards every collection, so a write is never observed half-applied
/// by a concurrent list.
#[derive(Debug, Default)]
pub struct InMemoryEntityRepository {
    collections: RwLock<HashMap<EntityKind, Vec<EntityRecord>>>,
}

impl InMemoryEntityRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of stored records in a collection.
    pub async fn count(&self, kind: EntityKind) -> usize {
        self.collections
            .read()
            .await
            .get(&kind)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl EntityRepository for InMemoryEntityRepository {
    async fn list_records(&self, kind: EntityKind) -> AppResult<Vec<EntityRecord>> {
        Ok(self
            .collections
            .read()
            .await
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_record(
        &self,
        kind: EntityKind,
        record_id: &str,
    ) -> AppResult<Option<EntityRecord>> {
        Ok(self
            .collections
            .read()
            .await
            .get(&kind)
            .and_then(|records| {
                records
                    .iter()
                    .find(|record| record.record_id().as_str() == record_id)
                    .cloned()
            }))
    }

    async fn create_record(
        &self,
        kind: EntityKind,
        data: Map<String, Value>,
    ) -> AppResult<EntityRecord> {
        let record = EntityRecord::new(Uuid::new_v4().to_string(), kind, data, Utc::now())?;

        self.collections
            .write()
            .await
            .entry(kind)
            .or_default()
            .push(record.clone());

        tracing::debug!(
            collection = kind.as_str(),
            record_id = record.record_id().as_str(),
            "stored new record"
        );
        Ok(record)
    }

    async fn update_record(
        &self,
        kind: EntityKind,
        record_id: &str,
        patch: Map<String, Value>,
    ) -> AppResult<EntityRecord> {
        let mut collections = self.collections.write().await;
        let record = collections
            .get_mut(&kind)
            .and_then(|records| {
                records
                    .iter_mut()
                    .find(|record| record.record_id().as_str() == record_id)
            })
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} '{record_id}' not found",
                    kind.singular_label()
                ))
            })?;

        record.apply_patch(patch, Utc::now());

        tracing::debug!(collection = kind.as_str(), record_id, "updated record");
        Ok(record.clone())
    }

    async fn delete_record(&self, kind: EntityKind, record_id: &str) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(records) = collections.get_mut(&kind) else {
            return Ok(false);
        };

        let Some(position) = records
            .iter()
            .position(|record| record.record_id().as_str() == record_id)
        else {
            return Ok(false);
        };

        records.remove(position);

        tracing::debug!(collection = kind.as_str(), record_id, "deleted record");
        Ok(true)
    }
}
