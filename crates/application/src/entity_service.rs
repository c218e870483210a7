use std::sync::Arc;

use campusline_core::{AppError, AppResult, CallerIdentity};
use campusline_domain::{
    AuditAction, EntityKind, EntityRecord, MutationDecision, MutationOperation,
    PRICING_SNAPSHOT_FIELD, PricingSnapshot, authorize_mutation, payload_object,
};
use chrono::Utc;
use serde_json::{Map, Value};

use crate::entity_ports::{
    AuditEvent, AuditRepository, EntityQuery, EntityRepository, PaginatedResult,
};
use crate::entity_query::query_records;

mod access;
mod payload;
mod read;
mod write;

/// Application service for role-scoped entity reads and writes.
///
/// Reads narrow every collection to the records the caller may see before
/// querying. Writes pass the mutation gate before the store is touched.
#[derive(Clone)]
pub struct EntityService {
    repository: Arc<dyn EntityRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl EntityService {
    /// Creates a new entity service from repository implementations.
    #[must_use]
    pub fn new(
        repository: Arc<dyn EntityRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            repository,
            audit_repository,
        }
    }
}
