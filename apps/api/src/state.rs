use std::sync::Arc;

use campusline_application::{AuditLogService, EntityService};
use campusline_infrastructure::{InMemoryAuditRepository, InMemoryEntityRepository};

/// Page-size bounds applied to list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySettings {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub entity_service: EntityService,
    pub audit_log_service: AuditLogService,
    pub query_settings: QuerySettings,
}

impl AppState {
    /// Wires services to the in-memory adapters.
    pub fn in_memory(query_settings: QuerySettings) -> Self {
        let audit_repository = Arc::new(InMemoryAuditRepository::new());

        Self {
            entity_service: EntityService::new(
                Arc::new(InMemoryEntityRepository::new()),
                audit_repository.clone(),
            ),
            audit_log_service: AuditLogService::new(audit_repository),
            query_settings,
        }
    }
}
