use async_trait::async_trait;
use campusline_core::{AppResult, Role, ScopeId};
use campusline_domain::{AuditAction, EntityKind};
use chrono::{DateTime, Utc};

/// Immutable audit event payload emitted by entity use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Collection targeted by the action.
    pub kind: EntityKind,
    /// Record identifier, absent for denied creates.
    pub record_id: Option<String>,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Role of the caller.
    pub role: Role,
    /// Scope of the caller, if any.
    pub scope: Option<ScopeId>,
    /// Optional human-readable detail.
    pub detail: Option<String>,
    /// Event time.
    pub occurred_at: DateTime<Utc>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;

    /// Lists the most recent events, newest first.
    async fn list_recent_events(&self, limit: usize) -> AppResult<Vec<AuditEvent>>;
}
