use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by entity use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a record is created.
    RecordCreated,
    /// Emitted when a record is updated.
    RecordUpdated,
    /// Emitted when a record is deleted.
    RecordDeleted,
    /// Emitted when the mutation gate rejects a write.
    MutationDenied,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecordCreated => "record.created",
            Self::RecordUpdated => "record.updated",
            Self::RecordDeleted => "record.deleted",
            Self::MutationDenied => "mutation.denied",
        }
    }
}
