use async_trait::async_trait;
use campusline_application::{AuditEvent, AuditRepository};
use campusline_core::AppResult;
use tokio::sync::RwLock;

/// Append-only in-memory audit log.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        tracing::info!(
            action = event.action.as_str(),
            collection = event.kind.as_str(),
            role = event.role.as_str(),
            record_id = event.record_id.as_deref().unwrap_or("-"),
            "audit event recorded"
        );

        self.events.write().await.push(event);
        Ok(())
    }

    async fn list_recent_events(&self, limit: usize) -> AppResult<Vec<AuditEvent>> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use campusline_application::{AuditEvent, AuditRepository};
    use campusline_core::Role;
    use campusline_domain::{AuditAction, EntityKind};
    use chrono::Utc;

    use super::InMemoryAuditRepository;

    fn event(record_id: &str) -> AuditEvent {
        AuditEvent {
            kind: EntityKind::Program,
            record_id: Some(record_id.to_owned()),
            action: AuditAction::RecordCreated,
            role: Role::Headquarters,
            scope: None,
            detail: None,
            occurred_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn lists_newest_events_first() {
        let repository = InMemoryAuditRepository::new();
        for record_id in ["a", "b", "c"] {
            assert!(repository.append_event(event(record_id)).await.is_ok());
        }

        let recent: Vec<Option<String>> = repository
            .list_recent_events(2)
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|event| event.record_id)
            .collect();

        assert_eq!(recent, vec![Some("c".to_owned()), Some("b".to_owned())]);
    }
}
