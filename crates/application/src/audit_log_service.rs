use std::sync::Arc;

use campusline_core::{AppError, AppResult, CallerIdentity, Role};

use crate::entity_ports::{AuditEvent, AuditRepository};

/// Upper bound on events returned by one audit-log read.
pub const MAX_AUDIT_LOG_LIMIT: usize = 500;

/// Application service for reading the audit log.
#[derive(Clone)]
pub struct AuditLogService {
    audit_repository: Arc<dyn AuditRepository>,
}

impl AuditLogService {
    /// Creates a service from an audit repository implementation.
    #[must_use]
    pub fn new(audit_repository: Arc<dyn AuditRepository>) -> Self {
        Self { audit_repository }
    }

    /// Lists the most recent audit events, newest first. Headquarters only.
    pub async fn list_events(
        &self,
        caller: &CallerIdentity,
        limit: usize,
    ) -> AppResult<Vec<AuditEvent>> {
        if caller.role() != Role::Headquarters {
            return Err(AppError::Forbidden(
                "Access denied. Only HQ can view the audit log.".to_owned(),
            ));
        }

        if limit == 0 {
            return Err(AppError::InvalidInput(
                "limit must be at least 1".to_owned(),
            ));
        }

        self.audit_repository
            .list_recent_events(limit.min(MAX_AUDIT_LOG_LIMIT))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use campusline_core::{AppError, AppResult, CallerIdentity, Role};
    use campusline_domain::{AuditAction, EntityKind};
    use chrono::Utc;
    use tokio::sync::Mutex;

    use super::{AuditLogService, MAX_AUDIT_LOG_LIMIT};
    use crate::{AuditEvent, AuditRepository};

    #[derive(Default)]
    struct FakeAuditRepository {
        requested_limits: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl AuditRepository for FakeAuditRepository {
        async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
            Ok(())
        }

        async fn list_recent_events(&self, limit: usize) -> AppResult<Vec<AuditEvent>> {
            self.requested_limits.lock().await.push(limit);
            Ok(vec![AuditEvent {
                kind: EntityKind::Program,
                record_id: None,
                action: AuditAction::MutationDenied,
                role: Role::MasterFranchise,
                scope: None,
                detail: Some("Only HQ can create programs.".to_owned()),
                occurred_at: Utc::now(),
            }])
        }
    }

    #[tokio::test]
    async fn only_headquarters_reads_the_audit_log() {
        let repository = Arc::new(FakeAuditRepository::default());
        let service = AuditLogService::new(repository.clone());

        for role in [Role::MasterFranchise, Role::LearningCenter, Role::TeacherTrainer] {
            let result = service
                .list_events(&CallerIdentity::unscoped(role), 10)
                .await;
            assert!(matches!(result, Err(AppError::Forbidden(_))));
        }
        assert!(repository.requested_limits.lock().await.is_empty());

        let events = service
            .list_events(&CallerIdentity::unscoped(Role::Headquarters), 10)
            .await
            .unwrap_or_default();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn clamps_large_limits_and_rejects_zero() {
        let repository = Arc::new(FakeAuditRepository::default());
        let service = AuditLogService::new(repository.clone());
        let headquarters = CallerIdentity::unscoped(Role::Headquarters);

        let zero = service.list_events(&headquarters, 0).await;
        assert!(matches!(zero, Err(AppError::InvalidInput(_))));

        let clamped = service.list_events(&headquarters, 10_000).await;
        assert!(clamped.is_ok());
        assert_eq!(
            *repository.requested_limits.lock().await,
            vec![MAX_AUDIT_LOG_LIMIT]
        );
    }
}
