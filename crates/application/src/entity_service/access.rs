use super::*;

impl EntityService {
    /// Narrows a collection to the records the caller may see.
    ///
    /// Collections without a visibility rule are returned unchanged.
    pub fn filter_visible(
        kind: EntityKind,
        records: Vec<EntityRecord>,
        caller: &CallerIdentity,
    ) -> Vec<EntityRecord> {
        let Some(rule) = kind.visibility_rule() else {
            return records;
        };

        records
            .into_iter()
            .filter(|record| rule.allows(record, caller))
            .collect()
    }

    pub(super) fn is_visible(
        kind: EntityKind,
        record: &EntityRecord,
        caller: &CallerIdentity,
    ) -> bool {
        kind.visibility_rule()
            .is_none_or(|rule| rule.allows(record, caller))
    }

    /// Runs the mutation gate and records denials in the audit log.
    pub(super) async fn require_mutation(
        &self,
        caller: &CallerIdentity,
        kind: EntityKind,
        operation: MutationOperation,
        record_id: Option<&str>,
    ) -> AppResult<()> {
        let reason = match authorize_mutation(caller.role(), kind, operation) {
            MutationDecision::Allowed => return Ok(()),
            MutationDecision::Denied { reason } => reason,
        };

        self.audit_repository
            .append_event(AuditEvent {
                kind,
                record_id: record_id.map(str::to_owned),
                action: AuditAction::MutationDenied,
                role: caller.role(),
                scope: caller.scope().cloned(),
                detail: Some(reason.clone()),
                occurred_at: Utc::now(),
            })
            .await?;

        Err(AppError::Forbidden(format!("Access denied. {reason}")))
    }

    pub(super) async fn record_mutation(
        &self,
        caller: &CallerIdentity,
        kind: EntityKind,
        action: AuditAction,
        record_id: &str,
    ) -> AppResult<()> {
        let verb = match action {
            AuditAction::RecordCreated => "created",
            AuditAction::RecordUpdated => "updated",
            AuditAction::RecordDeleted => "deleted",
            AuditAction::MutationDenied => "denied",
        };

        self.audit_repository
            .append_event(AuditEvent {
                kind,
                record_id: Some(record_id.to_owned()),
                action,
                role: caller.role(),
                scope: caller.scope().cloned(),
                detail: Some(format!("{verb} {} '{record_id}'", kind.singular_label())),
                occurred_at: Utc::now(),
            })
            .await
    }
}
