use super::*;

impl EntityService {
    /// Creates a record after the mutation gate allows it.
    pub async fn create_record(
        &self,
        caller: &CallerIdentity,
        kind: EntityKind,
        payload: Value,
    ) -> AppResult<EntityRecord> {
        self.require_mutation(caller, kind, MutationOperation::Create, None)
            .await?;

        let data = Self::normalize_payload(kind, payload)?;
        let record = self.repository.create_record(kind, data).await?;

        self.record_mutation(
            caller,
            kind,
            AuditAction::RecordCreated,
            record.record_id().as_str(),
        )
        .await?;

        Ok(record)
    }

    /// Merges a partial payload into an existing record.
    pub async fn update_record(
        &self,
        caller: &CallerIdentity,
        kind: EntityKind,
        record_id: &str,
        patch: Value,
    ) -> AppResult<EntityRecord> {
        self.require_mutation(caller, kind, MutationOperation::Update, Some(record_id))
            .await?;

        let patch = Self::normalize_payload(kind, patch)?;
        let record = self.repository.update_record(kind, record_id, patch).await?;

        self.record_mutation(caller, kind, AuditAction::RecordUpdated, record_id)
            .await?;

        Ok(record)
    }

    /// Removes a record, failing with `NotFound` when it did not exist.
    pub async fn delete_record(
        &self,
        caller: &CallerIdentity,
        kind: EntityKind,
        record_id: &str,
    ) -> AppResult<()> {
        self.require_mutation(caller, kind, MutationOperation::Delete, Some(record_id))
            .await?;

        if !self.repository.delete_record(kind, record_id).await? {
            return Err(AppError::NotFound(format!(
                "{} '{record_id}' not found",
                kind.singular_label()
            )));
        }

        self.record_mutation(caller, kind, AuditAction::RecordDeleted, record_id)
            .await
    }
}
