use super::*;

impl EntityService {
    /// Lists the caller-visible records of a collection.
    ///
    /// Filters must name fields the collection declares as filterable.
    pub async fn list_records(
        &self,
        caller: &CallerIdentity,
        kind: EntityKind,
        query: EntityQuery,
    ) -> AppResult<PaginatedResult<EntityRecord>> {
        let descriptor = kind.descriptor();
        if let Some(field_name) = query
            .filters
            .keys()
            .find(|field_name| !descriptor.is_filterable(field_name))
        {
            return Err(AppError::InvalidInput(format!(
                "field '{field_name}' cannot be used to filter {}",
                kind.plural_label()
            )));
        }

        let records = self.repository.list_records(kind).await?;
        let visible = Self::filter_visible(kind, records, caller);

        query_records(visible, descriptor.searchable_fields, &query)
    }

    /// Fetches one record, failing with `Forbidden` when it exists but is hidden.
    pub async fn get_record(
        &self,
        caller: &CallerIdentity,
        kind: EntityKind,
        record_id: &str,
    ) -> AppResult<EntityRecord> {
        let record = self
            .repository
            .find_record(kind, record_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("{} '{record_id}' not found", kind.singular_label()))
            })?;

        if !Self::is_visible(kind, &record, caller) {
            return Err(AppError::Forbidden(format!(
                "Access denied. You do not have permission to view this {}.",
                kind.singular_label()
            )));
        }

        Ok(record)
    }
}
