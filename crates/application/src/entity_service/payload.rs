use super::*;

impl EntityService {
    /// Validates a create or update body and normalizes it to its stored form.
    pub(super) fn normalize_payload(
        kind: EntityKind,
        payload: Value,
    ) -> AppResult<Map<String, Value>> {
        let mut object = payload_object(payload)?;

        if let Some(rule) = kind.visibility_rule() {
            rule.validate_payload(&object)?;
        }

        if kind == EntityKind::LearningGroup {
            normalize_pricing_snapshot(&mut object)?;
        }

        Ok(object)
    }
}

fn normalize_pricing_snapshot(object: &mut Map<String, Value>) -> AppResult<()> {
    let Some(value) = object.get_mut(PRICING_SNAPSHOT_FIELD) else {
        return Ok(());
    };

    // Null clears the snapshot.
    if value.is_null() {
        return Ok(());
    }

    *value = PricingSnapshot::from_transport(value)?.to_value()?;
    Ok(())
}
