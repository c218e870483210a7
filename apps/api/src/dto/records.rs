use campusline_application::AuditEvent;
use campusline_domain::format_timestamp;
use serde::Serialize;
use ts_rs::TS;

/// API representation of one audit event.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-event-response.ts"
)]
pub struct AuditEventResponse {
    pub collection: String,
    pub record_id: Option<String>,
    pub action: String,
    pub role: String,
    pub scope: Option<String>,
    pub detail: Option<String>,
    pub occurred_at: String,
}

impl From<AuditEvent> for AuditEventResponse {
    fn from(value: AuditEvent) -> Self {
        Self {
            collection: value.kind.as_str().to_owned(),
            record_id: value.record_id,
            action: value.action.as_str().to_owned(),
            role: value.role.as_str().to_owned(),
            scope: value.scope.map(|scope| scope.as_str().to_owned()),
            detail: value.detail,
            occurred_at: format_timestamp(value.occurred_at),
        }
    }
}
