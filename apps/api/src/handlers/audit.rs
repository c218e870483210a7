use axum::Json;
use axum::extract::{Extension, Query, State};
use campusline_core::{AppError, CallerIdentity};
use serde::Deserialize;

use crate::dto::{ApiResponse, AuditEventResponse};
use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_AUDIT_LOG_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct AuditLogQuery {
    pub limit: Option<String>,
}

pub async fn list_audit_log_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Query(query): Query<AuditLogQuery>,
) -> ApiResult<Json<ApiResponse<Vec<AuditEventResponse>>>> {
    let limit = query
        .limit
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<usize>()
                .map_err(|_| AppError::InvalidInput(format!("invalid limit '{value}'")))
        })
        .transpose()?
        .unwrap_or(DEFAULT_AUDIT_LOG_LIMIT);

    let events = state
        .audit_log_service
        .list_events(&caller, limit)
        .await?
        .into_iter()
        .map(AuditEventResponse::from)
        .collect();

    Ok(Json(ApiResponse::ok(events)))
}
