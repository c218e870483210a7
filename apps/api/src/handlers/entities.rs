use std::collections::HashMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use campusline_core::{AppError, CallerIdentity};
use campusline_domain::EntityKind;
use serde_json::Value;
use tracing::info;

use crate::dto::{ApiResponse, PaginatedResponse};
use crate::error::ApiResult;
use crate::state::AppState;

mod query;

use query::{ListRequest, list_request_from_params};

pub async fn list_records_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<PaginatedResponse<Value>>> {
    let kind = EntityKind::parse_transport(collection.as_str())?;
    let ListRequest { query, request_seq } =
        list_request_from_params(kind, &params, state.query_settings)?;

    let page = state
        .entity_service
        .list_records(&caller, kind, query)
        .await?
        .map(|record| record.to_json());

    Ok(Json(
        PaginatedResponse::from_result(page).with_request_seq(request_seq),
    ))
}

pub async fn get_record_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path((collection, record_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let kind = EntityKind::parse_transport(collection.as_str())?;
    let record = state
        .entity_service
        .get_record(&caller, kind, record_id.as_str())
        .await?;

    Ok(Json(ApiResponse::ok(record.to_json())))
}

pub async fn create_record_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(collection): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let kind = EntityKind::parse_transport(collection.as_str())?;
    let Json(payload) = payload.map_err(invalid_body)?;

    let record = state
        .entity_service
        .create_record(&caller, kind, payload)
        .await?;

    info!(
        collection = kind.as_str(),
        record_id = record.record_id().as_str(),
        role = caller.role().as_str(),
        "record created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            record.to_json(),
            outcome_message(kind, "created"),
        )),
    ))
}

pub async fn update_record_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path((collection, record_id)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let kind = EntityKind::parse_transport(collection.as_str())?;
    let Json(payload) = payload.map_err(invalid_body)?;

    let record = state
        .entity_service
        .update_record(&caller, kind, record_id.as_str(), payload)
        .await?;

    info!(
        collection = kind.as_str(),
        record_id = record_id.as_str(),
        role = caller.role().as_str(),
        "record updated"
    );

    Ok(Json(ApiResponse::with_message(
        record.to_json(),
        outcome_message(kind, "updated"),
    )))
}

pub async fn delete_record_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path((collection, record_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let kind = EntityKind::parse_transport(collection.as_str())?;
    state
        .entity_service
        .delete_record(&caller, kind, record_id.as_str())
        .await?;

    info!(
        collection = kind.as_str(),
        record_id = record_id.as_str(),
        role = caller.role().as_str(),
        "record deleted"
    );

    Ok(Json(ApiResponse::message_only(outcome_message(kind, "deleted"))))
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::InvalidInput(format!("invalid JSON body: {}", rejection.body_text()))
}

// "Learning group created successfully."
fn outcome_message(kind: EntityKind, verb: &str) -> String {
    let label = kind.singular_label();
    let mut characters = label.chars();
    let capitalized = characters
        .next()
        .map(|first| first.to_uppercase().chain(characters).collect::<String>())
        .unwrap_or_default();

    format!("{capitalized} {verb} successfully.")
}
