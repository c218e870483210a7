use campusline_application::{PaginatedResult, Pagination};
use campusline_core::AppError;
use serde::Serialize;
use ts_rs::TS;

/// Success envelope for single values and plain messages.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope carrying `data: null` and a message.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Pagination block of list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/pagination-response.ts"
)]
pub struct PaginationResponse {
    #[ts(type = "number")]
    pub page: i64,
    #[ts(type = "number")]
    pub limit: usize,
    #[ts(type = "number")]
    pub total: usize,
    #[ts(type = "number")]
    pub total_pages: usize,
}

impl From<Pagination> for PaginationResponse {
    fn from(value: Pagination) -> Self {
        Self {
            page: value.page,
            limit: value.limit,
            total: value.total,
            total_pages: value.total_pages,
        }
    }
}

/// Success envelope for one page of a list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PaginationResponse,
    /// Echo of the client's request sequence number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_seq: Option<u64>,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result(result: PaginatedResult<T>) -> Self {
        Self {
            success: true,
            data: result.data,
            pagination: result.pagination.into(),
            request_seq: None,
        }
    }

    #[must_use]
    pub fn with_request_seq(mut self, request_seq: Option<u64>) -> Self {
        self.request_seq = request_seq;
        self
    }
}

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[ts(type = "\"not_found\" | \"forbidden\" | \"invalid_input\" | \"internal\"")]
    pub code: &'static str,
}

impl ErrorResponse {
    pub fn from_error(error: &AppError) -> Self {
        Self {
            success: false,
            message: error.message().to_owned(),
            code: error.code(),
        }
    }
}
