mod common;
mod envelope;
mod records;

pub use common::HealthResponse;
pub use envelope::{ApiResponse, ErrorResponse, PaginatedResponse, PaginationResponse};
pub use records::AuditEventResponse;
