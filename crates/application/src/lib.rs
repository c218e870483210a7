//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_log_service;
mod entity_ports;
mod entity_query;
mod entity_service;
mod query_sequencer;

pub use audit_log_service::{AuditLogService, MAX_AUDIT_LOG_LIMIT};
pub use entity_ports::{
    AuditEvent, AuditRepository, DEFAULT_PAGE_LIMIT, EntityQuery, EntityRepository, EntitySort,
    PaginatedResult, Pagination, SortDirection,
};
pub use entity_query::{QueryableRecord, query_records};
pub use entity_service::EntityService;
pub use query_sequencer::{LatestResultSlot, QuerySequencer, QueryTicket};
