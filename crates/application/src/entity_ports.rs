mod audit;
mod query;
mod repository;

pub use audit::{AuditEvent, AuditRepository};
pub use query::{
    DEFAULT_PAGE_LIMIT, EntityQuery, EntitySort, PaginatedResult, Pagination, SortDirection,
};
pub use repository::EntityRepository;
