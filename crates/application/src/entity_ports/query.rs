use std::collections::BTreeMap;

use campusline_core::{AppError, AppResult};

/// Page size used when a request does not specify one.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending sort direction.
    #[default]
    Asc,
    /// Descending sort direction.
    Desc,
}

impl SortDirection {
    /// Parses transport value into sort direction.
    pub fn parse_transport(value: &str) -> AppResult<Self> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::InvalidInput(format!(
                "unknown sort order '{value}', expected asc or desc"
            ))),
        }
    }

    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Sort instruction for list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySort {
    /// Field name to sort by, including `id`, `createdAt` and `updatedAt`.
    pub field_name: String,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Query descriptor for one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityQuery {
    /// Case-insensitive free-text term.
    pub search: Option<String>,
    /// Exact-match filters combined with logical AND.
    pub filters: BTreeMap<String, String>,
    /// Optional sort instruction.
    pub sort: Option<EntitySort>,
    /// One-based page number; pages below one yield no rows.
    pub page: i64,
    /// Maximum rows per page, at least one.
    pub limit: usize,
}

impl Default for EntityQuery {
    fn default() -> Self {
        Self {
            search: None,
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Pagination block returned with every list result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Requested page.
    pub page: i64,
    /// Requested page size.
    pub limit: usize,
    /// Rows matching the query before pagination.
    pub total: usize,
    /// `ceil(total / limit)`.
    pub total_pages: usize,
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResult<T> {
    /// Rows on the requested page.
    pub data: Vec<T>,
    /// Pagination block.
    pub pagination: Pagination,
}

impl<T> PaginatedResult<T> {
    /// Maps the rows while keeping the pagination block.
    pub fn map<U>(self, transform: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            data: self.data.into_iter().map(transform).collect(),
            pagination: self.pagination,
        }
    }
}
