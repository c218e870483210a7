use std::borrow::Cow;
use std::cmp::Ordering;

use campusline_core::{AppError, AppResult};
use campusline_domain::EntityRecord;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::entity_ports::{EntityQuery, EntitySort, PaginatedResult, Pagination, SortDirection};

/// Read access to named fields, as needed by the query engine.
pub trait QueryableRecord {
    /// Resolves a field value by name.
    fn query_field(&self, field_name: &str) -> Option<Cow<'_, Value>>;
}

impl QueryableRecord for EntityRecord {
    fn query_field(&self, field_name: &str) -> Option<Cow<'_, Value>> {
        self.field(field_name)
    }
}

/// Applies search, filters, sort and pagination to a collection.
///
/// Empty collections and out-of-range pages produce an empty page with a
/// correct `total`; only a zero `limit` is rejected.
pub fn query_records<T: QueryableRecord>(
    records: Vec<T>,
    searchable_fields: &[&str],
    query: &EntityQuery,
) -> AppResult<PaginatedResult<T>> {
    if query.limit == 0 {
        return Err(AppError::InvalidInput(
            "limit must be at least 1".to_owned(),
        ));
    }

    let search_term = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);

    let matching: Vec<T> = records
        .into_iter()
        .filter(|record| {
            search_term
                .as_deref()
                .is_none_or(|term| record_matches_search(record, searchable_fields, term))
        })
        .filter(|record| {
            query.filters.iter().all(|(field_name, expected)| {
                record
                    .query_field(field_name)
                    .is_some_and(|value| value_matches_filter(&value, expected))
            })
        })
        .collect();

    let sorted = match &query.sort {
        Some(sort) => sort_records(matching, sort),
        None => matching,
    };

    let total = sorted.len();
    let total_pages = total.div_ceil(query.limit);
    let data = page_offset(query.page, query.limit)
        .map(|offset| sorted.into_iter().skip(offset).take(query.limit).collect())
        .unwrap_or_default();

    Ok(PaginatedResult {
        data,
        pagination: Pagination {
            page: query.page,
            limit: query.limit,
            total,
            total_pages,
        },
    })
}

fn page_offset(page: i64, limit: usize) -> Option<usize> {
    let zero_based = usize::try_from(page.checked_sub(1)?).ok()?;
    Some(zero_based.saturating_mul(limit))
}

fn record_matches_search<T: QueryableRecord>(
    record: &T,
    searchable_fields: &[&str],
    term: &str,
) -> bool {
    searchable_fields.iter().any(|field_name| {
        record
            .query_field(field_name)
            .as_deref()
            .and_then(Value::as_str)
            .is_some_and(|value| value.to_lowercase().contains(term))
    })
}

fn value_matches_filter(value: &Value, expected: &str) -> bool {
    match value {
        Value::String(stored) => stored == expected,
        Value::Number(stored) => stored.to_string() == expected,
        Value::Bool(stored) => stored.to_string() == expected,
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Stable sort that leaves records without a comparable value in place.
///
/// Records holding a comparable value are reordered among the positions they
/// already occupy, so a missing field never moves a record.
fn sort_records<T: QueryableRecord>(records: Vec<T>, sort: &EntitySort) -> Vec<T> {
    let mut slots: Vec<Option<T>> = Vec::with_capacity(records.len());
    let mut positions = Vec::new();
    let mut keyed = Vec::new();

    for (position, record) in records.into_iter().enumerate() {
        let key = record
            .query_field(sort.field_name.as_str())
            .and_then(|value| SortKey::from_value(value.as_ref()));

        match key {
            Some(key) => {
                positions.push(position);
                keyed.push((key, record));
                slots.push(None);
            }
            None => slots.push(Some(record)),
        }
    }

    keyed.sort_by(|(left, _), (right, _)| match sort.direction {
        SortDirection::Asc => left.cmp(right),
        SortDirection::Desc => right.cmp(left),
    });

    for (position, (_, record)) in positions.into_iter().zip(keyed) {
        if let Some(slot) = slots.get_mut(position) {
            *slot = Some(record);
        }
    }

    slots.into_iter().flatten().collect()
}

#[derive(Debug, Clone)]
enum SortKey {
    Boolean(bool),
    Number(f64),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl SortKey {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(value) => Some(Self::Boolean(*value)),
            Value::Number(value) => value.as_f64().map(Self::Number),
            Value::String(value) => Some(
                DateTime::parse_from_rfc3339(value)
                    .map(|timestamp| Self::Timestamp(timestamp.with_timezone(&Utc)))
                    .unwrap_or_else(|_| Self::Text(value.clone())),
            ),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Self::Boolean(_) => 0,
            Self::Number(_) => 1,
            Self::Timestamp(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Boolean(left), Self::Boolean(right)) => left.cmp(right),
            (Self::Number(left), Self::Number(right)) => left.total_cmp(right),
            (Self::Timestamp(left), Self::Timestamp(right)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}
