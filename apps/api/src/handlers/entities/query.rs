use std::collections::{BTreeMap, HashMap};

use campusline_application::{EntityQuery, EntitySort, SortDirection};
use campusline_core::{AppError, AppResult};
use campusline_domain::EntityKind;

use crate::state::QuerySettings;

const RESERVED_PARAMS: &[&str] = &[
    "search",
    "page",
    "limit",
    "sortBy",
    "sortOrder",
    "userRole",
    "userScope",
    "requestSeq",
];

// Filter values the UI sends for "no filter".
const IGNORED_FILTER_VALUES: &[&str] = &["", "all"];

/// List request decoded from the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub query: EntityQuery,
    pub request_seq: Option<u64>,
}

pub(crate) fn list_request_from_params(
    kind: EntityKind,
    params: &HashMap<String, String>,
    settings: QuerySettings,
) -> AppResult<ListRequest> {
    let param = |name: &str| {
        params
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    };

    let page = param("page")
        .map(|value| parse_integer::<i64>("page", value))
        .transpose()?
        .unwrap_or(1);

    let limit = match param("limit") {
        None => settings.default_page_size,
        Some(value) => {
            let requested = parse_integer::<i64>("limit", value)?;
            if requested < 1 {
                return Err(AppError::InvalidInput(
                    "limit must be at least 1".to_owned(),
                ));
            }
            usize::try_from(requested)
                .unwrap_or(usize::MAX)
                .min(settings.max_page_size)
        }
    };

    let direction = param("sortOrder")
        .map(SortDirection::parse_transport)
        .transpose()?
        .unwrap_or_default();
    let sort = param("sortBy").map(|field_name| EntitySort {
        field_name: field_name.to_owned(),
        direction,
    });

    let request_seq = param("requestSeq")
        .map(|value| parse_integer::<u64>("requestSeq", value))
        .transpose()?;

    // Sorted so the first offending field is stable across requests.
    let candidates: BTreeMap<&str, &str> = params
        .iter()
        .filter(|(field_name, _)| !RESERVED_PARAMS.contains(&field_name.as_str()))
        .map(|(field_name, value)| (field_name.as_str(), value.trim()))
        .filter(|(_, value)| !IGNORED_FILTER_VALUES.contains(value))
        .collect();

    let mut filters = BTreeMap::new();
    for (field_name, value) in candidates {
        if !kind.descriptor().is_filterable(field_name) {
            return Err(AppError::InvalidInput(format!(
                "field '{field_name}' cannot be used to filter {}",
                kind.plural_label()
            )));
        }
        filters.insert(field_name.to_owned(), value.to_owned());
    }

    Ok(ListRequest {
        query: EntityQuery {
            search: param("search").map(str::to_owned),
            filters,
            sort,
            page,
            limit,
        },
        request_seq,
    })
}

fn parse_integer<T: std::str::FromStr>(name: &str, value: &str) -> AppResult<T> {
    value
        .parse::<T>()
        .map_err(|_| AppError::InvalidInput(format!("{name} must be an integer, got '{value}'")))
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use campusline_application::SortDirection;
    use campusline_core::AppError;
    use campusline_domain::EntityKind;

    use super::list_request_from_params;
    use crate::state::QuerySettings;

    const SETTINGS: QuerySettings = QuerySettings {
        default_page_size: 10,
        max_page_size: 100,
    };

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn defaults_to_first_page_of_configured_size() {
        let request = list_request_from_params(
            EntityKind::Program,
            &params(&[("userRole", "HQ")]),
            SETTINGS,
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(request.query.page, 1);
        assert_eq!(request.query.limit, 10);
        assert_eq!(request.query.search, None);
        assert_eq!(request.query.sort, None);
        assert!(request.query.filters.is_empty());
        assert_eq!(request.request_seq, None);
    }

    #[test]
    fn decodes_full_query_string() {
        let request = list_request_from_params(
            EntityKind::Program,
            &params(&[
                ("search", "  robo "),
                ("status", "active"),
                ("category", "all"),
                ("visibility", ""),
                ("page", "3"),
                ("limit", "25"),
                ("sortBy", "name"),
                ("sortOrder", "desc"),
                ("userRole", "MF"),
                ("userScope", "mf_1"),
                ("requestSeq", "42"),
            ]),
            SETTINGS,
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(request.query.search.as_deref(), Some("robo"));
        assert_eq!(
            request.query.filters,
            BTreeMap::from([("status".to_owned(), "active".to_owned())])
        );
        assert_eq!(request.query.page, 3);
        assert_eq!(request.query.limit, 25);
        assert_eq!(
            request.query.sort.as_ref().map(|sort| (sort.field_name.as_str(), sort.direction)),
            Some(("name", SortDirection::Desc))
        );
        assert_eq!(request.request_seq, Some(42));
    }

    #[test]
    fn clamps_limit_to_maximum() {
        let request = list_request_from_params(
            EntityKind::Teacher,
            &params(&[("limit", "5000")]),
            SETTINGS,
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(request.query.limit, 100);
    }

    #[test]
    fn rejects_malformed_parameters() {
        for pairs in [
            vec![("page", "two")],
            vec![("limit", "0")],
            vec![("limit", "-5")],
            vec![("limit", "1.5")],
            vec![("sortOrder", "sideways")],
            vec![("requestSeq", "-1")],
            vec![("salary", "high")],
        ] {
            let result = list_request_from_params(EntityKind::Teacher, &params(&pairs), SETTINGS);
            assert!(matches!(result, Err(AppError::InvalidInput(_))), "{pairs:?}");
        }
    }

    #[test]
    fn unset_filters_for_other_collections_are_ignored() {
        let request = list_request_from_params(
            EntityKind::Teacher,
            &params(&[
                ("search", ""),
                ("status", ""),
                ("category", ""),
                ("paymentStatus", "all"),
                ("sortBy", ""),
                ("sortOrder", "asc"),
            ]),
            SETTINGS,
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(request.query.filters.is_empty());
        assert_eq!(request.query.sort, None);
    }

    #[test]
    fn first_unknown_filter_is_reported_in_name_order() {
        let result = list_request_from_params(
            EntityKind::Teacher,
            &params(&[("zone", "north"), ("category", "math"), ("salary", "high")]),
            SETTINGS,
        );

        assert!(matches!(
            result,
            Err(AppError::InvalidInput(message))
                if message == "field 'category' cannot be used to filter teachers"
        ));
    }

    #[test]
    fn out_of_range_pages_are_passed_through() {
        let request = list_request_from_params(
            EntityKind::Order,
            &params(&[("page", "0")]),
            SETTINGS,
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(request.query.page, 0);
    }
}
