use axum::extract::{Query, Request};
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::Response;
use campusline_core::{AppError, AppResult, CallerIdentity, Role, ScopeId};
use serde::Deserialize;

use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallerParams {
    user_role: Option<String>,
    user_scope: Option<String>,
}

/// Resolves the caller from `userRole` and `userScope` query parameters.
pub async fn resolve_caller(mut request: Request, next: Next) -> ApiResult<Response> {
    let caller = caller_from_uri(request.uri())?;

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}

pub(crate) fn caller_from_uri(uri: &Uri) -> AppResult<CallerIdentity> {
    let Query(params) = Query::<CallerParams>::try_from_uri(uri)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    let role = params
        .user_role
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            AppError::InvalidInput("userRole query parameter is required".to_owned())
        })?;
    let role = Role::parse_transport(role)?;

    let scope = params
        .user_scope
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ScopeId::new)
        .transpose()?;

    Ok(CallerIdentity::new(role, scope))
}

#[cfg(test)]
mod tests {
    use axum::http::Uri;
    use campusline_core::{AppError, Role};

    use super::caller_from_uri;

    fn uri(value: &'static str) -> Uri {
        Uri::from_static(value)
    }

    #[test]
    fn resolves_role_and_scope() {
        let caller = caller_from_uri(&uri("/api/programs?userRole=MF&userScope=mf_1&page=2"))
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(caller.role(), Role::MasterFranchise);
        assert_eq!(caller.scope().map(|scope| scope.as_str()), Some("mf_1"));
    }

    #[test]
    fn blank_scope_means_unscoped() {
        let caller = caller_from_uri(&uri("/api/programs?userRole=LC&userScope="))
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(caller.scope(), None);
    }

    #[test]
    fn missing_or_unknown_role_is_invalid_input() {
        for value in [
            "/api/programs",
            "/api/programs?userRole=",
            "/api/programs?userRole=admin",
            "/api/programs?userRole=hq",
        ] {
            assert!(
                matches!(caller_from_uri(&uri(value)), Err(AppError::InvalidInput(_))),
                "{value}"
            );
        }
    }
}
