use axum::Router;
use axum::middleware::from_fn;
use axum::routing::get;
use campusline_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let caller_routes = Router::new()
        .route(
            "/api/audit-log",
            get(handlers::audit::list_audit_log_handler),
        )
        .route(
            "/api/{collection}",
            get(handlers::entities::list_records_handler)
                .post(handlers::entities::create_record_handler),
        )
        .route(
            "/api/{collection}/{record_id}",
            get(handlers::entities::get_record_handler)
                .put(handlers::entities::update_record_handler)
                .delete(handlers::entities::delete_record_handler),
        )
        .route_layer(from_fn(middleware::resolve_caller));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(caller_routes)
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
