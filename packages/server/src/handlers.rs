//! HTTP handler functions for the barangay map API.

use actix_web::{HttpResponse, web};
use barangay_map_server_models::{
    ApiDashboard, ApiHealth, ApiMap, ApiResources, ResourcesQueryParams,
};
use barangay_map_view::{TableView, build_dashboard, build_map};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/dashboard`
///
/// Whole-dataset statistics plus the headline weather.
pub async fn dashboard(state: web::Data<AppState>) -> HttpResponse {
    let summary = build_dashboard(&state.store, &state.resolver).await;
    HttpResponse::Ok().json(ApiDashboard::from(summary))
}

/// `GET /api/resources`
///
/// Filters and sorts the table for the state in the query string. When
/// `click` is present the toggle rule is applied first and the new state
/// is returned alongside the rows.
pub async fn resources(
    state: web::Data<AppState>,
    params: web::Query<ResourcesQueryParams>,
) -> HttpResponse {
    let view_state = params.resolve_state();
    log::debug!(
        "Resources: search={:?} sort={} {}",
        view_state.search,
        view_state.sort_key,
        view_state.direction
    );
    let table = TableView::derive(state.store.records(), view_state);
    HttpResponse::Ok().json(ApiResources::new(table, state.store.len()))
}

/// `GET /api/map`
///
/// Markers for every record, each enriched with weather in record order.
pub async fn map(state: web::Data<AppState>) -> HttpResponse {
    let view = build_map(state.store.records(), &state.resolver).await;
    HttpResponse::Ok().json(ApiMap::from(view))
}
