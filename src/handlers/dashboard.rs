use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use common::DashboardSummary;
use tracing::{debug, instrument, trace};

use crate::schemas::{ApiResponse, AppState, CachedData, RangeQuery};

/// Get the headline dashboard summary. Monthly records honor the range
/// filter; prepaid pools are always global.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary computed successfully", body = ApiResponse<common::DashboardSummary>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_dashboard(
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardSummary>>, StatusCode> {
    let (from, to) = query.bounds();
    let cache_key = format!("dashboard_{:?}_{:?}", from, to);

    if let Some(CachedData::Summary(summary)) = state.cache.get(&cache_key).await {
        trace!("Dashboard summary served from cache");
        return Ok(Json(summary_response(summary)));
    }

    let records = compute::filter_range(&state.store.monthly_records().await, from, to);
    let prepaid = state.store.prepaid_entries().await;
    let summary = compute::dashboard_summary(&records, &prepaid);
    debug!(
        "Dashboard summary over {} records (wip_total {})",
        records.len(),
        summary.wip_total
    );

    state
        .cache
        .insert(cache_key, CachedData::Summary(summary.clone()))
        .await;
    Ok(Json(summary_response(summary)))
}

fn summary_response(summary: DashboardSummary) -> ApiResponse<DashboardSummary> {
    ApiResponse {
        data: summary,
        message: "Dashboard summary computed successfully".to_string(),
        success: true,
    }
}
