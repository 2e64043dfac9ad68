use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use common::ChartData;
use tracing::{debug, instrument, trace};

use crate::schemas::{ApiResponse, AppState, CachedData, RangeQuery};

/// Get the forecast-vs-actuals chart over the unified month axis
#[utoipa::path(
    get,
    path = "/api/v1/charts/monthly",
    tag = "charts",
    responses(
        (status = 200, description = "Monthly chart computed successfully", body = ApiResponse<common::ChartData>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_monthly_chart(
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ChartData>>, StatusCode> {
    let (from, to) = query.bounds();
    let cache_key = format!("chart_monthly_{:?}_{:?}", from, to);

    if let Some(CachedData::Chart(chart)) = state.cache.get(&cache_key).await {
        trace!("Monthly chart served from cache");
        return Ok(Json(chart_response(chart)));
    }

    let records = compute::filter_range(&state.store.monthly_records().await, from, to);
    let entries = compute::filter_range(&state.store.evolution_entries().await, from, to);
    // Both dashboard charts share one axis, so the single chart is built
    // over the months of both series as well.
    let axis = compute::unify_months(&records, &entries);
    let chart = compute::forecast_chart(&records, &axis);
    debug!(
        "Monthly chart built with {} labels and {} datasets",
        chart.labels.len(),
        chart.datasets.len()
    );

    state
        .cache
        .insert(cache_key, CachedData::Chart(chart.clone()))
        .await;
    Ok(Json(chart_response(chart)))
}

/// Get the bucket evolution chart over the unified month axis
#[utoipa::path(
    get,
    path = "/api/v1/charts/evolution",
    tag = "charts",
    responses(
        (status = 200, description = "Evolution chart computed successfully", body = ApiResponse<common::ChartData>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_evolution_chart(
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ChartData>>, StatusCode> {
    let (from, to) = query.bounds();
    let cache_key = format!("chart_evolution_{:?}_{:?}", from, to);

    if let Some(CachedData::Chart(chart)) = state.cache.get(&cache_key).await {
        trace!("Evolution chart served from cache");
        return Ok(Json(chart_response(chart)));
    }

    let records = compute::filter_range(&state.store.monthly_records().await, from, to);
    let entries = compute::filter_range(&state.store.evolution_entries().await, from, to);
    let axis = compute::unify_months(&records, &entries);
    let chart = compute::evolution_chart(&entries, &axis);
    debug!(
        "Evolution chart built with {} labels and {} datasets",
        chart.labels.len(),
        chart.datasets.len()
    );

    state
        .cache
        .insert(cache_key, CachedData::Chart(chart.clone()))
        .await;
    Ok(Json(chart_response(chart)))
}

fn chart_response(chart: ChartData) -> ApiResponse<ChartData> {
    ApiResponse {
        data: chart,
        message: "Chart computed successfully".to_string(),
        success: true,
    }
}
