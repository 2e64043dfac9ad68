use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, instrument};

use crate::handlers::evolution::EvolutionEntryResponse;
use crate::handlers::records::MonthlyRecordResponse;
use crate::schemas::{ApiResponse, AppState, RangeQuery};

/// Get the monthly record series, ordered by month
#[utoipa::path(
    get,
    path = "/api/v1/series/monthly",
    tag = "series",
    responses(
        (status = 200, description = "Monthly series retrieved successfully", body = ApiResponse<Vec<MonthlyRecordResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_monthly_series(
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MonthlyRecordResponse>>>, StatusCode> {
    let (from, to) = query.bounds();
    let records = compute::filter_range(&state.store.monthly_records().await, from, to);
    debug!("Monthly series spans {} months", records.len());

    let response = ApiResponse {
        data: records.into_iter().map(MonthlyRecordResponse::from).collect(),
        message: "Monthly series retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get the evolution series, ordered by month, with accumulated values
#[utoipa::path(
    get,
    path = "/api/v1/series/evolution",
    tag = "series",
    responses(
        (status = 200, description = "Evolution series retrieved successfully", body = ApiResponse<Vec<EvolutionEntryResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_evolution_series(
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EvolutionEntryResponse>>>, StatusCode> {
    let (from, to) = query.bounds();
    let entries = compute::filter_range(&state.store.evolution_entries().await, from, to);
    debug!("Evolution series spans {} months", entries.len());

    let response = ApiResponse {
        data: entries
            .into_iter()
            .map(EvolutionEntryResponse::from)
            .collect(),
        message: "Evolution series retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
