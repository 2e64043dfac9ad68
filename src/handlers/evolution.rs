use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use model::{EvolutionEntry, MonthKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, RangeQuery};

/// Request body for creating (or replacing) an evolution entry. The
/// accumulated value is never accepted from the caller; it is recomputed
/// from the chain.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateEvolutionRequest {
    /// Month in any accepted format, normalized to YYYY-MM; defaults to the
    /// current month when absent or unparseable
    pub mes: Option<String>,
    #[serde(default)]
    pub incremento: Decimal,
}

/// Request body for updating an evolution entry
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateEvolutionRequest {
    /// New month for the entry (moves it within the chain)
    pub mes: Option<String>,
    pub incremento: Option<Decimal>,
}

/// Evolution entry response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EvolutionEntryResponse {
    /// Month key (YYYY-MM)
    pub mes: String,
    pub incremento: Decimal,
    /// Derived: previous month's accumulated value plus this increment
    pub acumulado: Decimal,
}

impl From<EvolutionEntry> for EvolutionEntryResponse {
    fn from(entry: EvolutionEntry) -> Self {
        Self {
            mes: entry.mes.to_string(),
            incremento: entry.incremento,
            acumulado: entry.acumulado,
        }
    }
}

/// Create or replace the evolution entry for a month
#[utoipa::path(
    post,
    path = "/api/v1/evolution",
    tag = "evolution",
    request_body = CreateEvolutionRequest,
    responses(
        (status = 201, description = "Evolution entry saved", body = ApiResponse<EvolutionEntryResponse>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn create_evolution_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateEvolutionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EvolutionEntryResponse>>), StatusCode> {
    let mes = MonthKey::parse_or_current(request.mes.as_deref().unwrap_or_default());
    debug!("Saving evolution entry for {}", mes);

    let entry = match state.store.upsert_evolution(mes, request.incremento).await {
        Some(entry) => entry,
        None => {
            error!("Evolution entry for {} missing after insert", mes);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    state.cache.invalidate_all();
    info!(
        "Evolution entry saved for {} (acumulado {})",
        entry.mes, entry.acumulado
    );

    let response = ApiResponse {
        data: EvolutionEntryResponse::from(entry),
        message: "Evolution entry saved".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all evolution entries, optionally filtered to a month range
#[utoipa::path(
    get,
    path = "/api/v1/evolution",
    tag = "evolution",
    responses(
        (status = 200, description = "Evolution entries retrieved successfully", body = ApiResponse<Vec<EvolutionEntryResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_evolution_entries(
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EvolutionEntryResponse>>>, StatusCode> {
    let (from, to) = query.bounds();
    let entries = compute::filter_range(&state.store.evolution_entries().await, from, to);
    debug!("Retrieved {} evolution entries", entries.len());

    let response = ApiResponse {
        data: entries
            .into_iter()
            .map(EvolutionEntryResponse::from)
            .collect(),
        message: "Evolution entries retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get the evolution entry for a single month
#[utoipa::path(
    get,
    path = "/api/v1/evolution/{month}",
    tag = "evolution",
    params(
        ("month" = String, Path, description = "Month key (YYYY-MM)"),
    ),
    responses(
        (status = 200, description = "Evolution entry retrieved successfully", body = ApiResponse<EvolutionEntryResponse>),
        (status = 404, description = "Month not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_evolution_entry(
    Path(month): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<EvolutionEntryResponse>>, StatusCode> {
    let mes: MonthKey = month.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    let entry = state
        .store
        .evolution_entry(mes)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    let response = ApiResponse {
        data: EvolutionEntryResponse::from(entry),
        message: "Evolution entry retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update the evolution entry for a month and recompute the chain
#[utoipa::path(
    put,
    path = "/api/v1/evolution/{month}",
    tag = "evolution",
    params(
        ("month" = String, Path, description = "Month key (YYYY-MM)"),
    ),
    request_body = UpdateEvolutionRequest,
    responses(
        (status = 200, description = "Evolution entry updated successfully", body = ApiResponse<EvolutionEntryResponse>),
        (status = 404, description = "Month not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn update_evolution_entry(
    Path(month): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateEvolutionRequest>,
) -> Result<Json<ApiResponse<EvolutionEntryResponse>>, StatusCode> {
    let mes: MonthKey = month.parse().map_err(|_| StatusCode::NOT_FOUND)?;

    let updated = state
        .store
        .update_evolution(mes, |entry| {
            if let Some(new_mes) = request.mes.as_deref() {
                entry.mes = MonthKey::parse_or_current(new_mes);
            }
            if let Some(incremento) = request.incremento {
                entry.incremento = incremento;
            }
        })
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    state.cache.invalidate_all();
    info!(
        "Evolution entry updated for {} (acumulado {})",
        updated.mes, updated.acumulado
    );

    let response = ApiResponse {
        data: EvolutionEntryResponse::from(updated),
        message: "Evolution entry updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete the evolution entry for a month and recompute the chain
#[utoipa::path(
    delete,
    path = "/api/v1/evolution/{month}",
    tag = "evolution",
    params(
        ("month" = String, Path, description = "Month key (YYYY-MM)"),
    ),
    responses(
        (status = 200, description = "Evolution entry deleted successfully", body = ApiResponse<EvolutionEntryResponse>),
        (status = 404, description = "Month not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_evolution_entry(
    Path(month): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<EvolutionEntryResponse>>, StatusCode> {
    let mes: MonthKey = month.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    let removed = state
        .store
        .delete_evolution(mes)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    state.cache.invalidate_all();
    info!("Evolution entry deleted for {}", mes);

    let response = ApiResponse {
        data: EvolutionEntryResponse::from(removed),
        message: "Evolution entry deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
