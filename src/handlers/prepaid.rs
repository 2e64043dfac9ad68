use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::PrepaidSummary;
use model::{PrepaidEntry, PrepaidKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState};

/// Request body for creating a prepaid entry
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatePrepaidRequest {
    /// Pool name the entry belongs to
    pub bolsa: String,
    /// Free-text description
    pub concepto: Option<String>,
    /// Optional month label; prepaid pools are not aligned to the axis
    pub mes: Option<String>,
    #[serde(default)]
    pub importe: Decimal,
    /// Entry kind: "saldo", "consumo" or "prefacturado"
    pub tipo: String,
}

/// Request body for updating a prepaid entry
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdatePrepaidRequest {
    pub bolsa: Option<String>,
    pub concepto: Option<String>,
    pub mes: Option<String>,
    pub importe: Option<Decimal>,
    /// Entry kind: "saldo", "consumo" or "prefacturado"
    pub tipo: Option<String>,
}

/// Prepaid entry response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PrepaidEntryResponse {
    pub id: i32,
    pub bolsa: String,
    pub concepto: Option<String>,
    pub mes: Option<String>,
    pub importe: Decimal,
    pub tipo: String,
}

impl From<PrepaidEntry> for PrepaidEntryResponse {
    fn from(entry: PrepaidEntry) -> Self {
        Self {
            id: entry.id,
            bolsa: entry.bolsa,
            concepto: entry.concepto,
            mes: entry.mes,
            importe: entry.importe,
            tipo: entry.tipo.to_string(),
        }
    }
}

/// Create a new prepaid entry
#[utoipa::path(
    post,
    path = "/api/v1/prepaid",
    tag = "prepaid",
    request_body = CreatePrepaidRequest,
    responses(
        (status = 201, description = "Prepaid entry created", body = ApiResponse<PrepaidEntryResponse>),
        (status = 400, description = "Unknown entry kind", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn create_prepaid_entry(
    State(state): State<AppState>,
    Json(request): Json<CreatePrepaidRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PrepaidEntryResponse>>), StatusCode> {
    let tipo: PrepaidKind = request.tipo.parse().map_err(|_| {
        warn!("Rejected prepaid entry with unknown kind '{}'", request.tipo);
        StatusCode::BAD_REQUEST
    })?;

    let entry = PrepaidEntry {
        id: 0,
        bolsa: request.bolsa,
        concepto: request.concepto,
        mes: request.mes,
        importe: request.importe,
        tipo,
    };
    let inserted = state.store.insert_prepaid(entry).await;
    state.cache.invalidate_all();
    info!(
        "Prepaid entry {} created in pool '{}'",
        inserted.id, inserted.bolsa
    );

    let response = ApiResponse {
        data: PrepaidEntryResponse::from(inserted),
        message: "Prepaid entry created".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all prepaid entries, ordered by pool then id
#[utoipa::path(
    get,
    path = "/api/v1/prepaid",
    tag = "prepaid",
    responses(
        (status = 200, description = "Prepaid entries retrieved successfully", body = ApiResponse<Vec<PrepaidEntryResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_prepaid_entries(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PrepaidEntryResponse>>>, StatusCode> {
    let entries = state.store.prepaid_entries().await;
    debug!("Retrieved {} prepaid entries", entries.len());

    let response = ApiResponse {
        data: entries
            .into_iter()
            .map(PrepaidEntryResponse::from)
            .collect(),
        message: "Prepaid entries retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get the per-pool prepaid summary
#[utoipa::path(
    get,
    path = "/api/v1/prepaid/summary",
    tag = "prepaid",
    responses(
        (status = 200, description = "Prepaid summary computed successfully", body = ApiResponse<PrepaidSummary>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_prepaid_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PrepaidSummary>>, StatusCode> {
    let entries = state.store.prepaid_entries().await;
    let summary = compute::prepaid_summary(&entries);
    debug!(
        "Computed prepaid summary over {} pools",
        summary.pools.len()
    );

    let response = ApiResponse {
        data: summary,
        message: "Prepaid summary computed successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get a single prepaid entry by id
#[utoipa::path(
    get,
    path = "/api/v1/prepaid/{id}",
    tag = "prepaid",
    params(
        ("id" = i32, Path, description = "Prepaid entry id"),
    ),
    responses(
        (status = 200, description = "Prepaid entry retrieved successfully", body = ApiResponse<PrepaidEntryResponse>),
        (status = 404, description = "Entry not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_prepaid_entry(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PrepaidEntryResponse>>, StatusCode> {
    let entry = state
        .store
        .prepaid_entry(id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    let response = ApiResponse {
        data: PrepaidEntryResponse::from(entry),
        message: "Prepaid entry retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update a prepaid entry
#[utoipa::path(
    put,
    path = "/api/v1/prepaid/{id}",
    tag = "prepaid",
    params(
        ("id" = i32, Path, description = "Prepaid entry id"),
    ),
    request_body = UpdatePrepaidRequest,
    responses(
        (status = 200, description = "Prepaid entry updated successfully", body = ApiResponse<PrepaidEntryResponse>),
        (status = 400, description = "Unknown entry kind", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Entry not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn update_prepaid_entry(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdatePrepaidRequest>,
) -> Result<Json<ApiResponse<PrepaidEntryResponse>>, StatusCode> {
    let tipo = match request.tipo.as_deref() {
        Some(raw) => Some(raw.parse::<PrepaidKind>().map_err(|_| {
            warn!("Rejected prepaid update with unknown kind '{}'", raw);
            StatusCode::BAD_REQUEST
        })?),
        None => None,
    };

    let updated = state
        .store
        .update_prepaid(id, |entry| {
            if let Some(bolsa) = request.bolsa.clone() {
                entry.bolsa = bolsa;
            }
            if let Some(concepto) = request.concepto.clone() {
                entry.concepto = Some(concepto);
            }
            if let Some(mes) = request.mes.clone() {
                entry.mes = Some(mes);
            }
            if let Some(importe) = request.importe {
                entry.importe = importe;
            }
            if let Some(tipo) = tipo {
                entry.tipo = tipo;
            }
        })
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    state.cache.invalidate_all();
    info!("Prepaid entry {} updated", id);

    let response = ApiResponse {
        data: PrepaidEntryResponse::from(updated),
        message: "Prepaid entry updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete a prepaid entry
#[utoipa::path(
    delete,
    path = "/api/v1/prepaid/{id}",
    tag = "prepaid",
    params(
        ("id" = i32, Path, description = "Prepaid entry id"),
    ),
    responses(
        (status = 200, description = "Prepaid entry deleted successfully", body = ApiResponse<PrepaidEntryResponse>),
        (status = 404, description = "Entry not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_prepaid_entry(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PrepaidEntryResponse>>, StatusCode> {
    let removed = state
        .store
        .delete_prepaid(id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    state.cache.invalidate_all();
    info!("Prepaid entry {} deleted", id);

    let response = ApiResponse {
        data: PrepaidEntryResponse::from(removed),
        message: "Prepaid entry deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
