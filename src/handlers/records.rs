use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use model::{MonthKey, MonthlyRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, RangeQuery};

/// Request body for creating (or replacing) a monthly record
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateMonthlyRecordRequest {
    /// Month in any accepted format, normalized to YYYY-MM; defaults to the
    /// current month when absent or unparseable
    pub mes: Option<String>,
    #[serde(default)]
    pub forecast: Decimal,
    #[serde(default)]
    pub facturado: Decimal,
    #[serde(default)]
    pub pdt_incurrir: Decimal,
    #[serde(default)]
    pub inc_pdte_factura: Decimal,
    #[serde(default)]
    pub ajuste_fc: Decimal,
    #[serde(default)]
    pub new_forecast: Decimal,
    #[serde(default)]
    pub real_mas_deuda_pend: Decimal,
    /// Free-text comment for the month
    pub comentarios: Option<String>,
}

/// Request body for updating a monthly record
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateMonthlyRecordRequest {
    /// New month for the record (moves it on the axis)
    pub mes: Option<String>,
    pub forecast: Option<Decimal>,
    pub facturado: Option<Decimal>,
    pub pdt_incurrir: Option<Decimal>,
    pub inc_pdte_factura: Option<Decimal>,
    pub ajuste_fc: Option<Decimal>,
    pub new_forecast: Option<Decimal>,
    pub real_mas_deuda_pend: Option<Decimal>,
    pub comentarios: Option<String>,
}

/// Monthly record response model, including the derived remaining amount
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlyRecordResponse {
    /// Month key (YYYY-MM)
    pub mes: String,
    pub forecast: Decimal,
    pub facturado: Decimal,
    pub pdt_incurrir: Decimal,
    pub inc_pdte_factura: Decimal,
    pub ajuste_fc: Decimal,
    /// Derived: `(facturado + pdt_incurrir + inc_pdte_factura) - forecast`
    pub restante: Decimal,
    pub new_forecast: Decimal,
    pub real_mas_deuda_pend: Decimal,
    pub comentarios: Option<String>,
}

impl From<MonthlyRecord> for MonthlyRecordResponse {
    fn from(record: MonthlyRecord) -> Self {
        Self {
            mes: record.mes.to_string(),
            restante: record.restante(),
            forecast: record.forecast,
            facturado: record.facturado,
            pdt_incurrir: record.pdt_incurrir,
            inc_pdte_factura: record.inc_pdte_factura,
            ajuste_fc: record.ajuste_fc,
            new_forecast: record.new_forecast,
            real_mas_deuda_pend: record.real_mas_deuda_pend,
            comentarios: record.comentarios,
        }
    }
}

impl CreateMonthlyRecordRequest {
    fn into_record(self) -> MonthlyRecord {
        MonthlyRecord {
            mes: MonthKey::parse_or_current(self.mes.as_deref().unwrap_or_default()),
            forecast: self.forecast,
            facturado: self.facturado,
            pdt_incurrir: self.pdt_incurrir,
            inc_pdte_factura: self.inc_pdte_factura,
            ajuste_fc: self.ajuste_fc,
            new_forecast: self.new_forecast,
            real_mas_deuda_pend: self.real_mas_deuda_pend,
            comentarios: self.comentarios,
        }
    }
}

/// Create or replace the record for a month
#[utoipa::path(
    post,
    path = "/api/v1/records",
    tag = "records",
    request_body = CreateMonthlyRecordRequest,
    responses(
        (status = 201, description = "Monthly record saved", body = ApiResponse<MonthlyRecordResponse>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn create_record(
    State(state): State<AppState>,
    Json(request): Json<CreateMonthlyRecordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MonthlyRecordResponse>>), StatusCode> {
    let record = request.into_record();
    debug!("Saving monthly record for {}", record.mes);

    let replaced = state.store.upsert_record(record.clone()).await;
    state.cache.invalidate_all();
    if replaced {
        warn!("Replaced existing record for month {}", record.mes);
    }
    info!("Monthly record saved for {}", record.mes);

    let response = ApiResponse {
        data: MonthlyRecordResponse::from(record),
        message: "Monthly record saved".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all monthly records, optionally filtered to a month range
#[utoipa::path(
    get,
    path = "/api/v1/records",
    tag = "records",
    responses(
        (status = 200, description = "Monthly records retrieved successfully", body = ApiResponse<Vec<MonthlyRecordResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_records(
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MonthlyRecordResponse>>>, StatusCode> {
    trace!("Entering get_records function");
    let (from, to) = query.bounds();
    let records = compute::filter_range(&state.store.monthly_records().await, from, to);
    debug!("Retrieved {} monthly records", records.len());

    let response = ApiResponse {
        data: records.into_iter().map(MonthlyRecordResponse::from).collect(),
        message: "Monthly records retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get the record for a single month
#[utoipa::path(
    get,
    path = "/api/v1/records/{month}",
    tag = "records",
    params(
        ("month" = String, Path, description = "Month key (YYYY-MM)"),
    ),
    responses(
        (status = 200, description = "Monthly record retrieved successfully", body = ApiResponse<MonthlyRecordResponse>),
        (status = 404, description = "Month not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_record(
    Path(month): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MonthlyRecordResponse>>, StatusCode> {
    let mes: MonthKey = month.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    let record = state.store.record(mes).await.ok_or(StatusCode::NOT_FOUND)?;

    let response = ApiResponse {
        data: MonthlyRecordResponse::from(record),
        message: "Monthly record retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update the record for a month
#[utoipa::path(
    put,
    path = "/api/v1/records/{month}",
    tag = "records",
    params(
        ("month" = String, Path, description = "Month key (YYYY-MM)"),
    ),
    request_body = UpdateMonthlyRecordRequest,
    responses(
        (status = 200, description = "Monthly record updated successfully", body = ApiResponse<MonthlyRecordResponse>),
        (status = 404, description = "Month not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn update_record(
    Path(month): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateMonthlyRecordRequest>,
) -> Result<Json<ApiResponse<MonthlyRecordResponse>>, StatusCode> {
    let mes: MonthKey = month.parse().map_err(|_| StatusCode::NOT_FOUND)?;

    let updated = state
        .store
        .update_record(mes, |record| {
            if let Some(new_mes) = request.mes.as_deref() {
                record.mes = MonthKey::parse_or_current(new_mes);
            }
            if let Some(forecast) = request.forecast {
                record.forecast = forecast;
            }
            if let Some(facturado) = request.facturado {
                record.facturado = facturado;
            }
            if let Some(pdt_incurrir) = request.pdt_incurrir {
                record.pdt_incurrir = pdt_incurrir;
            }
            if let Some(inc_pdte_factura) = request.inc_pdte_factura {
                record.inc_pdte_factura = inc_pdte_factura;
            }
            if let Some(ajuste_fc) = request.ajuste_fc {
                record.ajuste_fc = ajuste_fc;
            }
            if let Some(new_forecast) = request.new_forecast {
                record.new_forecast = new_forecast;
            }
            if let Some(real_mas_deuda_pend) = request.real_mas_deuda_pend {
                record.real_mas_deuda_pend = real_mas_deuda_pend;
            }
            if let Some(comentarios) = request.comentarios.clone() {
                record.comentarios = Some(comentarios);
            }
        })
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    state.cache.invalidate_all();
    info!("Monthly record updated for {}", updated.mes);

    let response = ApiResponse {
        data: MonthlyRecordResponse::from(updated),
        message: "Monthly record updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete the record for a month
#[utoipa::path(
    delete,
    path = "/api/v1/records/{month}",
    tag = "records",
    params(
        ("month" = String, Path, description = "Month key (YYYY-MM)"),
    ),
    responses(
        (status = 200, description = "Monthly record deleted successfully", body = ApiResponse<MonthlyRecordResponse>),
        (status = 404, description = "Month not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_record(
    Path(month): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MonthlyRecordResponse>>, StatusCode> {
    let mes: MonthKey = month.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    let removed = state
        .store
        .delete_record(mes)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    state.cache.invalidate_all();
    info!("Monthly record deleted for {}", mes);

    let response = ApiResponse {
        data: MonthlyRecordResponse::from(removed),
        message: "Monthly record deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
