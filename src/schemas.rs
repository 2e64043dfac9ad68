use common::{ChartData, DashboardSummary};
use model::MonthKey;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::store::Store;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// In-memory dataset behind all endpoints
    pub store: Store,
    /// Cache for computed chart and summary payloads
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Chart(ChartData),
    Summary(DashboardSummary),
}

/// Month-range filter shared by the series, chart and dashboard endpoints.
/// Both bounds are inclusive `YYYY-MM` month keys; an unparseable bound is
/// ignored rather than rejected, so a partial dashboard still renders.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RangeQuery {
    /// Inclusive lower bound (e.g. "2025-04")
    pub from: Option<String>,
    /// Inclusive upper bound (e.g. "2025-12")
    pub to: Option<String>,
}

impl RangeQuery {
    pub fn bounds(&self) -> (Option<MonthKey>, Option<MonthKey>) {
        let parse = |value: &Option<String>| value.as_deref().and_then(|v| v.parse().ok());
        (parse(&self.from), parse(&self.to))
    }
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of monthly records in the store
    pub records: usize,
    /// Number of evolution entries in the store
    pub evolution_entries: usize,
    /// Number of prepaid entries in the store
    pub prepaid_entries: usize,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::records::create_record,
        crate::handlers::records::get_records,
        crate::handlers::records::get_record,
        crate::handlers::records::update_record,
        crate::handlers::records::delete_record,
        crate::handlers::evolution::create_evolution_entry,
        crate::handlers::evolution::get_evolution_entries,
        crate::handlers::evolution::get_evolution_entry,
        crate::handlers::evolution::update_evolution_entry,
        crate::handlers::evolution::delete_evolution_entry,
        crate::handlers::prepaid::create_prepaid_entry,
        crate::handlers::prepaid::get_prepaid_entries,
        crate::handlers::prepaid::get_prepaid_summary,
        crate::handlers::prepaid::get_prepaid_entry,
        crate::handlers::prepaid::update_prepaid_entry,
        crate::handlers::prepaid::delete_prepaid_entry,
        crate::handlers::series::get_monthly_series,
        crate::handlers::series::get_evolution_series,
        crate::handlers::charts::get_monthly_chart,
        crate::handlers::charts::get_evolution_chart,
        crate::handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            RangeQuery,
            ApiResponse<common::ChartData>,
            ApiResponse<common::DashboardSummary>,
            ApiResponse<common::PrepaidSummary>,
            common::ChartData,
            common::Dataset,
            common::DashboardSummary,
            common::PrepaidSummary,
            common::PoolSummary,
            crate::handlers::records::CreateMonthlyRecordRequest,
            crate::handlers::records::UpdateMonthlyRecordRequest,
            crate::handlers::records::MonthlyRecordResponse,
            crate::handlers::evolution::CreateEvolutionRequest,
            crate::handlers::evolution::UpdateEvolutionRequest,
            crate::handlers::evolution::EvolutionEntryResponse,
            crate::handlers::prepaid::CreatePrepaidRequest,
            crate::handlers::prepaid::UpdatePrepaidRequest,
            crate::handlers::prepaid::PrepaidEntryResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "records", description = "Monthly forecast-vs-actuals record endpoints"),
        (name = "evolution", description = "Bucket evolution endpoints"),
        (name = "prepaid", description = "Prepaid pool endpoints"),
        (name = "series", description = "Raw series endpoints"),
        (name = "charts", description = "Aligned chart data endpoints"),
        (name = "dashboard", description = "Dashboard summary endpoints"),
    ),
    info(
        title = "EconDash API",
        description = "Project economic-control dashboard - monthly forecast vs. actuals tracking and chart data service",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
