use crate::handlers::{
    charts::{get_evolution_chart, get_monthly_chart},
    dashboard::get_dashboard,
    evolution::{
        create_evolution_entry, delete_evolution_entry, get_evolution_entries,
        get_evolution_entry, update_evolution_entry,
    },
    health::health_check,
    prepaid::{
        create_prepaid_entry, delete_prepaid_entry, get_prepaid_entries, get_prepaid_entry,
        get_prepaid_summary, update_prepaid_entry,
    },
    records::{create_record, delete_record, get_record, get_records, update_record},
    series::{get_evolution_series, get_monthly_series},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::LazyLock;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// The metric layer registers a process-global recorder, so the pair is
/// created once and cloned into every router built in this process.
static PROMETHEUS_PAIR: LazyLock<(PrometheusMetricLayer<'static>, PrometheusHandle)> =
    LazyLock::new(PrometheusMetricLayer::pair);

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let (prometheus_layer, metric_handle) = PROMETHEUS_PAIR.clone();

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Monthly record CRUD routes
        .route("/api/v1/records", post(create_record))
        .route("/api/v1/records", get(get_records))
        .route("/api/v1/records/:month", get(get_record))
        .route("/api/v1/records/:month", put(update_record))
        .route("/api/v1/records/:month", delete(delete_record))
        // Evolution CRUD routes
        .route("/api/v1/evolution", post(create_evolution_entry))
        .route("/api/v1/evolution", get(get_evolution_entries))
        .route("/api/v1/evolution/:month", get(get_evolution_entry))
        .route("/api/v1/evolution/:month", put(update_evolution_entry))
        .route("/api/v1/evolution/:month", delete(delete_evolution_entry))
        // Prepaid pool routes (summary before the id match)
        .route("/api/v1/prepaid", post(create_prepaid_entry))
        .route("/api/v1/prepaid", get(get_prepaid_entries))
        .route("/api/v1/prepaid/summary", get(get_prepaid_summary))
        .route("/api/v1/prepaid/:id", get(get_prepaid_entry))
        .route("/api/v1/prepaid/:id", put(update_prepaid_entry))
        .route("/api/v1/prepaid/:id", delete(delete_prepaid_entry))
        // Raw series routes
        .route("/api/v1/series/monthly", get(get_monthly_series))
        .route("/api/v1/series/evolution", get(get_evolution_series))
        // Chart data routes
        .route("/api/v1/charts/monthly", get(get_monthly_chart))
        .route("/api/v1/charts/evolution", get(get_evolution_chart))
        // Dashboard summary
        .route("/api/v1/dashboard", get(get_dashboard))
        // Prometheus metrics
        .route("/metrics", get(|| async move { metric_handle.render() }))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .layer(prometheus_layer)
        .with_state(state)
}
