use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Headline figures of the dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub total_forecast: Decimal,
    pub total_facturado: Decimal,
    /// Pending work: `Σ (pdt_incurrir + inc_pdte_factura)`
    pub total_pendiente: Decimal,
    /// `total_forecast - total_facturado`
    pub wip: Decimal,
    /// Grand total of the prepaid pools' remainders
    pub prepaid_total: Decimal,
    /// `wip + prepaid_total`
    pub wip_total: Decimal,
    /// `wip_total - total_pendiente`
    pub wip_calculado: Decimal,
}

/// Net position of one prepaid pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PoolSummary {
    pub bolsa: String,
    pub saldo: Decimal,
    pub consumo: Decimal,
    pub prefacturado: Decimal,
    /// `saldo - consumo - prefacturado`
    pub restante: Decimal,
}

/// Per-pool breakdown plus the grand total across pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrepaidSummary {
    pub pools: Vec<PoolSummary>,
    pub total_general: Decimal,
}
