use std::collections::BTreeMap;

use common::{DashboardSummary, PoolSummary, PrepaidSummary};
use model::{MonthlyRecord, PrepaidEntry, PrepaidKind};
use rust_decimal::Decimal;

/// Groups prepaid entries by pool and nets each pool's position:
/// `restante = saldo - consumo - prefacturado`. Pools come out in name
/// order; the grand total sums the per-pool remainders.
pub fn prepaid_summary(entries: &[PrepaidEntry]) -> PrepaidSummary {
    let mut grouped: BTreeMap<&str, (Decimal, Decimal, Decimal)> = BTreeMap::new();
    for entry in entries {
        let slot = grouped.entry(entry.bolsa.as_str()).or_default();
        match entry.tipo {
            PrepaidKind::Saldo => slot.0 += entry.importe,
            PrepaidKind::Consumo => slot.1 += entry.importe,
            PrepaidKind::Prefacturado => slot.2 += entry.importe,
        }
    }

    let pools: Vec<PoolSummary> = grouped
        .into_iter()
        .map(|(bolsa, (saldo, consumo, prefacturado))| PoolSummary {
            bolsa: bolsa.to_string(),
            saldo,
            consumo,
            prefacturado,
            restante: saldo - consumo - prefacturado,
        })
        .collect();
    let total_general = pools.iter().map(|p| p.restante).sum();

    PrepaidSummary {
        pools,
        total_general,
    }
}

/// Headline dashboard figures over an already range-filtered record set.
/// Prepaid pools are global; the dashboard never filters them by month.
pub fn dashboard_summary(
    records: &[MonthlyRecord],
    prepaid: &[PrepaidEntry],
) -> DashboardSummary {
    let total_forecast: Decimal = records.iter().map(|r| r.forecast).sum();
    let total_facturado: Decimal = records.iter().map(|r| r.facturado).sum();
    let total_pendiente: Decimal = records
        .iter()
        .map(|r| r.pdt_incurrir + r.inc_pdte_factura)
        .sum();

    let wip = total_forecast - total_facturado;
    let prepaid_total = prepaid_summary(prepaid).total_general;
    let wip_total = wip + prepaid_total;

    DashboardSummary {
        total_forecast,
        total_facturado,
        total_pendiente,
        wip,
        prepaid_total,
        wip_total,
        wip_calculado: wip_total - total_pendiente,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mes: &str, forecast: i64, facturado: i64, pdt: i64, inc: i64) -> MonthlyRecord {
        MonthlyRecord {
            mes: mes.parse().unwrap(),
            forecast: Decimal::from(forecast),
            facturado: Decimal::from(facturado),
            pdt_incurrir: Decimal::from(pdt),
            inc_pdte_factura: Decimal::from(inc),
            ajuste_fc: Decimal::ZERO,
            new_forecast: Decimal::ZERO,
            real_mas_deuda_pend: Decimal::ZERO,
            comentarios: None,
        }
    }

    fn prepaid(bolsa: &str, importe: i64, tipo: PrepaidKind) -> PrepaidEntry {
        PrepaidEntry {
            id: 0,
            bolsa: bolsa.to_string(),
            concepto: None,
            mes: None,
            importe: Decimal::from(importe),
            tipo,
        }
    }

    #[test]
    fn pools_net_their_balances() {
        let entries = vec![
            prepaid("Samsung", 1000, PrepaidKind::Saldo),
            prepaid("Samsung", 300, PrepaidKind::Consumo),
            prepaid("Samsung", 100, PrepaidKind::Prefacturado),
            prepaid("New App", 500, PrepaidKind::Saldo),
        ];
        let summary = prepaid_summary(&entries);
        assert_eq!(summary.pools.len(), 2);
        // BTreeMap keeps pools in name order
        assert_eq!(summary.pools[0].bolsa, "New App");
        assert_eq!(summary.pools[1].restante, Decimal::from(600));
        assert_eq!(summary.total_general, Decimal::from(1100));
    }

    #[test]
    fn empty_prepaid_set_totals_zero() {
        let summary = prepaid_summary(&[]);
        assert!(summary.pools.is_empty());
        assert_eq!(summary.total_general, Decimal::ZERO);
    }

    #[test]
    fn dashboard_combines_wip_and_prepaid() {
        let records = vec![
            record("2024-01", 100, 60, 10, 5),
            record("2024-02", 200, 100, 20, 15),
        ];
        let prepaid = vec![
            prepaid("Samsung", 50, PrepaidKind::Saldo),
            prepaid("Samsung", 20, PrepaidKind::Consumo),
        ];
        let summary = dashboard_summary(&records, &prepaid);
        assert_eq!(summary.total_forecast, Decimal::from(300));
        assert_eq!(summary.total_facturado, Decimal::from(160));
        assert_eq!(summary.total_pendiente, Decimal::from(50));
        assert_eq!(summary.wip, Decimal::from(140));
        assert_eq!(summary.prepaid_total, Decimal::from(30));
        assert_eq!(summary.wip_total, Decimal::from(170));
        assert_eq!(summary.wip_calculado, Decimal::from(120));
    }

    #[test]
    fn no_records_degrade_to_zero_totals() {
        let summary = dashboard_summary(&[], &[]);
        assert_eq!(summary.wip, Decimal::ZERO);
        assert_eq!(summary.wip_calculado, Decimal::ZERO);
    }
}
