use std::collections::BTreeMap;

use model::{EvolutionEntry, MonthKey};
use rust_decimal::Decimal;

/// Recomputes the accumulated column across the whole chain: entries are
/// sorted by month and each month's `acumulado` becomes the previous
/// calendar month's `acumulado` plus the month's own `incremento`. A gap in
/// the series restarts the accumulation at zero, matching the source data's
/// convention of only ever looking one month back.
///
/// The sheets this replaces refreshed only the row being edited, which let
/// stale totals survive out-of-order edits; rebuilding the chain keeps the
/// column consistent no matter the mutation order.
pub fn recompute_acumulado(entries: &mut [EvolutionEntry]) {
    entries.sort_by_key(|e| e.mes);
    let mut by_month: BTreeMap<MonthKey, Decimal> = BTreeMap::new();
    for entry in entries.iter_mut() {
        let previous = by_month
            .get(&entry.mes.previous())
            .copied()
            .unwrap_or(Decimal::ZERO);
        entry.acumulado = previous + entry.incremento;
        by_month.insert(entry.mes, entry.acumulado);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(mes: &str, incremento: i64, acumulado: i64) -> EvolutionEntry {
        EvolutionEntry {
            mes: mes.parse().unwrap(),
            incremento: Decimal::from(incremento),
            acumulado: Decimal::from(acumulado),
        }
    }

    fn acumulados(entries: &[EvolutionEntry]) -> Vec<Decimal> {
        entries.iter().map(|e| e.acumulado).collect()
    }

    fn decimals(values: &[i64]) -> Vec<Decimal> {
        values.iter().copied().map(Decimal::from).collect()
    }

    #[test]
    fn consecutive_months_accumulate() {
        let mut entries = vec![
            entry("2024-01", 10, 0),
            entry("2024-02", 5, 0),
            entry("2024-03", -3, 0),
        ];
        recompute_acumulado(&mut entries);
        assert_eq!(acumulados(&entries), decimals(&[10, 15, 12]));
    }

    #[test]
    fn a_gap_restarts_the_chain() {
        let mut entries = vec![entry("2024-01", 10, 0), entry("2024-04", 5, 0)];
        recompute_acumulado(&mut entries);
        assert_eq!(acumulados(&entries), decimals(&[10, 5]));
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut shuffled = vec![
            entry("2024-03", -3, 0),
            entry("2024-01", 10, 0),
            entry("2024-02", 5, 0),
        ];
        recompute_acumulado(&mut shuffled);
        assert_eq!(
            shuffled.iter().map(|e| e.mes.to_string()).collect::<Vec<_>>(),
            vec!["2024-01", "2024-02", "2024-03"]
        );
        assert_eq!(acumulados(&shuffled), decimals(&[10, 15, 12]));
    }

    #[test]
    fn stale_acumulado_values_are_overwritten() {
        let mut entries = vec![entry("2024-01", 10, 999), entry("2024-02", 1, -4)];
        recompute_acumulado(&mut entries);
        assert_eq!(acumulados(&entries), decimals(&[10, 11]));
    }

    #[test]
    fn crosses_year_boundaries() {
        let mut entries = vec![entry("2023-12", 7, 0), entry("2024-01", 3, 0)];
        recompute_acumulado(&mut entries);
        assert_eq!(acumulados(&entries), decimals(&[7, 10]));
    }
}
