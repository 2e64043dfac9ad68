use std::collections::BTreeSet;

use model::MonthKey;

use crate::align::MonthKeyed;

/// Sorted union of the month keys appearing in either series.
///
/// Both sides may be empty; the result contains each month exactly once, in
/// ascending order, and serves as the common x-axis of the dashboard
/// charts.
pub fn unify_months<A: MonthKeyed, B: MonthKeyed>(a: &[A], b: &[B]) -> Vec<MonthKey> {
    let mut months = BTreeSet::new();
    months.extend(a.iter().map(MonthKeyed::month));
    months.extend(b.iter().map(MonthKeyed::month));
    months.into_iter().collect()
}

/// Keeps the records whose month falls within the optional inclusive
/// bounds. `None` on either side leaves that side unbounded.
pub fn filter_range<R: MonthKeyed + Clone>(
    series: &[R],
    from: Option<MonthKey>,
    to: Option<MonthKey>,
) -> Vec<R> {
    series
        .iter()
        .filter(|r| {
            let month = r.month();
            from.map_or(true, |f| month >= f) && to.map_or(true, |t| month <= t)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::EvolutionEntry;
    use rust_decimal::Decimal;

    fn entry(mes: &str) -> EvolutionEntry {
        EvolutionEntry {
            mes: mes.parse().unwrap(),
            incremento: Decimal::ZERO,
            acumulado: Decimal::ZERO,
        }
    }

    fn keys(months: &[MonthKey]) -> Vec<String> {
        months.iter().map(MonthKey::to_string).collect()
    }

    #[test]
    fn union_is_sorted_and_deduplicated() {
        let a = vec![entry("2024-03"), entry("2024-01"), entry("2024-03")];
        let b = vec![entry("2024-02"), entry("2024-01")];
        assert_eq!(
            keys(&unify_months(&a, &b)),
            vec!["2024-01", "2024-02", "2024-03"]
        );
    }

    #[test]
    fn empty_inputs_yield_empty_axis() {
        let empty: Vec<EvolutionEntry> = vec![];
        assert!(unify_months(&empty, &empty).is_empty());
    }

    #[test]
    fn one_sided_union_is_that_side_sorted() {
        let a = vec![entry("2025-02"), entry("2024-12")];
        let empty: Vec<EvolutionEntry> = vec![];
        assert_eq!(keys(&unify_months(&a, &empty)), vec!["2024-12", "2025-02"]);
    }

    #[test]
    fn range_filter_is_inclusive_on_both_ends() {
        let series = vec![entry("2024-01"), entry("2024-02"), entry("2024-03")];
        let from = "2024-02".parse().ok();
        let to = "2024-03".parse().ok();
        let filtered = filter_range(&series, from, to);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].mes.to_string(), "2024-02");
    }

    #[test]
    fn absent_bounds_keep_everything() {
        let series = vec![entry("2024-01"), entry("2024-02")];
        assert_eq!(filter_range(&series, None, None).len(), 2);
    }
}
