use std::sync::LazyLock;

use common::{ChartData, Dataset};
use model::{EvolutionEntry, MonthKey, MonthlyRecord};

use crate::align::{FieldMapping, MappedField, MonthKeyed, align};
use crate::axis::unify_months;

/// Field set of the forecast-vs-actuals chart, in display order. The labels
/// are the legend texts of the dashboard. Built once; the key set is fixed,
/// so validation cannot fail after it passes here.
static FORECAST_FIELDS: LazyLock<FieldMapping<MonthlyRecord>> = LazyLock::new(|| {
    FieldMapping::new(vec![
        MappedField {
            key: "forecast",
            label: "Forecast (1)",
            extract: |r: &MonthlyRecord| r.forecast,
        },
        MappedField {
            key: "facturado",
            label: "Facturado (2)",
            extract: |r| r.facturado,
        },
        MappedField {
            key: "pdt_incurrir",
            label: "Pdt incurrir (3)",
            extract: |r| r.pdt_incurrir,
        },
        MappedField {
            key: "inc_pdte_factura",
            label: "Inc. pdte factura (4)",
            extract: |r| r.inc_pdte_factura,
        },
        MappedField {
            key: "restante",
            label: "Restante ((2+3+4)-1)",
            extract: |r| r.restante(),
        },
        MappedField {
            key: "new_forecast",
            label: "New Forecast",
            extract: |r| r.new_forecast,
        },
        MappedField {
            key: "real_mas_deuda_pend",
            label: "real + deuda pdte",
            extract: |r| r.real_mas_deuda_pend,
        },
    ])
    .expect("forecast field keys are unique and non-empty")
});

/// Field set of the bucket evolution chart.
static EVOLUTION_FIELDS: LazyLock<FieldMapping<EvolutionEntry>> = LazyLock::new(|| {
    FieldMapping::new(vec![
        MappedField {
            key: "incremento",
            label: "Incremento",
            extract: |e: &EvolutionEntry| e.incremento,
        },
        MappedField {
            key: "acumulado",
            label: "Acumulado",
            extract: |e| e.acumulado,
        },
    ])
    .expect("evolution field keys are unique and non-empty")
});

pub fn forecast_mapping() -> &'static FieldMapping<MonthlyRecord> {
    &FORECAST_FIELDS
}

pub fn evolution_mapping() -> &'static FieldMapping<EvolutionEntry> {
    &EVOLUTION_FIELDS
}

/// Builds a chart payload by aligning `series` onto `axis` and transposing
/// the aligned records into one dataset per mapped field.
pub fn build_chart<R: MonthKeyed>(
    series: &[R],
    axis: &[MonthKey],
    mapping: &FieldMapping<R>,
) -> ChartData {
    let aligned = align(series, axis, mapping);
    let datasets = mapping
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| Dataset {
            key: field.key.to_string(),
            label: field.label.to_string(),
            data: aligned.iter().map(|record| record.values()[i]).collect(),
        })
        .collect();
    ChartData {
        labels: axis.iter().map(MonthKey::to_string).collect(),
        datasets,
    }
}

/// Forecast-vs-actuals chart over the given axis.
pub fn forecast_chart(records: &[MonthlyRecord], axis: &[MonthKey]) -> ChartData {
    build_chart(records, axis, forecast_mapping())
}

/// Bucket evolution chart over the given axis.
pub fn evolution_chart(entries: &[EvolutionEntry], axis: &[MonthKey]) -> ChartData {
    build_chart(entries, axis, evolution_mapping())
}

/// Both dashboard charts over the unified month axis, the way the dashboard
/// view draws them side by side.
pub fn dashboard_charts(
    records: &[MonthlyRecord],
    entries: &[EvolutionEntry],
) -> (ChartData, ChartData) {
    let axis = unify_months(records, entries);
    (
        forecast_chart(records, &axis),
        evolution_chart(entries, &axis),
    )
}
