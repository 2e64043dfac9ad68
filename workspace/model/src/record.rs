use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::month::MonthKey;

/// One month of the forecast-vs-actuals series.
///
/// The field names follow the reporting sheet this data is produced from;
/// `forecast`, `facturado`, `pdt_incurrir` and `inc_pdte_factura` are the
/// numbered columns (1)..(4) referenced by [`MonthlyRecord::restante`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub mes: MonthKey,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comentarios: Option<String>,
}

impl MonthlyRecord {
    /// Remaining amount for the month: `(2 + 3 + 4) - 1`.
    pub fn restante(&self) -> Decimal {
        (self.facturado + self.pdt_incurrir + self.inc_pdte_factura) - self.forecast
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(forecast: i64, facturado: i64, pdt: i64, inc: i64) -> MonthlyRecord {
        MonthlyRecord {
            mes: "2024-01".parse().unwrap(),
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

    #[test]
    fn restante_is_actuals_minus_forecast() {
        assert_eq!(record(100, 40, 30, 20).restante(), Decimal::from(-10));
        assert_eq!(record(50, 60, 0, 0).restante(), Decimal::from(10));
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let rec: MonthlyRecord = serde_json::from_str(r#"{"mes": "2024-05"}"#).unwrap();
        assert_eq!(rec.forecast, Decimal::ZERO);
        assert_eq!(rec.restante(), Decimal::ZERO);
        assert!(rec.comentarios.is_none());
    }
}
