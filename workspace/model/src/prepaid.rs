use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Movement type of a prepaid pool entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrepaidKind {
    /// Money put into the pool
    Saldo,
    /// Consumption against the pool
    Consumo,
    /// Amount already pre-invoiced
    Prefacturado,
}

/// Error returned for an unknown prepaid entry type.
#[derive(Debug, Error)]
#[error("unknown prepaid entry type: {0}")]
pub struct ParsePrepaidKindError(String);

impl fmt::Display for PrepaidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrepaidKind::Saldo => "saldo",
            PrepaidKind::Consumo => "consumo",
            PrepaidKind::Prefacturado => "prefacturado",
        };
        f.write_str(name)
    }
}

impl FromStr for PrepaidKind {
    type Err = ParsePrepaidKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "saldo" => Ok(PrepaidKind::Saldo),
            "consumo" => Ok(PrepaidKind::Consumo),
            "prefacturado" => Ok(PrepaidKind::Prefacturado),
            other => Err(ParsePrepaidKindError(other.to_string())),
        }
    }
}

/// A single movement in a prepaid pool ("bolsa"), e.g. a balance top-up or
/// a monthly consumption. Unlike the monthly series, pools can hold any
/// number of entries per month, so `mes` is free text here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaidEntry {
    #[serde(default)]
    pub id: i32,
    pub bolsa: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concepto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mes: Option<String>,
    #[serde(default)]
    pub importe: Decimal,
    pub tipo: PrepaidKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [PrepaidKind::Saldo, PrepaidKind::Consumo, PrepaidKind::Prefacturado] {
            assert_eq!(kind.to_string().parse::<PrepaidKind>().unwrap(), kind);
        }
        assert!("other".parse::<PrepaidKind>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let entry: PrepaidEntry = serde_json::from_str(
            r#"{"bolsa": "Samsung", "importe": "100", "tipo": "saldo"}"#,
        )
        .unwrap();
        assert_eq!(entry.tipo, PrepaidKind::Saldo);
        assert_eq!(entry.id, 0);
        assert_eq!(serde_json::to_value(&entry).unwrap()["tipo"], "saldo");
    }
}
