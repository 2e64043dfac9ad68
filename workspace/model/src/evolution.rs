use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::month::MonthKey;

/// One month of the bucket evolution series.
///
/// `acumulado` is derived (previous month's accumulated value plus this
/// month's increment); callers should treat it as read-only and let the
/// compute layer rebuild the chain after mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionEntry {
    pub mes: MonthKey,
    #[serde(default)]
    pub incremento: Decimal,
    #[serde(default)]
    pub acumulado: Decimal,
}
