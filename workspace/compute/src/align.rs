use std::collections::{HashMap, HashSet};

use model::{EvolutionEntry, MonthKey, MonthlyRecord};
use rust_decimal::Decimal;

use crate::error::{ComputeError, Result};

/// Anything carrying a month key that can be aligned onto a month axis.
pub trait MonthKeyed {
    fn month(&self) -> MonthKey;
}

impl MonthKeyed for MonthlyRecord {
    fn month(&self) -> MonthKey {
        self.mes
    }
}

impl MonthKeyed for EvolutionEntry {
    fn month(&self) -> MonthKey {
        self.mes
    }
}

/// One projected chart field: the output key carried by aligned records,
/// the label the chart legend shows, and how to pull the value out of a
/// source record.
pub struct MappedField<R> {
    pub key: &'static str,
    pub label: &'static str,
    pub extract: fn(&R) -> Decimal,
}

/// An ordered set of projected fields for one chart type.
///
/// Replaces the free-form key map of the original sheets: the field set of
/// each chart is known statically, so the mapping is validated once at
/// construction (non-empty, unique output keys) instead of trusted on every
/// lookup.
pub struct FieldMapping<R> {
    fields: Vec<MappedField<R>>,
}

impl<R> FieldMapping<R> {
    pub fn new(fields: Vec<MappedField<R>>) -> Result<Self> {
        if fields.is_empty() {
            return Err(ComputeError::EmptyMapping);
        }
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.key) {
                return Err(ComputeError::DuplicateKey(field.key.to_string()));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[MappedField<R>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of an output key within this mapping.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }
}

/// One output row of the aligner: values parallel to the mapping's fields,
/// `None` where the axis month had no source record.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRecord {
    values: Vec<Option<Decimal>>,
}

impl AlignedRecord {
    pub fn values(&self) -> &[Option<Decimal>] {
        &self.values
    }
}

/// Aligns `series` onto `axis`: exactly one output record per axis month,
/// in axis order, holding exactly the fields the mapping declares.
///
/// The lookup map is built in a single scan; when several records share a
/// month key the later one wins. Missing months degrade to `None` values
/// rather than failing.
pub fn align<R: MonthKeyed>(
    series: &[R],
    axis: &[MonthKey],
    mapping: &FieldMapping<R>,
) -> Vec<AlignedRecord> {
    let by_month: HashMap<MonthKey, &R> = series.iter().map(|r| (r.month(), r)).collect();
    axis.iter()
        .map(|month| {
            let row = by_month.get(month);
            AlignedRecord {
                values: mapping
                    .fields
                    .iter()
                    .map(|field| row.map(|r| (field.extract)(r)))
                    .collect(),
            }
        })
        .collect()
}
