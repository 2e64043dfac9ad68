use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use model::{EvolutionEntry, MonthKey, MonthlyRecord, PrepaidEntry};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// On-disk snapshot layout accepted by `--data-file`. Every section is
/// optional; an empty object is a valid, empty dataset.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub records: Vec<MonthlyRecord>,
    #[serde(default)]
    pub evolution: Vec<EvolutionEntry>,
    #[serde(default)]
    pub prepaid: Vec<PrepaidEntry>,
}

#[derive(Debug, Default)]
struct StoreInner {
    records: BTreeMap<MonthKey, MonthlyRecord>,
    evolution: BTreeMap<MonthKey, EvolutionEntry>,
    prepaid: BTreeMap<i32, PrepaidEntry>,
    next_prepaid_id: i32,
}

impl StoreInner {
    /// Rebuilds the accumulated chain of the evolution series. Keys stay in
    /// sync with each entry's month.
    fn rechain_evolution(&mut self) {
        let mut entries: Vec<EvolutionEntry> = self.evolution.values().cloned().collect();
        compute::recompute_acumulado(&mut entries);
        self.evolution = entries.into_iter().map(|e| (e.mes, e)).collect();
    }
}

/// In-memory dataset behind the API. Months are unique within each monthly
/// series; loading or inserting an existing month replaces the previous
/// record (last write wins), mirroring the upsert semantics of the source
/// sheets.
#[derive(Clone, Debug, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreInner>>,
}

impl Store {
    /// Builds a store seeded from a JSON snapshot file.
    pub fn from_data_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading data file {}", path.display()))?;
        let data: DataFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing data file {}", path.display()))?;
        Ok(Self::from_data(data))
    }

    pub fn from_data(data: DataFile) -> Self {
        let mut inner = StoreInner::default();
        for record in data.records {
            inner.records.insert(record.mes, record);
        }
        for entry in data.evolution {
            inner.evolution.insert(entry.mes, entry);
        }
        inner.rechain_evolution();
        let mut next_id = 1;
        for mut entry in data.prepaid {
            if entry.id <= 0 {
                entry.id = next_id;
            }
            next_id = next_id.max(entry.id + 1);
            inner.prepaid.insert(entry.id, entry);
        }
        inner.next_prepaid_id = next_id;
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Element counts: (monthly records, evolution entries, prepaid entries).
    pub async fn counts(&self) -> (usize, usize, usize) {
        let inner = self.inner.read().await;
        (
            inner.records.len(),
            inner.evolution.len(),
            inner.prepaid.len(),
        )
    }

    // ===================== Monthly records =====================

    /// All monthly records in ascending month order.
    pub async fn monthly_records(&self) -> Vec<MonthlyRecord> {
        self.inner.read().await.records.values().cloned().collect()
    }

    pub async fn record(&self, mes: MonthKey) -> Option<MonthlyRecord> {
        self.inner.read().await.records.get(&mes).cloned()
    }

    /// Inserts or replaces the record for its month. Returns true when a
    /// previous record was replaced.
    pub async fn upsert_record(&self, record: MonthlyRecord) -> bool {
        let mut inner = self.inner.write().await;
        inner.records.insert(record.mes, record).is_some()
    }

    /// Applies `apply` to the record of `mes` under the write lock; the
    /// closure may change the month, in which case the record moves to the
    /// new key. Returns the updated record, or None when the month is
    /// unknown.
    pub async fn update_record<F>(&self, mes: MonthKey, apply: F) -> Option<MonthlyRecord>
    where
        F: FnOnce(&mut MonthlyRecord),
    {
        let mut inner = self.inner.write().await;
        let mut record = inner.records.remove(&mes)?;
        apply(&mut record);
        let updated = record.clone();
        inner.records.insert(record.mes, record);
        Some(updated)
    }

    pub async fn delete_record(&self, mes: MonthKey) -> Option<MonthlyRecord> {
        self.inner.write().await.records.remove(&mes)
    }

    // ===================== Evolution entries =====================

    /// All evolution entries in ascending month order.
    pub async fn evolution_entries(&self) -> Vec<EvolutionEntry> {
        self.inner.read().await.evolution.values().cloned().collect()
    }

    pub async fn evolution_entry(&self, mes: MonthKey) -> Option<EvolutionEntry> {
        self.inner.read().await.evolution.get(&mes).cloned()
    }

    /// Inserts or replaces the entry for `mes` and rebuilds the accumulated
    /// chain. Returns the entry with its recomputed `acumulado`.
    pub async fn upsert_evolution(
        &self,
        mes: MonthKey,
        incremento: Decimal,
    ) -> Option<EvolutionEntry> {
        let mut inner = self.inner.write().await;
        inner.evolution.insert(
            mes,
            EvolutionEntry {
                mes,
                incremento,
                acumulado: Decimal::ZERO,
            },
        );
        inner.rechain_evolution();
        inner.evolution.get(&mes).cloned()
    }

    /// Applies `apply` to the entry of `mes`, then rebuilds the chain.
    pub async fn update_evolution<F>(&self, mes: MonthKey, apply: F) -> Option<EvolutionEntry>
    where
        F: FnOnce(&mut EvolutionEntry),
    {
        let mut inner = self.inner.write().await;
        let mut entry = inner.evolution.remove(&mes)?;
        apply(&mut entry);
        let key = entry.mes;
        inner.evolution.insert(key, entry);
        inner.rechain_evolution();
        inner.evolution.get(&key).cloned()
    }

    pub async fn delete_evolution(&self, mes: MonthKey) -> Option<EvolutionEntry> {
        let mut inner = self.inner.write().await;
        let removed = inner.evolution.remove(&mes)?;
        inner.rechain_evolution();
        Some(removed)
    }

    // ===================== Prepaid entries =====================

    /// All prepaid entries, ordered by pool then id.
    pub async fn prepaid_entries(&self) -> Vec<PrepaidEntry> {
        let inner = self.inner.read().await;
        let mut entries: Vec<PrepaidEntry> = inner.prepaid.values().cloned().collect();
        entries.sort_by(|a, b| a.bolsa.cmp(&b.bolsa).then(a.id.cmp(&b.id)));
        entries
    }

    pub async fn prepaid_entry(&self, id: i32) -> Option<PrepaidEntry> {
        self.inner.read().await.prepaid.get(&id).cloned()
    }

    /// Inserts a new prepaid entry, assigning the next free id.
    pub async fn insert_prepaid(&self, mut entry: PrepaidEntry) -> PrepaidEntry {
        let mut inner = self.inner.write().await;
        entry.id = inner.next_prepaid_id.max(1);
        inner.next_prepaid_id = entry.id + 1;
        inner.prepaid.insert(entry.id, entry.clone());
        entry
    }

    pub async fn update_prepaid<F>(&self, id: i32, apply: F) -> Option<PrepaidEntry>
    where
        F: FnOnce(&mut PrepaidEntry),
    {
        let mut inner = self.inner.write().await;
        let entry = inner.prepaid.get_mut(&id)?;
        apply(entry);
        entry.id = id;
        Some(entry.clone())
    }

    pub async fn delete_prepaid(&self, id: i32) -> Option<PrepaidEntry> {
        self.inner.write().await.prepaid.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::PrepaidKind;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn data_file_sections_are_optional() {
        let data: DataFile = serde_json::from_str("{}").unwrap();
        assert!(data.records.is_empty());
        assert!(data.evolution.is_empty());
        assert!(data.prepaid.is_empty());
    }

    #[tokio::test]
    async fn loading_recomputes_the_evolution_chain() {
        let data: DataFile = serde_json::from_str(
            r#"{
                "evolution": [
                    {"mes": "2024-02", "incremento": "5", "acumulado": "999"},
                    {"mes": "2024-01", "incremento": "10"}
                ]
            }"#,
        )
        .unwrap();
        let store = Store::from_data(data);
        let entries = store.evolution_entries().await;
        assert_eq!(entries[0].acumulado, Decimal::from(10));
        assert_eq!(entries[1].acumulado, Decimal::from(15));
    }

    #[tokio::test]
    async fn duplicate_months_in_a_data_file_keep_the_last_record() {
        let data: DataFile = serde_json::from_str(
            r#"{
                "records": [
                    {"mes": "2024-01", "forecast": "1"},
                    {"mes": "2024-01", "forecast": "2"}
                ]
            }"#,
        )
        .unwrap();
        let store = Store::from_data(data);
        let records = store.monthly_records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].forecast, Decimal::from(2));
    }

    #[tokio::test]
    async fn prepaid_ids_are_assigned_and_monotonic() {
        let store = Store::from_data(DataFile::default());
        let entry = PrepaidEntry {
            id: 0,
            bolsa: "Samsung".to_string(),
            concepto: None,
            mes: None,
            importe: Decimal::from(100),
            tipo: PrepaidKind::Saldo,
        };
        let first = store.insert_prepaid(entry.clone()).await;
        let second = store.insert_prepaid(entry).await;
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn updating_a_record_can_move_its_month() {
        let store = Store::default();
        store
            .upsert_record(MonthlyRecord {
                mes: month("2024-01"),
                forecast: Decimal::from(10),
                facturado: Decimal::ZERO,
                pdt_incurrir: Decimal::ZERO,
                inc_pdte_factura: Decimal::ZERO,
                ajuste_fc: Decimal::ZERO,
                new_forecast: Decimal::ZERO,
                real_mas_deuda_pend: Decimal::ZERO,
                comentarios: None,
            })
            .await;
        let updated = store
            .update_record(month("2024-01"), |r| r.mes = month("2024-02"))
            .await
            .unwrap();
        assert_eq!(updated.mes, month("2024-02"));
        assert!(store.record(month("2024-01")).await.is_none());
        assert!(store.record(month("2024-02")).await.is_some());
    }
}
