use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One chart line: an output key, the label the legend shows, and one value
/// per axis month. A month with no source record contributes `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dataset {
    pub key: String,
    pub label: String,
    pub data: Vec<Option<Decimal>>,
}

/// Chart-ready payload handed to the rendering collaborator: axis labels
/// plus one dataset per projected field. Every dataset's `data` has exactly
/// `labels.len()` elements, positionally matched to the labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Looks a dataset up by its output key.
    pub fn dataset(&self, key: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.key == key)
    }
}
