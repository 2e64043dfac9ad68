//! Common transport-layer types shared between the backend and any client.
//! These structs mirror the backend handlers' response payloads so a
//! frontend can deserialize API responses without duplicating shapes.

mod chart;
mod format;
mod summary;

pub use chart::{ChartData, Dataset};
pub use format::format_euro;
pub use summary::{DashboardSummary, PoolSummary, PrepaidSummary};
