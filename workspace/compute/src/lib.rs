pub mod align;
pub mod axis;
pub mod chart;
pub mod error;
pub mod evolution;
pub mod render;
pub mod summary;

pub use align::{AlignedRecord, FieldMapping, MappedField, MonthKeyed, align};
pub use axis::{filter_range, unify_months};
pub use chart::{
    dashboard_charts, evolution_chart, evolution_mapping, forecast_chart, forecast_mapping,
};
pub use error::{ComputeError, Result};
pub use evolution::recompute_acumulado;
pub use render::{ChartRenderer, DashboardSurfaces, RenderStatus, render_dashboard};
pub use summary::{dashboard_summary, prepaid_summary};
