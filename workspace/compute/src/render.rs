use common::ChartData;
use model::{EvolutionEntry, MonthlyRecord};
use tracing::{debug, warn};

use crate::chart::dashboard_charts;
use crate::error::Result;

/// Outcome of a single render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// The chart was drawn on the requested surface.
    Drawn,
    /// The backend has no surface with that identifier. Callers skip the
    /// chart instead of failing the whole dashboard.
    SurfaceNotFound,
}

/// Narrow seam to the charting backend.
///
/// Backends needing global setup (plugin registration and the like) do it
/// in [`ChartRenderer::initialize`], which the caller invokes exactly once
/// before the first render; nothing is registered implicitly at load time.
pub trait ChartRenderer {
    /// One-time backend setup. Must be called before the first
    /// [`ChartRenderer::render_line_chart`].
    fn initialize(&mut self) -> Result<()>;

    /// Draws `chart` as a line chart on the surface named by `surface`.
    /// Surface identifiers are opaque to the core.
    fn render_line_chart(&mut self, surface: &str, chart: &ChartData) -> Result<RenderStatus>;
}

/// Display surface identifiers for the two dashboard charts.
#[derive(Debug, Clone)]
pub struct DashboardSurfaces {
    pub monthly: String,
    pub evolution: String,
}

impl Default for DashboardSurfaces {
    fn default() -> Self {
        Self {
            monthly: "serieChart".to_string(),
            evolution: "evoChart".to_string(),
        }
    }
}

/// Renders both dashboard charts over the unified month axis.
///
/// A surface the backend cannot locate is logged and skipped, so a partial
/// dashboard still shows whatever can be drawn. The renderer must already
/// be initialized.
pub fn render_dashboard(
    renderer: &mut dyn ChartRenderer,
    surfaces: &DashboardSurfaces,
    records: &[MonthlyRecord],
    entries: &[EvolutionEntry],
) -> Result<()> {
    let (monthly, evolution) = dashboard_charts(records, entries);
    for (surface, chart) in [
        (surfaces.monthly.as_str(), &monthly),
        (surfaces.evolution.as_str(), &evolution),
    ] {
        match renderer.render_line_chart(surface, chart)? {
            RenderStatus::Drawn => debug!(surface, "chart rendered"),
            RenderStatus::SurfaceNotFound => {
                warn!(surface, "display surface not found, skipping chart");
            }
        }
    }
    Ok(())
}
