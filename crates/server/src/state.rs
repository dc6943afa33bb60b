use crate::Result;
use ridership_core::{config::MapSettings, Dataset};
use ridership_report::{render_dashboard, DashboardLayout};
use tracing::debug;

/// Read-only state shared by every request.
#[derive(Debug)]
pub struct AppState {
    dataset: Dataset,
    map: MapSettings,
    layout: DashboardLayout,
    index_html: String,
}

impl AppState {
    /// Renders the interactive dashboard page for `dataset` once up front.
    pub fn new(dataset: Dataset, map: MapSettings) -> Result<Self> {
        let layout = DashboardLayout::new(dataset.routes(), true);
        let index_html = render_dashboard(&layout)?;
        debug!(
            routes = dataset.routes().len(),
            rows = dataset.len(),
            "rendered dashboard page"
        );
        Ok(Self {
            dataset,
            map,
            layout,
            index_html,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn map_settings(&self) -> &MapSettings {
        &self.map
    }

    /// The initial layout the page was rendered from.
    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    pub fn index_html(&self) -> &str {
        &self.index_html
    }
}
