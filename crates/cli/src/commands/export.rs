use ridership_report::{export_dashboard, DashboardLayout};
use std::path::Path;
use tracing::error;

/// Writes the static dashboard. Failures are logged and otherwise ignored.
pub fn export(layout: &DashboardLayout, path: &Path) {
    if let Err(e) = export_dashboard(layout, path) {
        error!("error saving dashboard as HTML to {}: {e}", path.display());
    }
}
