use crate::Result;
use ridership_core::SharePercentage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DASHBOARD_TITLE: &str = "Route Ridership Segments";

pub const TABLE_HEADERS: [&str; 5] = [
    "Select",
    "Stop",
    "Total Cumm",
    "% Riders",
    "Segment Cliente",
];

/// The initial dashboard layout, built once from the loaded routes.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DashboardLayout {
    pub title: String,
    pub route_options: Vec<DropdownOption>,
    pub percentage_options: Vec<DropdownOption>,
    pub table_headers: Vec<String>,
    /// Whether the page talks to the server. Exported pages are static.
    pub interactive: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

impl DashboardLayout {
    pub fn new(routes: &[String], interactive: bool) -> Self {
        Self {
            title: DASHBOARD_TITLE.to_owned(),
            route_options: routes
                .iter()
                .map(|route| DropdownOption {
                    label: route.to_owned(),
                    value: route.to_owned(),
                    selected: false,
                })
                .collect(),
            percentage_options: SharePercentage::OPTIONS
                .iter()
                .map(|pct| DropdownOption {
                    label: pct.to_string(),
                    value: pct.value().to_string(),
                    selected: *pct == SharePercentage::DEFAULT,
                })
                .collect(),
            table_headers: TABLE_HEADERS.iter().map(|h| h.to_string()).collect(),
            interactive,
        }
    }

    /// The same layout without the client script, for static export.
    pub fn to_static(&self) -> Self {
        Self {
            interactive: false,
            ..self.to_owned()
        }
    }
}

#[derive(Deserialize, Serialize)]
struct TemplateData {
    layout: DashboardLayout,
    date: String,
    version: String,
}

impl TemplateData {
    pub fn new(layout: &DashboardLayout) -> Self {
        Self {
            layout: layout.to_owned(),
            date: chrono::Local::now().to_rfc2822(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Renders the dashboard page for `layout`.
pub fn render_dashboard(layout: &DashboardLayout) -> Result<String> {
    let template = include_str!("template.html.handlebars");

    let mut data = HashMap::new();
    data.insert("data", TemplateData::new(layout));
    let html = handlebars::Handlebars::new().render_template(template, &data)?;
    Ok(html)
}

/// Writes the static (non-interactive) dashboard to `path`. Returns the path.
///
/// Only the initial layout is captured; selections made while the server was
/// running are not part of the export.
pub fn export_dashboard(layout: &DashboardLayout, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let html = render_dashboard(&layout.to_static())?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    info!("saved dashboard to {}", path.display());

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn routes() -> Vec<String> {
        vec!["10 Downtown".to_owned(), "<b>Night</b>".to_owned()]
    }

    #[test]
    fn layout_options() {
        let layout = DashboardLayout::new(&routes(), true);
        assert_eq!(layout.route_options.len(), 2);
        let labels: Vec<_> = layout
            .percentage_options
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, vec!["25%", "50%", "75%", "100%"]);
        let selected: Vec<_> = layout
            .percentage_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, vec!["100"]);
    }

    #[test]
    fn interactive_page_has_script_and_escaped_options() {
        let html = render_dashboard(&DashboardLayout::new(&routes(), true)).unwrap();
        assert!(html.contains("route-map-graph"));
        assert!(html.contains("segment-map-graph"));
        assert!(html.contains("table-body"));
        assert!(html.contains("/api/table"));
        assert!(html.contains("10 Downtown"));
        assert!(html.contains("&lt;b&gt;Night&lt;/b&gt;"));
        assert!(!html.contains("<b>Night</b>"));
        for header in TABLE_HEADERS {
            assert!(html.contains(header), "missing header {header}");
        }
    }

    #[test]
    fn exported_page_is_static() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out").join("dashboard.html");
        let layout = DashboardLayout::new(&routes(), true);

        let written = export_dashboard(&layout, &path)?;
        assert_eq!(written, path);

        let html = std::fs::read_to_string(&path)?;
        assert!(html.contains("route-dropdown"));
        assert!(html.contains("10 Downtown"));
        assert!(!html.contains("/api/table"));
        assert!(html.contains("static export"));
        Ok(())
    }

    #[test]
    fn export_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be overwritten by a file
        let err = export_dashboard(&DashboardLayout::new(&[], true), dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
