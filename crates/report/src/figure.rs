//! Plotly.js figure model for the route and segment maps.

use ridership_core::config::MapSettings;
use ridership_core::view::{GeoPoint, MapView, MarkerGroup};
use serde::{Deserialize, Serialize};

/// A `{data, layout}` figure as consumed by `Plotly.react`.
/// An empty figure serializes to `{}`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Figure {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<MapTrace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<MapLayout>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MapTrace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub mode: String,
    pub marker: Marker,
    pub name: String,
    pub hoverinfo: String,
    pub text: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Marker {
    pub size: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MapLayout {
    pub mapbox: Mapbox,
    pub margin: Margin,
    pub showlegend: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mapbox {
    pub style: String,
    pub center: GeoPoint,
    pub zoom: f64,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl MapTrace {
    fn from_group(group: &MarkerGroup, settings: &MapSettings) -> Self {
        Self {
            trace_type: "scattermapbox".to_owned(),
            lat: group.points.iter().map(|p| p.lat).collect(),
            lon: group.points.iter().map(|p| p.lon).collect(),
            mode: "markers".to_owned(),
            marker: Marker {
                size: settings.marker_size,
            },
            name: group.name.to_owned(),
            hoverinfo: "text".to_owned(),
            text: group.points.iter().map(|p| p.hover_text()).collect(),
        }
    }
}

impl Figure {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.layout.is_none()
    }

    /// Builds a scatter-mapbox figure with one trace per marker group,
    /// centered on the view's mean coordinate.
    pub fn from_map_view(view: &MapView, settings: &MapSettings) -> Self {
        let Some(center) = view.center else {
            return Self::empty();
        };
        if view.is_empty() {
            return Self::empty();
        }

        Self {
            data: view
                .groups
                .iter()
                .map(|group| MapTrace::from_group(group, settings))
                .collect(),
            layout: Some(MapLayout {
                mapbox: Mapbox {
                    style: settings.style.to_owned(),
                    center,
                    zoom: settings.zoom,
                },
                margin: Margin::default(),
                showlegend: true,
            }),
        }
    }
}
