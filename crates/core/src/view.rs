//! View handlers for the dashboard.
//!
//! Each handler is a pure function of the dataset snapshot and the current
//! selection. An empty or incomplete selection yields an empty view.

use crate::aggregate::AggregatedRow;
use crate::dataset::Dataset;
use crate::percentage::SharePercentage;
use crate::segment::{segment_rows, SegmentError};
use serde::{Deserialize, Serialize};

/// State of the route and percentage dropdowns.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Selection {
    #[serde(default)]
    pub routes: Vec<String>,
    #[serde(default)]
    pub percentage: Option<SharePercentage>,
}

impl Selection {
    pub fn new(routes: Vec<String>, percentage: Option<SharePercentage>) -> Self {
        Self { routes, percentage }
    }

    fn has_routes(&self) -> bool {
        !self.routes.is_empty()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TableRow {
    pub checkbox_id: String,
    pub stop: String,
    pub cumulative_total: u64,
    pub share: f64,
    pub segment: usize,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub stop: String,
    pub boardings: u64,
}

impl MapPoint {
    pub fn hover_text(&self) -> String {
        format!("{}<br>Total ON: {}", self.stop, self.boardings)
    }
}

impl From<&AggregatedRow> for MapPoint {
    fn from(row: &AggregatedRow) -> Self {
        Self {
            lat: row.record.lat,
            lon: row.record.lon,
            stop: row.record.stop.to_owned(),
            boardings: row.record.boardings,
        }
    }
}

/// A named set of markers drawn as one map trace.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MarkerGroup {
    pub name: String,
    pub points: Vec<MapPoint>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct MapView {
    pub groups: Vec<MarkerGroup>,
    /// Mean coordinate of every plotted stop.
    pub center: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl MapView {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Stop table for the selected routes, segmented by the selected percentage.
pub fn table_rows(dataset: &Dataset, selection: &Selection) -> Result<TableView, SegmentError> {
    let Some(percentage) = selection.percentage else {
        return Ok(TableView::default());
    };
    if !selection.has_routes() {
        return Ok(TableView::default());
    }

    let rows = segment_rows(dataset.filter_routes(&selection.routes), percentage)?
        .into_iter()
        .map(|s| TableRow {
            checkbox_id: format!("stop-checkbox-{}", s.row.record.index),
            stop: s.row.record.stop.to_owned(),
            cumulative_total: s.row.cumulative_total,
            share: s.row.share,
            segment: s.segment,
        })
        .collect();

    Ok(TableView {
        rows,
        notice: percentage.notice(),
    })
}

/// One marker group per selected route.
pub fn route_map(dataset: &Dataset, selection: &Selection) -> MapView {
    if !selection.has_routes() {
        return MapView::default();
    }
    let filtered = dataset.filter_routes(&selection.routes);
    let Some(center) = mean_center(&filtered) else {
        return MapView::default();
    };

    let groups = selection
        .routes
        .iter()
        .map(|route| MarkerGroup {
            name: route.to_owned(),
            points: filtered
                .iter()
                .filter(|row| &row.record.route == route)
                .map(|row| MapPoint::from(*row))
                .collect(),
        })
        .collect();

    MapView {
        groups,
        center: Some(center),
        notice: None,
    }
}

/// One marker group per (route, segment) pair.
pub fn segment_map(dataset: &Dataset, selection: &Selection) -> Result<MapView, SegmentError> {
    let Some(percentage) = selection.percentage else {
        return Ok(MapView::default());
    };
    if !selection.has_routes() {
        return Ok(MapView::default());
    }
    let filtered = dataset.filter_routes(&selection.routes);
    let Some(center) = mean_center(&filtered) else {
        return Ok(MapView::default());
    };
    let segmented = segment_rows(filtered, percentage)?;

    let mut groups = vec![];
    for route in &selection.routes {
        let route_rows: Vec<_> = segmented
            .iter()
            .filter(|s| &s.row.record.route == route)
            .collect();
        let mut segments: Vec<usize> = vec![];
        for s in &route_rows {
            if !segments.contains(&s.segment) {
                segments.push(s.segment);
            }
        }
        for segment in segments {
            groups.push(MarkerGroup {
                name: format!("{route} - Segment {segment}"),
                points: route_rows
                    .iter()
                    .filter(|s| s.segment == segment)
                    .map(|s| MapPoint::from(s.row))
                    .collect(),
            });
        }
    }

    Ok(MapView {
        groups,
        center: Some(center),
        notice: percentage.notice(),
    })
}

fn mean_center(rows: &[&AggregatedRow]) -> Option<GeoPoint> {
    if rows.is_empty() {
        return None;
    }
    let n = rows.len() as f64;
    Some(GeoPoint {
        lat: rows.iter().map(|r| r.record.lat).sum::<f64>() / n,
        lon: rows.iter().map(|r| r.record.lon).sum::<f64>() / n,
    })
}
