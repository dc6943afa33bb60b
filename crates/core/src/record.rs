use serde::{Deserialize, Serialize};

/// Source column holding the route identifier.
pub const ROUTE_COLUMN: &str = "FINAL_ETC_ROUTE_NAME";
/// Source column holding the stop identifier.
pub const STOP_COLUMN: &str = "FINAL_ETC_STOP_NAME";
/// Source column holding the boarding count.
pub const BOARDINGS_COLUMN: &str = "TOTAL_ON";
pub const LAT_COLUMN: &str = "stop_lat";
pub const LON_COLUMN: &str = "stop_lon";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    ROUTE_COLUMN,
    STOP_COLUMN,
    BOARDINGS_COLUMN,
    LAT_COLUMN,
    LON_COLUMN,
];

/// One row of the ridership table.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RidershipRecord {
    /// Zero-based position of the row in the source file.
    pub index: usize,
    pub route: String,
    pub stop: String,
    pub boardings: u64,
    pub lat: f64,
    pub lon: f64,
}

impl RidershipRecord {
    pub fn new(
        index: usize,
        route: impl Into<String>,
        stop: impl Into<String>,
        boardings: u64,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self {
            index,
            route: route.into(),
            stop: stop.into(),
            boardings,
            lat,
            lon,
        }
    }
}
