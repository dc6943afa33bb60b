use crate::aggregate::{aggregate, AggregatedRow};
use crate::loader::load_records;
use crate::record::RidershipRecord;
use crate::Result;
use std::path::Path;

/// Immutable snapshot of the aggregated ridership table.
///
/// Built once at startup and shared read-only by every view handler.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    rows: Vec<AggregatedRow>,
    routes: Vec<String>,
}

impl Dataset {
    pub fn from_records(records: Vec<RidershipRecord>) -> Self {
        let rows = aggregate(records);
        let mut routes: Vec<String> = rows.iter().map(|r| r.record.route.clone()).collect();
        // rows are already sorted by route
        routes.dedup();
        Self { rows, routes }
    }

    /// Loads and aggregates the CSV file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_records(load_records(path)?))
    }

    pub fn rows(&self) -> &[AggregatedRow] {
        &self.rows
    }

    /// Distinct route names in ascending order.
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose route is one of `routes`, in aggregated order.
    pub fn filter_routes(&self, routes: &[String]) -> Vec<&AggregatedRow> {
        self.rows
            .iter()
            .filter(|row| routes.contains(&row.record.route))
            .collect()
    }
}
