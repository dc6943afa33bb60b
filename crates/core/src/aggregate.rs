use crate::record::RidershipRecord;
use serde::{Deserialize, Serialize};

/// A record augmented with its route's running boarding total and share.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AggregatedRow {
    #[serde(flatten)]
    pub record: RidershipRecord,
    /// Boardings of this stop plus every busier stop on the same route.
    pub cumulative_total: u64,
    /// `cumulative_total` over the route's total boardings, in (0, 1].
    pub share: f64,
}

/// Groups records by route, orders each route by descending boardings and
/// computes the running total and share within the route.
///
/// Output is sorted by (route ascending, boardings descending). Ties keep
/// their source order. A route with zero total boardings gets a share of 1.0
/// on every row. Sums saturate at `u64::MAX`; the loader rejects files whose
/// route totals would get there.
pub fn aggregate(mut records: Vec<RidershipRecord>) -> Vec<AggregatedRow> {
    records.sort_by(|a, b| {
        a.route
            .cmp(&b.route)
            .then_with(|| b.boardings.cmp(&a.boardings))
    });

    let mut rows = Vec::with_capacity(records.len());
    for route in records.chunk_by(|a, b| a.route == b.route) {
        let total = route
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.boardings));
        let mut running = 0u64;
        for record in route {
            running = running.saturating_add(record.boardings);
            let share = if total == 0 {
                1.0
            } else {
                running as f64 / total as f64
            };
            rows.push(AggregatedRow {
                record: record.to_owned(),
                cumulative_total: running,
                share,
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, route: &str, boardings: u64) -> RidershipRecord {
        RidershipRecord::new(index, route, format!("stop-{index}"), boardings, 0.0, 0.0)
    }

    #[test]
    fn cumulative_totals_and_shares_per_route() {
        let rows = aggregate(vec![
            record(0, "B", 3),
            record(1, "A", 5),
            record(2, "A", 10),
            record(3, "A", 5),
            record(4, "B", 1),
        ]);

        let route_a: Vec<_> = rows.iter().filter(|r| r.record.route == "A").collect();
        assert_eq!(
            route_a.iter().map(|r| r.cumulative_total).collect::<Vec<_>>(),
            vec![10, 15, 20]
        );
        assert_eq!(
            route_a.iter().map(|r| r.share).collect::<Vec<_>>(),
            vec![0.5, 0.75, 1.0]
        );

        let route_b: Vec<_> = rows.iter().filter(|r| r.record.route == "B").collect();
        assert_eq!(
            route_b.iter().map(|r| r.cumulative_total).collect::<Vec<_>>(),
            vec![3, 4]
        );
        assert_eq!(route_b.last().unwrap().share, 1.0);
    }

    #[test]
    fn sorted_by_route_then_descending_boardings() {
        let rows = aggregate(vec![
            record(0, "B", 3),
            record(1, "A", 5),
            record(2, "A", 10),
            record(3, "B", 8),
        ]);
        let order: Vec<_> = rows
            .iter()
            .map(|r| (r.record.route.as_str(), r.record.boardings))
            .collect();
        assert_eq!(order, vec![("A", 10), ("A", 5), ("B", 8), ("B", 3)]);
    }

    #[test]
    fn ties_keep_source_order() {
        let rows = aggregate(vec![record(0, "A", 5), record(1, "A", 10), record(2, "A", 5)]);
        let indices: Vec<_> = rows.iter().map(|r| r.record.index).collect();
        assert_eq!(indices, vec![1, 0, 2]);
    }

    #[test]
    fn single_route_totals_are_prefix_sums() {
        let counts = [7u64, 42, 3, 19, 19, 1, 0, 25];
        let rows = aggregate(
            counts
                .iter()
                .enumerate()
                .map(|(i, c)| record(i, "only", *c))
                .collect(),
        );

        let mut sorted = counts.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));
        let prefix: Vec<u64> = sorted
            .iter()
            .scan(0, |acc, c| {
                *acc += c;
                Some(*acc)
            })
            .collect();

        assert_eq!(
            rows.iter().map(|r| r.cumulative_total).collect::<Vec<_>>(),
            prefix
        );
    }

    #[test]
    fn shares_strictly_increase_for_positive_counts() {
        let rows = aggregate(vec![
            record(0, "X", 4),
            record(1, "X", 9),
            record(2, "X", 1),
            record(3, "Y", 2),
            record(4, "Y", 2),
        ]);
        for route in rows.chunk_by(|a, b| a.record.route == b.record.route) {
            assert!(route.windows(2).all(|w| w[0].share < w[1].share));
            assert_eq!(route.last().unwrap().share, 1.0);
        }
    }

    #[test]
    fn zero_total_route_has_full_share() {
        let rows = aggregate(vec![record(0, "Z", 0), record(1, "Z", 0)]);
        assert!(rows.iter().all(|r| r.share == 1.0));
        assert!(rows.iter().all(|r| r.cumulative_total == 0));
    }

    #[test]
    fn empty_input() {
        assert!(aggregate(vec![]).is_empty());
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let rows = aggregate(vec![record(0, "A", u64::MAX), record(1, "A", 1)]);
        assert_eq!(rows[1].cumulative_total, u64::MAX);
        assert_eq!(rows[1].share, 1.0);
    }
}
