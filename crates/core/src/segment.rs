//! Quantile segmentation of cumulative shares.
//!
//! Edges are taken at probabilities `0, 1/N, ..., 1` of the share column
//! using linear interpolation between order statistics. A share `x` falls in
//! segment `i` (1-based) when `edge[i-1] < x <= edge[i]`; the first segment
//! also takes `edge[0]`. Inputs that cannot be split into `N` distinct
//! segments produce a [`SegmentError`] instead of a relabelled result.

use crate::aggregate::AggregatedRow;
use crate::percentage::SharePercentage;
use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SegmentError {
    #[error("cannot split {rows} stop(s) into {buckets} segments; select more routes or a larger percentage")]
    TooFewRows { rows: usize, buckets: usize },

    #[error("share values only support {distinct} distinct boundaries, {} needed for {buckets} segments; select a larger percentage", buckets + 1)]
    DuplicateEdges { buckets: usize, distinct: usize },

    #[error("share value at position {0} is not a finite number")]
    NonFiniteShare(usize),
}

/// A filtered row with its segment label.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SegmentedRow<'a> {
    pub row: &'a AggregatedRow,
    /// 1-based segment number.
    pub segment: usize,
}

/// Quantile edges of `sorted` (ascending) for `buckets` equal-probability bins.
pub fn quantile_edges(sorted: &[f64], buckets: usize) -> Vec<f64> {
    if sorted.is_empty() || buckets == 0 {
        return vec![];
    }
    let last = (sorted.len() - 1) as f64;
    (0..=buckets)
        .map(|k| {
            let pos = if k == buckets {
                last
            } else {
                k as f64 / buckets as f64 * last
            };
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        })
        .collect()
}

/// Labels every share with its 1-based quantile segment.
pub fn segment_labels(shares: &[f64], buckets: usize) -> Result<Vec<usize>, SegmentError> {
    if let Some(pos) = shares.iter().position(|s| !s.is_finite()) {
        return Err(SegmentError::NonFiniteShare(pos));
    }
    if buckets <= 1 {
        return Ok(vec![1; shares.len()]);
    }
    if shares.is_empty() {
        return Ok(vec![]);
    }
    if shares.len() < buckets {
        return Err(SegmentError::TooFewRows {
            rows: shares.len(),
            buckets,
        });
    }

    let mut sorted = shares.to_vec();
    sorted.sort_by(f64::total_cmp);
    let edges = quantile_edges(&sorted, buckets);
    if edges.windows(2).any(|w| w[0] >= w[1]) {
        let mut distinct = edges.clone();
        distinct.dedup();
        return Err(SegmentError::DuplicateEdges {
            buckets,
            distinct: distinct.len(),
        });
    }

    Ok(shares
        .iter()
        .map(|share| (edges[1..].partition_point(|edge| edge < share) + 1).min(buckets))
        .collect())
}

/// Assigns segments to `rows` for the bucket count implied by `percentage`.
pub fn segment_rows(
    rows: Vec<&AggregatedRow>,
    percentage: SharePercentage,
) -> Result<Vec<SegmentedRow<'_>>, SegmentError> {
    let shares: Vec<f64> = rows.iter().map(|r| r.share).collect();
    let labels = segment_labels(&shares, percentage.bucket_count())?;
    Ok(rows
        .into_iter()
        .zip(labels)
        .map(|(row, segment)| SegmentedRow { row, segment })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RidershipRecord;

    fn pct(value: u32) -> SharePercentage {
        SharePercentage::new(value).unwrap()
    }

    #[test]
    fn edges_interpolate_linearly() {
        let edges = quantile_edges(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);

        let edges = quantile_edges(&[0.0, 10.0], 4);
        assert_eq!(edges, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn four_segments_of_eight_values() {
        let shares = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];
        let labels = segment_labels(&shares, 4).unwrap();
        assert_eq!(labels, vec![1, 1, 2, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn labels_follow_input_order() {
        let shares = [0.8, 0.1, 0.5, 0.3];
        let labels = segment_labels(&shares, 2).unwrap();
        assert_eq!(labels, vec![2, 1, 2, 1]);
    }

    #[test]
    fn first_segment_includes_minimum() {
        let labels = segment_labels(&[0.25, 0.5, 0.75, 1.0], 2).unwrap();
        assert_eq!(labels[0], 1);
        assert_eq!(labels[3], 2);
    }

    #[test]
    fn every_label_in_range() {
        let shares: Vec<f64> = (1..=37).map(|i| (i as f64 / 37.0).sqrt()).collect();
        for buckets in 1..=8 {
            let labels = segment_labels(&shares, buckets).unwrap();
            assert_eq!(labels.len(), shares.len());
            assert!(labels.iter().all(|l| (1..=buckets).contains(l)));
            assert!(labels.contains(&1));
            assert!(labels.contains(&buckets));
        }
    }

    #[test]
    fn single_bucket_always_labels_one() {
        assert_eq!(segment_labels(&[1.0], 1).unwrap(), vec![1]);
        assert_eq!(segment_labels(&[1.0, 1.0, 1.0], 1).unwrap(), vec![1, 1, 1]);
        assert!(segment_labels(&[], 1).unwrap().is_empty());
    }

    #[test]
    fn too_few_rows() {
        let err = segment_labels(&[0.5, 1.0], 4).unwrap_err();
        assert_eq!(err, SegmentError::TooFewRows { rows: 2, buckets: 4 });
    }

    #[test]
    fn collapsed_edges() {
        let err = segment_labels(&[1.0, 1.0, 1.0, 1.0, 0.5], 4).unwrap_err();
        assert!(matches!(
            err,
            SegmentError::DuplicateEdges { buckets: 4, .. }
        ));
    }

    #[test]
    fn non_finite_share() {
        let err = segment_labels(&[0.5, f64::NAN], 2).unwrap_err();
        assert_eq!(err, SegmentError::NonFiniteShare(1));
    }

    #[test]
    fn rows_keep_order_with_labels() {
        let rows: Vec<AggregatedRow> = [0.5, 0.75, 1.0, 0.25]
            .iter()
            .enumerate()
            .map(|(i, share)| AggregatedRow {
                record: RidershipRecord::new(i, "A", format!("s{i}"), 1, 0.0, 0.0),
                cumulative_total: i as u64,
                share: *share,
            })
            .collect();

        let segmented = segment_rows(rows.iter().collect(), pct(50)).unwrap();
        let labels: Vec<_> = segmented.iter().map(|s| s.segment).collect();
        assert_eq!(labels, vec![1, 2, 2, 1]);
        assert_eq!(segmented[3].row.record.stop, "s3");

        let segmented = segment_rows(rows.iter().collect(), pct(100)).unwrap();
        assert!(segmented.iter().all(|s| s.segment == 1));
    }
}
