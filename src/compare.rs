//! Side-by-side runs of every replacement policy over one input.
//!
//! Each run gets its own frame table; nothing is shared between policies.

use crate::error::{SimulationError, SimulationResult};
use crate::paging::{simulate_replacement, PageId, Policy};
use log::debug;
use serde::{Deserialize, Serialize};

/// Aggregate counters of one policy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySummary {
    pub policy: Policy,
    pub faults: usize,
    pub hits: usize,
    pub hit_ratio: f64,
}

/// Run FIFO, LRU and Optimal over the same requests and frame count.
pub fn compare_policies(
    requests: &[PageId],
    frame_count: usize,
) -> SimulationResult<Vec<PolicySummary>> {
    Policy::ALL
        .iter()
        .map(|&policy| {
            let outcome = simulate_replacement(policy, requests, frame_count)?;
            Ok(PolicySummary {
                policy,
                faults: outcome.total_faults,
                hits: outcome.total_hits,
                hit_ratio: outcome.hit_ratio(),
            })
        })
        .collect()
}

/// Fault count of `policy` for every frame count in `1..=max_frames`.
pub fn fault_curve(
    policy: Policy,
    requests: &[PageId],
    max_frames: usize,
) -> SimulationResult<Vec<usize>> {
    if max_frames < 1 {
        return Err(SimulationError::non_positive("max_frames", max_frames));
    }
    (1..=max_frames)
        .map(|frames| simulate_replacement(policy, requests, frames).map(|o| o.total_faults))
        .collect()
}

/// A frame count at which adding one more frame increased the fault count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeladyAnomaly {
    pub frames: usize,
    pub faults: usize,
    pub faults_with_one_more: usize,
}

/// Scan `1..=max_frames` for Bélády's anomaly under `policy`.
///
/// LRU and Optimal are stack algorithms and never report one; FIFO can.
pub fn belady_anomalies(
    policy: Policy,
    requests: &[PageId],
    max_frames: usize,
) -> SimulationResult<Vec<BeladyAnomaly>> {
    let curve = fault_curve(policy, requests, max_frames)?;
    let anomalies: Vec<BeladyAnomaly> = curve
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[1] > pair[0])
        .map(|(idx, pair)| BeladyAnomaly {
            frames: idx + 1,
            faults: pair[0],
            faults_with_one_more: pair[1],
        })
        .collect();
    debug!(
        "{}: {} anomalies up to {} frames",
        policy,
        anomalies.len(),
        max_frames
    );
    Ok(anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(ids: &[u64]) -> Vec<PageId> {
        ids.iter().copied().map(PageId).collect()
    }

    const BELADY: [u64; 12] = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

    #[test]
    fn test_compare_policies() {
        let requests = pages(&[7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3]);
        let summaries = compare_policies(&requests, 3).unwrap();

        let faults: Vec<(Policy, usize)> = summaries.iter().map(|s| (s.policy, s.faults)).collect();
        assert_eq!(
            faults,
            vec![(Policy::Fifo, 10), (Policy::Lru, 9), (Policy::Optimal, 7)]
        );
        for summary in &summaries {
            assert_eq!(summary.faults + summary.hits, requests.len());
        }
    }

    #[test]
    fn test_compare_rejects_zero_frames() {
        assert!(compare_policies(&pages(&[1]), 0).is_err());
    }

    #[test]
    fn test_fault_curve() {
        let curve = fault_curve(Policy::Fifo, &pages(&BELADY), 4).unwrap();
        assert_eq!(curve, vec![12, 12, 9, 10]);
    }

    #[test]
    fn test_fifo_belady_anomaly() {
        let anomalies = belady_anomalies(Policy::Fifo, &pages(&BELADY), 4).unwrap();
        assert_eq!(
            anomalies,
            vec![BeladyAnomaly {
                frames: 3,
                faults: 9,
                faults_with_one_more: 10,
            }]
        );
    }

    #[test]
    fn test_stack_algorithms_have_no_anomaly() {
        for policy in [Policy::Lru, Policy::Optimal] {
            let anomalies = belady_anomalies(policy, &pages(&BELADY), 6).unwrap();
            assert!(anomalies.is_empty(), "{}", policy);
        }
    }
}
