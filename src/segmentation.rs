//! Contiguous-memory segmentation allocator simulation.
//!
//! Memory starts as one free segment. Allocations carve a block out of a free
//! segment chosen by the active [`FitStrategy`]; deallocations free every
//! block the process owns and then merge adjacent free segments. Requests
//! that cannot be satisfied are recorded as failed steps and the run moves
//! on with the table unchanged.

pub mod request;
pub mod segment;
pub mod segment_table;
pub mod step;

pub use request::SegmentRequest;
pub use segment::{Owner, ProcessId, Segment};
pub use segment_table::SegmentTable;
pub use step::AllocationStepRecord;

use crate::error::{SimulationError, SimulationResult};
use crate::trace::TraceRecorder;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule for choosing the free segment that satisfies an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum FitStrategy {
    /// First free segment large enough, in address order
    FirstFit,
    /// Free segment leaving the smallest leftover
    BestFit,
    /// Free segment leaving the largest leftover
    WorstFit,
}

impl fmt::Display for FitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitStrategy::FirstFit => write!(f, "First Fit"),
            FitStrategy::BestFit => write!(f, "Best Fit"),
            FitStrategy::WorstFit => write!(f, "Worst Fit"),
        }
    }
}

/// Result of one segmentation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationOutcome {
    pub strategy: FitStrategy,
    pub total_memory_size: usize,
    pub steps: Vec<AllocationStepRecord>,
}

impl SegmentationOutcome {
    pub fn failed_steps(&self) -> impl Iterator<Item = &AllocationStepRecord> {
        self.steps.iter().filter(|step| !step.success)
    }

    pub fn final_segments(&self) -> Option<&[Segment]> {
        self.steps.last().map(|step| step.segments.as_slice())
    }
}

/// Apply `requests` in order to a fresh table of `total_memory_size` units.
pub fn simulate_segmentation(
    requests: &[SegmentRequest],
    total_memory_size: usize,
    strategy: FitStrategy,
) -> SimulationResult<SegmentationOutcome> {
    if total_memory_size < 1 {
        return Err(SimulationError::non_positive(
            "total_memory_size",
            total_memory_size,
        ));
    }

    debug!(
        "{} segmentation: {} requests, {} units",
        strategy,
        requests.len(),
        total_memory_size
    );

    let mut table = SegmentTable::new(total_memory_size);
    let mut recorder = TraceRecorder::with_capacity(requests.len());

    for request in requests {
        let success = match request {
            SegmentRequest::Allocate { pid, size } => table.allocate(pid.clone(), *size, strategy),
            SegmentRequest::Deallocate { pid } => table.release(pid),
            SegmentRequest::Malformed { raw } => {
                trace!("skipping malformed request {:?}", raw);
                false
            }
        };

        recorder.record(|sequence_number| AllocationStepRecord {
            sequence_number,
            operation_description: request.description(),
            success,
            segments: table.snapshot(),
            total_free_bytes: table.free_bytes(),
            largest_free_block: table.largest_free_block(),
        });
    }

    let steps = recorder.finish();
    debug!(
        "{} segmentation done: {} of {} requests failed",
        strategy,
        steps.iter().filter(|step| !step.success).count(),
        steps.len()
    );

    Ok(SegmentationOutcome {
        strategy,
        total_memory_size,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: &str) -> ProcessId {
        ProcessId::from(id)
    }

    #[test]
    fn test_zero_memory_rejected() {
        let result = simulate_segmentation(&[], 0, FitStrategy::FirstFit);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidConfiguration { parameter: "total_memory_size", .. })
        ));
    }

    #[test]
    fn test_first_fit_walkthrough() {
        let requests = SegmentRequest::parse_list("1:100 2:50 -1");
        let outcome = simulate_segmentation(&requests, 300, FitStrategy::FirstFit).unwrap();
        assert_eq!(outcome.steps.len(), 3);

        let first = &outcome.steps[0];
        assert_eq!(first.operation_description, "Alloc 1 (100KB)");
        assert_eq!(
            first.segments,
            vec![Segment::allocated(pid("1"), 0, 100), Segment::free(100, 200)]
        );
        assert_eq!(first.total_free_bytes, 200);

        let second = &outcome.steps[1];
        assert_eq!(second.total_free_bytes, 150);
        assert_eq!(second.segments.len(), 3);

        let third = &outcome.steps[2];
        assert!(third.success);
        assert_eq!(third.operation_description, "Dealloc 1");
        assert_eq!(
            third.segments,
            vec![
                Segment::free(0, 100),
                Segment::allocated(pid("2"), 100, 50),
                Segment::free(150, 150),
            ]
        );
        assert_eq!(third.total_free_bytes, 250);
        assert_eq!(third.largest_free_block, 150);
    }

    #[test]
    fn test_failures_are_recorded_not_raised() {
        let requests = SegmentRequest::parse_list("1:80 2:50 -9 bogus 3:20");
        let outcome = simulate_segmentation(&requests, 100, FitStrategy::BestFit).unwrap();

        let success: Vec<bool> = outcome.steps.iter().map(|s| s.success).collect();
        assert_eq!(success, vec![true, false, false, false, true]);
        assert_eq!(outcome.steps[3].operation_description, "Invalid Req: bogus");
        assert_eq!(outcome.failed_steps().count(), 3);

        // Failed steps leave the table as it was
        assert_eq!(outcome.steps[1].segments, outcome.steps[0].segments);
        assert_eq!(outcome.final_segments().unwrap().len(), 2);
        assert_eq!(outcome.steps[4].total_free_bytes, 0);
    }

    #[test]
    fn test_strategies_pick_different_holes() {
        // Leaves holes of 100 at 0 and 50 at 150 and 150 at 250
        let requests = SegmentRequest::parse_list("a:100 x:50 b:50 y:50 -a -b n:40");

        let start_of_n = |strategy| {
            let outcome = simulate_segmentation(&requests, 400, strategy).unwrap();
            outcome
                .final_segments()
                .unwrap()
                .iter()
                .find(|seg| seg.is_owned_by(&pid("n")))
                .map(|seg| seg.start)
        };

        assert_eq!(start_of_n(FitStrategy::FirstFit), Some(0));
        assert_eq!(start_of_n(FitStrategy::BestFit), Some(150));
        assert_eq!(start_of_n(FitStrategy::WorstFit), Some(250));
    }
}
