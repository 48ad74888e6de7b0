//! Page-replacement simulation.
//!
//! A run feeds a request sequence through a fixed-size [`FrameTable`] one page
//! at a time. Each request is a hit when the page is resident and a fault
//! otherwise. A fault fills the first empty slot while one exists; once the
//! table is full the active [`Replacer`] names the page to evict and the new
//! page takes over that page's slot.
//!
//! - **FIFO**: evicts the oldest arrival, hits change nothing
//! - **LRU**: evicts the least recently touched page
//! - **Optimal**: evicts the page used farthest in the future (needs lookahead)

pub mod fifo;
pub mod frame_table;
pub mod lru;
pub mod optimal;
pub mod replacer;
pub mod step;

pub use fifo::FifoReplacer;
pub use frame_table::FrameTable;
pub use lru::LruReplacer;
pub use optimal::OptimalReplacer;
pub use replacer::Replacer;
pub use step::StepRecord;

use crate::error::{SimulationError, SimulationResult};
use crate::trace::TraceRecorder;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a virtual page. Only compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl From<u64> for PageId {
    fn from(id: u64) -> Self {
        PageId(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Page-replacement discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Policy {
    Fifo,
    Lru,
    Optimal,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Fifo, Policy::Lru, Policy::Optimal];

    /// Build a fresh replacer for one run over `requests`.
    pub fn replacer(&self, requests: &[PageId], frame_count: usize) -> Box<dyn Replacer> {
        match self {
            Policy::Fifo => Box::new(FifoReplacer::new(frame_count)),
            Policy::Lru => Box::new(LruReplacer::new(frame_count)),
            Policy::Optimal => Box::new(OptimalReplacer::new(requests)),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => write!(f, "FIFO"),
            Policy::Lru => write!(f, "LRU"),
            Policy::Optimal => write!(f, "Optimal"),
        }
    }
}

/// Result of one page-replacement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementOutcome {
    pub policy: Policy,
    pub frame_count: usize,
    pub steps: Vec<StepRecord>,
    pub total_faults: usize,
    pub total_hits: usize,
    pub final_frames: Vec<Option<PageId>>,
}

impl ReplacementOutcome {
    /// Fraction of requests that were hits; 0 for an empty input.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.total_faults + self.total_hits;
        if total == 0 {
            0.0
        } else {
            self.total_hits as f64 / total as f64
        }
    }

    /// Distinct resident pages after the last request.
    pub fn final_residents(&self) -> Vec<PageId> {
        let mut residents: Vec<PageId> = self.final_frames.iter().flatten().copied().collect();
        residents.sort();
        residents
    }
}

/// Run `policy` over `requests` with `frame_count` frames.
///
/// Fails only when `frame_count` is zero; every request sequence, including
/// an empty one, is accepted.
pub fn simulate_replacement(
    policy: Policy,
    requests: &[PageId],
    frame_count: usize,
) -> SimulationResult<ReplacementOutcome> {
    if frame_count < 1 {
        return Err(SimulationError::non_positive("frame_count", frame_count));
    }

    debug!(
        "{} simulation: {} requests, {} frames",
        policy,
        requests.len(),
        frame_count
    );

    let mut table = FrameTable::new(frame_count);
    let mut replacer = policy.replacer(requests, frame_count);
    let mut recorder = TraceRecorder::with_capacity(requests.len());
    let mut faults = 0;
    let mut hits = 0;

    for (position, &page) in requests.iter().enumerate() {
        replacer.on_request(position, page);

        let is_hit = table.is_resident(page);
        let mut evicted_page = None;

        if is_hit {
            hits += 1;
            replacer.on_hit(page);
            trace!("{} #{}: page {} hit", policy, position + 1, page);
        } else {
            faults += 1;
            let slot = match table.first_empty_slot() {
                Some(slot) => slot,
                None => {
                    let victim = replacer
                        .victim(&table)
                        .ok_or(SimulationError::NoEvictionCandidate { position })?;
                    let slot = table
                        .slot_of(victim)
                        .ok_or(SimulationError::NoEvictionCandidate { position })?;
                    evicted_page = Some(victim);
                    slot
                }
            };
            table.place(page, slot);
            replacer.on_insert(page);
            trace!(
                "{} #{}: page {} fault -> frame {} (evicted {:?})",
                policy,
                position + 1,
                page,
                slot,
                evicted_page
            );
        }

        debug_assert!(
            replacer.tracked_pages().map_or(true, |n| n == table.len()),
            "{} replacer out of sync with the frame table",
            policy
        );

        recorder.record(|sequence_number| StepRecord {
            sequence_number,
            requested_page: page,
            frames: table.snapshot(),
            is_hit,
            evicted_page,
            cumulative_faults: faults,
            cumulative_hits: hits,
        });
    }

    debug!("{} simulation done: {} faults, {} hits", policy, faults, hits);

    Ok(ReplacementOutcome {
        policy,
        frame_count,
        steps: recorder.finish(),
        total_faults: faults,
        total_hits: hits,
        final_frames: table.snapshot(),
    })
}
