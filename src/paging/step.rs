use super::frame_table::write_frames;
use super::PageId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot taken after one page request has been served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based position of the request in the input
    pub sequence_number: usize,
    pub requested_page: PageId,
    /// Deep copy of the frame table after the request
    pub frames: Vec<Option<PageId>>,
    pub is_hit: bool,
    /// Page displaced by this request, if the fault found the table full
    pub evicted_page: Option<PageId>,
    pub cumulative_faults: usize,
    pub cumulative_hits: usize,
}

impl StepRecord {
    pub fn is_fault(&self) -> bool {
        !self.is_hit
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4}  {:>6}  {:<5} ",
            self.sequence_number,
            self.requested_page,
            if self.is_hit { "HIT" } else { "FAULT" }
        )?;
        write_frames(f, &self.frames)?;
        if let Some(evicted) = self.evicted_page {
            write!(f, "  evicted {}", evicted)?;
        }
        write!(
            f,
            "  (faults={}, hits={})",
            self.cumulative_faults, self.cumulative_hits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let step = StepRecord {
            sequence_number: 5,
            requested_page: PageId(4),
            frames: vec![Some(PageId(4)), Some(PageId(2)), None],
            is_hit: false,
            evicted_page: Some(PageId(1)),
            cumulative_faults: 4,
            cumulative_hits: 1,
        };
        assert!(step.is_fault());
        assert_eq!(
            step.to_string(),
            "   5       4  FAULT [4 2 -]  evicted 1  (faults=4, hits=1)"
        );
    }
}
