use super::segment::Segment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot taken after one allocator request has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationStepRecord {
    pub sequence_number: usize,
    pub operation_description: String,
    pub success: bool,
    /// Deep copy of the segment table after the request
    pub segments: Vec<Segment>,
    /// External fragmentation: total size of all free segments
    pub total_free_bytes: usize,
    pub largest_free_block: usize,
}

impl AllocationStepRecord {
    /// `1 - largest / total_free`, 0 when nothing is free.
    ///
    /// 0 means all free memory is one block; values near 1 mean it is
    /// scattered in small holes.
    pub fn fragmentation_ratio(&self) -> f64 {
        if self.total_free_bytes == 0 {
            return 0.0;
        }
        let largest = self.largest_free_block.min(self.total_free_bytes) as f64;
        (1.0 - largest / self.total_free_bytes as f64).clamp(0.0, 1.0)
    }
}

impl fmt::Display for AllocationStepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4}  {:<24} {:<4}  free={}",
            self.sequence_number,
            self.operation_description,
            if self.success { "ok" } else { "FAIL" },
            self.total_free_bytes
        )?;
        for seg in &self.segments {
            write!(f, "  {}", seg)?;
        }
        Ok(())
    }
}
