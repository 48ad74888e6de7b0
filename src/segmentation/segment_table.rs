use super::segment::{Owner, ProcessId, Segment};
use super::FitStrategy;
use log::trace;

/// Ordered list of segments covering `[0, total_size)` with no gaps and no
/// overlaps. Segment `i + 1` always starts where segment `i` ends.
#[derive(Debug, Clone)]
pub struct SegmentTable {
    segments: Vec<Segment>,
    total_size: usize,
}

impl SegmentTable {
    /// A table holding one free segment spanning the whole region.
    pub fn new(total_size: usize) -> Self {
        Self {
            segments: vec![Segment::free(0, total_size)],
            total_size,
        }
    }

    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Deep copy of the segment list.
    pub fn snapshot(&self) -> Vec<Segment> {
        self.segments.clone()
    }

    /// Index of the free segment `strategy` picks for `size` units.
    ///
    /// Best- and worst-fit keep the first segment found on equal leftover.
    pub fn find_fit(&self, strategy: FitStrategy, size: usize) -> Option<usize> {
        let mut candidates = self
            .segments
            .iter()
            .enumerate()
            .filter(|(_, seg)| seg.is_free() && seg.size >= size)
            .map(|(idx, seg)| (idx, seg.size - size));

        match strategy {
            FitStrategy::FirstFit => candidates.next().map(|(idx, _)| idx),
            FitStrategy::BestFit => candidates
                .fold(None, |best: Option<(usize, usize)>, (idx, waste)| match best {
                    Some((_, best_waste)) if best_waste <= waste => best,
                    _ => Some((idx, waste)),
                })
                .map(|(idx, _)| idx),
            FitStrategy::WorstFit => candidates
                .fold(None, |worst: Option<(usize, usize)>, (idx, waste)| match worst {
                    Some((_, worst_waste)) if worst_waste >= waste => worst,
                    _ => Some((idx, waste)),
                })
                .map(|(idx, _)| idx),
        }
    }

    /// Place `size` units for `pid`. Returns false, leaving the table
    /// untouched, when no free segment is large enough.
    pub fn allocate(&mut self, pid: ProcessId, size: usize, strategy: FitStrategy) -> bool {
        let Some(idx) = self.find_fit(strategy, size) else {
            trace!("{}: no free segment fits {} units for {}", strategy, size, pid);
            return false;
        };

        let chosen = &mut self.segments[idx];
        let start = chosen.start;
        let remaining = chosen.size - size;
        trace!(
            "{}: {} units for {} at offset {} (leftover {})",
            strategy,
            size,
            pid,
            start,
            remaining
        );

        *chosen = Segment::allocated(pid, start, size);
        if remaining > 0 {
            self.segments
                .insert(idx + 1, Segment::free(start + size, remaining));
        }
        debug_assert!(self.is_consistent());
        true
    }

    /// Free every segment owned by `pid` and coalesce. Returns false when
    /// `pid` owns nothing.
    pub fn release(&mut self, pid: &ProcessId) -> bool {
        let mut found = false;
        for seg in self.segments.iter_mut().filter(|seg| seg.is_owned_by(pid)) {
            seg.owner = Owner::Free;
            found = true;
        }
        if found {
            let merged = self.coalesce();
            trace!("released {}, merged {} free segment(s)", pid, merged);
        }
        debug_assert!(self.is_consistent());
        found
    }

    /// Merge every run of adjacent free segments into one. Returns how many
    /// segments were absorbed.
    pub fn coalesce(&mut self) -> usize {
        let before = self.segments.len();
        let mut merged: Vec<Segment> = Vec::with_capacity(before);
        for seg in self.segments.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.is_free() && seg.is_free() => prev.size += seg.size,
                _ => merged.push(seg),
            }
        }
        self.segments = merged;
        before - self.segments.len()
    }

    /// Sum of all free segment sizes (external fragmentation).
    pub fn free_bytes(&self) -> usize {
        self.free_segments().map(|seg| seg.size).sum()
    }

    pub fn largest_free_block(&self) -> usize {
        self.free_segments().map(|seg| seg.size).max().unwrap_or(0)
    }

    pub fn free_block_count(&self) -> usize {
        self.free_segments().count()
    }

    fn free_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|seg| seg.is_free())
    }

    /// Check that segments tile `[0, total_size)` exactly.
    pub fn is_consistent(&self) -> bool {
        let mut offset = 0;
        for seg in &self.segments {
            if seg.start != offset {
                return false;
            }
            offset = seg.end();
        }
        offset == self.total_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: &str) -> ProcessId {
        ProcessId::from(id)
    }

    /// Free holes of 100, 50, 200 separated by allocated blocks.
    fn fragmented() -> SegmentTable {
        let mut table = SegmentTable::new(500);
        for (id, size) in [("a", 100), ("x", 50), ("b", 50), ("y", 50), ("c", 200), ("z", 50)] {
            assert!(table.allocate(pid(id), size, FitStrategy::FirstFit));
        }
        for id in ["a", "b", "c"] {
            assert!(table.release(&pid(id)));
        }
        table
    }

    #[test]
    fn test_new_table() {
        let table = SegmentTable::new(300);
        assert_eq!(table.segments(), &[Segment::free(0, 300)]);
        assert_eq!(table.free_bytes(), 300);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_split_and_exact_fit() {
        let mut table = SegmentTable::new(300);
        assert!(table.allocate(pid("1"), 100, FitStrategy::FirstFit));
        assert_eq!(
            table.segments(),
            &[Segment::allocated(pid("1"), 0, 100), Segment::free(100, 200)]
        );

        // Exact fit converts in place without a zero-size remainder
        assert!(table.allocate(pid("2"), 200, FitStrategy::FirstFit));
        assert_eq!(table.segments().len(), 2);
        assert_eq!(table.free_bytes(), 0);
        assert_eq!(table.largest_free_block(), 0);
    }

    #[test]
    fn test_allocation_failure_leaves_table() {
        let mut table = SegmentTable::new(100);
        assert!(table.allocate(pid("1"), 60, FitStrategy::FirstFit));
        let before = table.snapshot();

        assert!(!table.allocate(pid("2"), 60, FitStrategy::BestFit));
        assert_eq!(table.snapshot(), before);
    }

    #[test]
    fn test_fit_strategies() {
        let table = fragmented();
        assert_eq!(table.free_block_count(), 3);

        // Holes: idx 0 (100), idx 2 (50), idx 4 (200)
        assert_eq!(table.find_fit(FitStrategy::FirstFit, 40), Some(0));
        assert_eq!(table.find_fit(FitStrategy::BestFit, 40), Some(2));
        assert_eq!(table.find_fit(FitStrategy::WorstFit, 40), Some(4));
        assert_eq!(table.find_fit(FitStrategy::BestFit, 150), Some(4));
        assert_eq!(table.find_fit(FitStrategy::WorstFit, 250), None);
    }

    #[test]
    fn test_ties_keep_first() {
        let mut table = SegmentTable::new(250);
        for (id, size) in [("a", 50), ("x", 50), ("b", 50), ("y", 50), ("c", 50)] {
            table.allocate(pid(id), size, FitStrategy::FirstFit);
        }
        table.release(&pid("a"));
        table.release(&pid("b"));
        table.release(&pid("c"));

        assert_eq!(table.find_fit(FitStrategy::BestFit, 10), Some(0));
        assert_eq!(table.find_fit(FitStrategy::WorstFit, 10), Some(0));
    }

    #[test]
    fn test_release_coalesces_neighbours() {
        let mut table = SegmentTable::new(300);
        table.allocate(pid("1"), 100, FitStrategy::FirstFit);
        table.allocate(pid("2"), 100, FitStrategy::FirstFit);
        table.allocate(pid("3"), 100, FitStrategy::FirstFit);

        assert!(table.release(&pid("1")));
        assert!(table.release(&pid("3")));
        assert_eq!(table.free_block_count(), 2);

        // Freeing the middle joins all three
        assert!(table.release(&pid("2")));
        assert_eq!(table.segments(), &[Segment::free(0, 300)]);
    }

    #[test]
    fn test_release_unknown_owner() {
        let mut table = SegmentTable::new(100);
        table.allocate(pid("1"), 10, FitStrategy::FirstFit);
        assert!(!table.release(&pid("9")));
        assert_eq!(table.segments().len(), 2);
    }

    #[test]
    fn test_release_frees_every_owned_segment() {
        let mut table = SegmentTable::new(300);
        table.allocate(pid("1"), 50, FitStrategy::FirstFit);
        table.allocate(pid("2"), 50, FitStrategy::FirstFit);
        table.allocate(pid("1"), 50, FitStrategy::FirstFit);

        assert!(table.release(&pid("1")));
        assert_eq!(
            table.segments(),
            &[
                Segment::free(0, 50),
                Segment::allocated(pid("2"), 50, 50),
                Segment::free(100, 200),
            ]
        );
    }
}
