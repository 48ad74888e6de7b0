use super::frame_table::FrameTable;
use super::replacer::Replacer;
use super::PageId;
use std::collections::VecDeque;

/// First-in first-out: evicts the page that has been resident longest.
/// Hits do not change the arrival order.
#[derive(Debug, Default)]
pub struct FifoReplacer {
    /// Resident pages in arrival order (oldest at front)
    arrivals: VecDeque<PageId>,
}

impl FifoReplacer {
    pub fn new(frame_count: usize) -> Self {
        Self {
            arrivals: VecDeque::with_capacity(frame_count),
        }
    }
}

impl Replacer for FifoReplacer {
    fn on_hit(&mut self, _page: PageId) {}

    fn on_insert(&mut self, page: PageId) {
        self.arrivals.push_back(page);
    }

    fn victim(&mut self, _table: &FrameTable) -> Option<PageId> {
        self.arrivals.pop_front()
    }

    fn tracked_pages(&self) -> Option<usize> {
        Some(self.arrivals.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_in_arrival_order() {
        let table = FrameTable::new(3);
        let mut replacer = FifoReplacer::new(3);

        assert_eq!(replacer.victim(&table), None);

        replacer.on_insert(PageId(1));
        replacer.on_insert(PageId(2));
        replacer.on_insert(PageId(3));
        assert_eq!(replacer.tracked_pages(), Some(3));

        assert_eq!(replacer.victim(&table), Some(PageId(1)));
        assert_eq!(replacer.victim(&table), Some(PageId(2)));
        assert_eq!(replacer.tracked_pages(), Some(1));
    }

    #[test]
    fn test_hits_do_not_reorder() {
        let table = FrameTable::new(2);
        let mut replacer = FifoReplacer::new(2);

        replacer.on_insert(PageId(1));
        replacer.on_insert(PageId(2));
        replacer.on_hit(PageId(1));
        replacer.on_hit(PageId(1));

        assert_eq!(replacer.victim(&table), Some(PageId(1)));
    }
}
