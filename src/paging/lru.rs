use super::frame_table::FrameTable;
use super::replacer::Replacer;
use super::PageId;
use std::collections::{HashMap, VecDeque};

/// Least recently used: every hit and every insertion makes the page the
/// most recently used one; the victim is the least recently used.
#[derive(Debug)]
pub struct LruReplacer {
    /// Resident pages by recency (least recently used at front)
    lru_list: VecDeque<PageId>,
    /// Map to track position in LRU list for O(1) lookup
    page_map: HashMap<PageId, usize>,
}

impl LruReplacer {
    pub fn new(frame_count: usize) -> Self {
        Self {
            lru_list: VecDeque::with_capacity(frame_count),
            page_map: HashMap::with_capacity(frame_count),
        }
    }

    fn update_indices(&mut self) {
        // Update all indices in the map after modification
        for (idx, &page) in self.lru_list.iter().enumerate() {
            self.page_map.insert(page, idx);
        }
    }

    fn touch(&mut self, page: PageId) {
        if let Some(idx) = self.page_map.remove(&page) {
            self.lru_list.remove(idx);
            self.update_indices();
        }
        self.lru_list.push_back(page);
        self.page_map.insert(page, self.lru_list.len() - 1);
    }

    /// Pages from least to most recently used.
    pub fn recency_order(&self) -> impl Iterator<Item = PageId> + '_ {
        self.lru_list.iter().copied()
    }
}

impl Replacer for LruReplacer {
    fn on_hit(&mut self, page: PageId) {
        self.touch(page);
    }

    fn on_insert(&mut self, page: PageId) {
        self.touch(page);
    }

    fn victim(&mut self, _table: &FrameTable) -> Option<PageId> {
        let page = self.lru_list.pop_front()?;
        self.page_map.remove(&page);
        self.update_indices();
        Some(page)
    }

    fn tracked_pages(&self) -> Option<usize> {
        Some(self.lru_list.len())
    }
}
