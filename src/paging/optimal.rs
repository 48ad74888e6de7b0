use super::frame_table::FrameTable;
use super::replacer::Replacer;
use super::PageId;
use log::trace;
use std::collections::{HashMap, VecDeque};

/// Bélády's optimal policy: evicts the resident page whose next use lies
/// farthest in the future.
///
/// Needs the whole request sequence up front. Each page keeps the ascending
/// positions at which it is requested; the position being served is popped
/// before the request is evaluated, so the front of a list is always a
/// strictly future use.
#[derive(Debug)]
pub struct OptimalReplacer {
    future_uses: HashMap<PageId, VecDeque<usize>>,
}

impl OptimalReplacer {
    pub fn new(requests: &[PageId]) -> Self {
        let mut future_uses: HashMap<PageId, VecDeque<usize>> = HashMap::new();
        for (position, &page) in requests.iter().enumerate() {
            future_uses.entry(page).or_default().push_back(position);
        }
        Self { future_uses }
    }

    /// Next position at which `page` is requested, or None if it never recurs.
    pub fn next_use(&self, page: PageId) -> Option<usize> {
        self.future_uses
            .get(&page)
            .and_then(|positions| positions.front().copied())
    }
}

impl Replacer for OptimalReplacer {
    fn on_request(&mut self, position: usize, page: PageId) {
        if let Some(positions) = self.future_uses.get_mut(&page) {
            if positions.front() == Some(&position) {
                positions.pop_front();
            }
        }
    }

    fn on_hit(&mut self, _page: PageId) {}

    fn on_insert(&mut self, _page: PageId) {}

    fn victim(&mut self, table: &FrameTable) -> Option<PageId> {
        // Residents are scanned in slot order; the first page that is never
        // used again wins outright, otherwise the strictly farthest next use.
        let mut farthest: Option<(PageId, usize)> = None;
        for page in table.residents() {
            match self.next_use(page) {
                None => {
                    trace!("Optimal: page {} has no future use", page);
                    return Some(page);
                }
                Some(next) => {
                    if farthest.map_or(true, |(_, best)| next > best) {
                        farthest = Some((page, next));
                    }
                }
            }
        }
        farthest.map(|(page, _)| page)
    }
}
