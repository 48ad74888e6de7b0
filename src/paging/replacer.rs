use super::frame_table::FrameTable;
use super::PageId;
use std::fmt::Debug;

/// Eviction-candidate selection for one replacement discipline.
///
/// The simulation loop owns the frame table and decides hit or fault; a
/// replacer only observes accesses and names the victim when a fault finds
/// the table full. Implementations must forget the victim they return.
pub trait Replacer: Debug {
    /// Called with the 0-based position of each request before it is evaluated.
    fn on_request(&mut self, _position: usize, _page: PageId) {}

    /// The requested page was already resident.
    fn on_hit(&mut self, page: PageId);

    /// The requested page was just placed into a frame.
    fn on_insert(&mut self, page: PageId);

    /// Select a resident page to evict. Returns None if no page can be evicted.
    fn victim(&mut self, table: &FrameTable) -> Option<PageId>;

    /// Number of resident pages the replacer keeps ordering state for, or
    /// None when it keeps none and reads residency from the frame table.
    ///
    /// When Some, it always equals the number of occupied frames.
    fn tracked_pages(&self) -> Option<usize> {
        None
    }
}
