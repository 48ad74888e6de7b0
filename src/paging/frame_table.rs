use super::PageId;
use std::collections::HashMap;
use std::fmt;

/// Fixed-capacity array of frame slots plus a page -> slot residency index.
///
/// Slots fill in ascending index order and never become empty again; after
/// the table is full the only mutation is replacing a resident page in place.
#[derive(Debug, Clone)]
pub struct FrameTable {
    /// Slot contents; the index is the frame number
    slots: Vec<Option<PageId>>,
    /// Where each resident page lives, for O(1) membership checks
    residency: HashMap<PageId, usize>,
}

impl FrameTable {
    pub fn new(frame_count: usize) -> Self {
        Self {
            slots: vec![None; frame_count],
            residency: HashMap::with_capacity(frame_count),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.residency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residency.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.residency.len() == self.slots.len()
    }

    pub fn is_resident(&self, page: PageId) -> bool {
        self.residency.contains_key(&page)
    }

    pub fn slot_of(&self, page: PageId) -> Option<usize> {
        self.residency.get(&page).copied()
    }

    pub fn first_empty_slot(&self) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        self.slots.iter().position(Option::is_none)
    }

    /// Put `page` into slot `index`, returning the page it displaced.
    ///
    /// The displaced page is dropped from the residency index. `page` must not
    /// already be resident.
    pub fn place(&mut self, page: PageId, index: usize) -> Option<PageId> {
        debug_assert!(!self.is_resident(page), "page {} already resident", page);

        let displaced = self.slots[index].replace(page);
        if let Some(old) = displaced {
            self.residency.remove(&old);
        }
        self.residency.insert(page, index);
        displaced
    }

    /// Resident pages in ascending slot order.
    pub fn residents(&self) -> impl Iterator<Item = PageId> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn slots(&self) -> &[Option<PageId>] {
        &self.slots
    }

    /// Deep copy of the slot contents.
    pub fn snapshot(&self) -> Vec<Option<PageId>> {
        self.slots.clone()
    }
}

impl fmt::Display for FrameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_frames(f, &self.slots)
    }
}

/// Render frame contents as `[7 0 -]`, with `-` for an empty slot.
pub(crate) fn write_frames(f: &mut fmt::Formatter<'_>, slots: &[Option<PageId>]) -> fmt::Result {
    write!(f, "[")?;
    for (i, slot) in slots.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        match slot {
            Some(page) => write!(f, "{}", page)?,
            None => write!(f, "-")?,
        }
    }
    write!(f, "]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_in_slot_order() {
        let mut table = FrameTable::new(3);
        assert!(table.is_empty());
        assert_eq!(table.first_empty_slot(), Some(0));

        assert_eq!(table.place(PageId(7), 0), None);
        assert_eq!(table.first_empty_slot(), Some(1));
        assert_eq!(table.place(PageId(0), 1), None);
        assert_eq!(table.place(PageId(1), 2), None);

        assert!(table.is_full());
        assert_eq!(table.first_empty_slot(), None);
        assert_eq!(table.snapshot(), vec![Some(PageId(7)), Some(PageId(0)), Some(PageId(1))]);
    }

    #[test]
    fn test_place_replaces_and_updates_index() {
        let mut table = FrameTable::new(2);
        table.place(PageId(1), 0);
        table.place(PageId(2), 1);

        let displaced = table.place(PageId(3), 0);
        assert_eq!(displaced, Some(PageId(1)));
        assert!(!table.is_resident(PageId(1)));
        assert_eq!(table.slot_of(PageId(3)), Some(0));
        assert_eq!(table.slot_of(PageId(2)), Some(1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.residents().collect::<Vec<_>>(), vec![PageId(3), PageId(2)]);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut table = FrameTable::new(2);
        table.place(PageId(1), 0);
        let before = table.snapshot();

        table.place(PageId(2), 1);

        assert_eq!(before, vec![Some(PageId(1)), None]);
        assert_eq!(table.to_string(), "[1 2]");
    }

    #[test]
    fn test_display_empty_slots() {
        let mut table = FrameTable::new(3);
        table.place(PageId(4), 0);
        assert_eq!(table.to_string(), "[4 - -]");
    }
}
