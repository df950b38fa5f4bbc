//! Row selection for batch actions.

use crate::EntityId;
use std::collections::BTreeSet;

/// Set of selected row ids, iterated in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<EntityId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of one id. Returns whether it is now selected.
    pub fn toggle(&mut self, id: EntityId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    /// Replace the selection with exactly `ids`.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = EntityId>) {
        self.ids = ids.into_iter().collect();
    }

    /// Select all of `ids`, or clear when every one of them is already selected.
    pub fn toggle_all(&mut self, ids: &[EntityId]) {
        let all_selected = !ids.is_empty() && ids.iter().all(|id| self.ids.contains(id));
        if all_selected {
            self.clear();
        } else {
            self.select_all(ids.iter().copied());
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that are no longer present, e.g. after a reload.
    pub fn retain(&mut self, present: &[EntityId]) {
        self.ids.retain(|id| present.contains(id));
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.ids.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut selection = Selection::new();
        assert!(selection.toggle(4));
        assert!(selection.contains(4));
        assert!(!selection.toggle(4));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_then_deselect_one() {
        let mut selection = Selection::new();
        selection.select_all([1, 2, 3]);
        selection.toggle(2);
        assert_eq!(selection.ids(), vec![1, 3]);
    }

    #[test]
    fn test_toggle_all_clears_when_everything_selected() {
        let mut selection = Selection::new();
        selection.toggle_all(&[1, 2]);
        assert_eq!(selection.len(), 2);
        selection.toggle_all(&[1, 2]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_with_partial_selection_selects_all() {
        let mut selection = Selection::new();
        selection.toggle(1);
        selection.toggle_all(&[1, 2, 3]);
        assert_eq!(selection.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_toggle_all_replaces_foreign_ids() {
        let mut selection = Selection::new();
        selection.toggle(9);
        selection.toggle_all(&[1]);
        assert_eq!(selection.ids(), vec![1]);
    }

    #[test]
    fn test_retain_drops_missing_rows() {
        let mut selection = Selection::new();
        selection.select_all([1, 2, 3]);
        selection.retain(&[2, 3, 4]);
        assert_eq!(selection.ids(), vec![2, 3]);
    }
}
