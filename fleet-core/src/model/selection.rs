//! ``src/model/selection.rs``
//! ============================================================================
//! # Selection tracker
//!
//! Set of checked server ids, kept in the order they were checked and always
//! scoped to the visible list via [`SelectionTracker::prune`].

use indexmap::IndexSet;

use crate::model::server::{Server, ServerId};

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    ids: IndexSet<ServerId>,
}

impl SelectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check or uncheck a single row.
    pub fn toggle(&mut self, id: &str, included: bool) {
        if included {
            self.ids.insert(id.to_string());
        } else {
            self.ids.shift_remove(id);
        }
    }

    /// Flip a single row.
    pub fn flip(&mut self, id: &str) {
        let included = !self.is_selected(id);
        self.toggle(id, included);
    }

    /// Header checkbox: add every visible id, or clear everything.
    pub fn select_all(&mut self, visible: &[Server], included: bool) {
        if included {
            self.ids.extend(visible.iter().map(|s| s.id.clone()));
        } else {
            self.ids.clear();
        }
    }

    /// Drop ids that are no longer visible. Returns how many were dropped.
    pub fn prune(&mut self, visible: &[Server]) -> usize {
        let before = self.ids.len();
        self.ids
            .retain(|id| visible.iter().any(|server| &server.id == id));
        before - self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Visible list is non-empty and every visible id is checked.
    #[must_use]
    pub fn all_selected(&self, visible: &[Server]) -> bool {
        !visible.is_empty() && visible.iter().all(|s| self.ids.contains(&s.id))
    }

    /// Something is checked, but not the whole visible list.
    #[must_use]
    pub fn some_selected(&self, visible: &[Server]) -> bool {
        self.has_selection() && !self.all_selected(visible)
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Checked ids in check order.
    #[must_use]
    pub fn ids(&self) -> Vec<ServerId> {
        self.ids.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::server::ServerPatch;

    fn visible(ids: &[&str]) -> Vec<Server> {
        ids.iter()
            .map(|id| ServerPatch::default().into_server((*id).to_string()))
            .collect()
    }

    #[test]
    fn test_toggle_and_predicates() {
        let list = visible(&["srv-001", "srv-002"]);
        let mut selection = SelectionTracker::new();
        assert!(!selection.has_selection());
        assert!(!selection.some_selected(&list));

        selection.toggle("srv-001", true);
        assert!(selection.some_selected(&list));
        assert!(!selection.all_selected(&list));

        selection.toggle("srv-002", true);
        assert!(selection.all_selected(&list));
        assert!(!selection.some_selected(&list));

        selection.toggle("srv-001", false);
        assert_eq!(selection.ids(), ["srv-002"]);
    }

    #[test]
    fn test_all_selected_false_for_empty_list() {
        let selection = SelectionTracker::new();
        assert!(!selection.all_selected(&[]));
    }

    #[test]
    fn test_select_all_and_clear() {
        let list = visible(&["srv-001", "srv-002", "srv-003"]);
        let mut selection = SelectionTracker::new();

        selection.select_all(&list, true);
        assert_eq!(selection.len(), 3);

        selection.select_all(&list, false);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_prune_keeps_only_visible_in_check_order() {
        let mut selection = SelectionTracker::new();
        selection.toggle("srv-003", true);
        selection.toggle("srv-001", true);
        selection.toggle("srv-002", true);

        let dropped = selection.prune(&visible(&["srv-001", "srv-003"]));

        assert_eq!(dropped, 1);
        assert_eq!(selection.ids(), ["srv-003", "srv-001"]);
    }

    #[test]
    fn test_flip() {
        let mut selection = SelectionTracker::new();
        selection.flip("srv-004");
        assert!(selection.is_selected("srv-004"));
        selection.flip("srv-004");
        assert!(!selection.is_selected("srv-004"));
    }
}
