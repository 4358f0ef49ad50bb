//! src/controller/bulk.rs
//! ============================================================================
//! # Bulk actions and undo
//!
//! Delete runs as `Idle → ConfirmPending → (Cancelled → Idle) | Deleted`.
//! A confirmed delete captures the removed records under an [`UndoToken`];
//! the warning notification carries `Action::UndoDelete(token)` and, when it
//! expires or is replaced, `Action::DiscardUndo(token)` makes the delete final.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info, warn};

use crate::model::selection::SelectionTracker;
use crate::model::server::{Server, ServerId, ServerStatus};
use crate::model::store::ServerStore;

/// Handle for one delete's captured records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UndoToken(u64);

#[cfg(test)]
impl UndoToken {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UndoToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "undo#{}", self.0)
    }
}

/// Modal confirmation shown before a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeletePhase {
    #[default]
    Idle,
    ConfirmPending {
        ids: Vec<ServerId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No dialog was pending.
    NothingToDelete,
    Cancelled,
    Deleted { token: UndoToken, count: usize },
}

#[derive(Debug, Default)]
pub struct BulkCoordinator {
    phase: DeletePhase,
    pending_undo: HashMap<UndoToken, Vec<Server>>,
    next_token: u64,
}

impl BulkCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> &DeletePhase {
        &self.phase
    }

    /// Enter `ConfirmPending` for the current selection. `false` (and no
    /// state change) when nothing is selected.
    pub fn request_delete(&mut self, selection: &SelectionTracker) -> bool {
        if !selection.has_selection() {
            debug!(marker = "BULK_DELETE_EMPTY", "Delete requested with empty selection");
            return false;
        }

        self.phase = DeletePhase::ConfirmPending {
            ids: selection.ids(),
        };
        true
    }

    /// Resolve the pending dialog. On confirm: capture records, delete them
    /// from the store, clear the selection. Only ids that are still selected
    /// are deleted; a filter applied while the dialog was open may have
    /// pruned some.
    pub fn resolve_delete(
        &mut self,
        confirmed: bool,
        store: &mut ServerStore,
        selection: &mut SelectionTracker,
    ) -> DeleteOutcome {
        let DeletePhase::ConfirmPending { ids } = std::mem::take(&mut self.phase) else {
            return DeleteOutcome::NothingToDelete;
        };

        if !confirmed {
            info!(
                marker = "BULK_DELETE_CANCELLED",
                operation_type = "bulk_action",
                "Delete cancelled"
            );
            return DeleteOutcome::Cancelled;
        }

        let requested = ids.len();
        let ids: Vec<ServerId> = ids
            .into_iter()
            .filter(|id| selection.is_selected(id))
            .collect();
        if ids.len() < requested {
            debug!(
                marker = "BULK_DELETE_NARROWED",
                requested,
                remaining = ids.len(),
                "Selection shrank while confirming"
            );
        }
        if ids.is_empty() {
            return DeleteOutcome::NothingToDelete;
        }

        let captured: Vec<Server> = ids.iter().filter_map(|id| store.get_by_id(id)).collect();
        let count = store.delete_by_ids(&ids);
        selection.clear();

        let token = UndoToken(self.next_token);
        self.next_token += 1;
        self.pending_undo.insert(token, captured);

        info!(
            marker = "BULK_DELETE_CONFIRMED",
            operation_type = "bulk_action",
            %token,
            count,
            "Servers deleted, undo available"
        );
        DeleteOutcome::Deleted { token, count }
    }

    /// Restore the records captured under `token`. `None` if the token was
    /// already used or discarded.
    pub fn undo(&mut self, token: UndoToken, store: &mut ServerStore) -> Option<usize> {
        let Some(records) = self.pending_undo.remove(&token) else {
            warn!(marker = "UNDO_STALE", %token, "Undo for unknown or expired token");
            return None;
        };

        let restored = store.restore_servers(records);
        info!(
            marker = "BULK_DELETE_UNDONE",
            operation_type = "bulk_action",
            %token,
            restored,
            "Delete undone"
        );
        Some(restored)
    }

    /// Drop captured records; the delete becomes final.
    pub fn discard(&mut self, token: UndoToken) -> bool {
        let dropped = self.pending_undo.remove(&token).is_some();
        if dropped {
            debug!(marker = "UNDO_DISCARDED", %token, "Undo window closed");
        }
        dropped
    }

    #[must_use]
    pub fn pending_undo_count(&self) -> usize {
        self.pending_undo.len()
    }
}

/// Restart/shutdown for the selection. Missing ids are skipped; the
/// selection is cleared whenever it was non-empty.
pub fn apply_power_action(
    store: &mut ServerStore,
    selection: &mut SelectionTracker,
    status: ServerStatus,
) -> usize {
    if !selection.has_selection() {
        return 0;
    }

    let changed = store.set_power_state(&selection.ids(), status);
    selection.clear();
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (ServerStore, SelectionTracker, BulkCoordinator) {
        (
            ServerStore::seeded().expect("fixture"),
            SelectionTracker::new(),
            BulkCoordinator::new(),
        )
    }

    fn ids(store: &ServerStore) -> Vec<ServerId> {
        let mut ids: Vec<_> = store.get_all().into_iter().map(|s| s.id).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let (mut store, mut selection, mut bulk) = setup();

        assert!(!bulk.request_delete(&selection));
        assert_eq!(bulk.phase(), &DeletePhase::Idle);
        assert_eq!(
            bulk.resolve_delete(true, &mut store, &mut selection),
            DeleteOutcome::NothingToDelete
        );
        assert_eq!(apply_power_action(&mut store, &mut selection, ServerStatus::Running), 0);
        assert_eq!(store.len(), 12);
    }

    #[test]
    fn test_cancel_keeps_everything() {
        let (mut store, mut selection, mut bulk) = setup();
        selection.toggle("srv-001", true);

        assert!(bulk.request_delete(&selection));
        assert_eq!(
            bulk.resolve_delete(false, &mut store, &mut selection),
            DeleteOutcome::Cancelled
        );

        assert_eq!(store.len(), 12);
        assert!(selection.is_selected("srv-001"));
        assert_eq!(bulk.phase(), &DeletePhase::Idle);
    }

    #[test]
    fn test_delete_then_undo_restores_id_set() {
        let (mut store, mut selection, mut bulk) = setup();
        let before = ids(&store);
        selection.toggle("srv-002", true);
        selection.toggle("srv-005", true);

        bulk.request_delete(&selection);
        let DeleteOutcome::Deleted { token, count } =
            bulk.resolve_delete(true, &mut store, &mut selection)
        else {
            panic!("expected delete");
        };

        assert_eq!(count, 2);
        assert!(selection.is_empty());
        assert!(store.get_by_id("srv-002").is_none());

        assert_eq!(bulk.undo(token, &mut store), Some(2));
        assert_eq!(ids(&store), before);
        assert_eq!(bulk.undo(token, &mut store), None);
    }

    #[test]
    fn test_confirm_deletes_only_still_selected() {
        let (mut store, mut selection, mut bulk) = setup();
        selection.toggle("srv-001", true);
        selection.toggle("srv-002", true);
        selection.toggle("srv-005", true);
        bulk.request_delete(&selection);

        // A filter settles while the dialog is open and drops srv-002.
        selection.toggle("srv-002", false);

        let outcome = bulk.resolve_delete(true, &mut store, &mut selection);
        assert!(matches!(outcome, DeleteOutcome::Deleted { count: 2, .. }));
        assert!(store.get_by_id("srv-002").is_some());
        assert!(store.get_by_id("srv-001").is_none());
        assert!(store.get_by_id("srv-005").is_none());
    }

    #[test]
    fn test_confirm_with_emptied_selection_deletes_nothing() {
        let (mut store, mut selection, mut bulk) = setup();
        selection.toggle("srv-004", true);
        bulk.request_delete(&selection);
        selection.clear();

        assert_eq!(
            bulk.resolve_delete(true, &mut store, &mut selection),
            DeleteOutcome::NothingToDelete
        );
        assert_eq!(store.len(), 12);
        assert_eq!(bulk.pending_undo_count(), 0);
        assert_eq!(bulk.phase(), &DeletePhase::Idle);
    }

    #[test]
    fn test_discard_makes_delete_final() {
        let (mut store, mut selection, mut bulk) = setup();
        selection.toggle("srv-003", true);
        bulk.request_delete(&selection);
        let DeleteOutcome::Deleted { token, .. } =
            bulk.resolve_delete(true, &mut store, &mut selection)
        else {
            panic!("expected delete");
        };

        assert!(bulk.discard(token));
        assert_eq!(bulk.pending_undo_count(), 0);
        assert_eq!(bulk.undo(token, &mut store), None);
        assert_eq!(store.len(), 11);
    }

    #[test]
    fn test_restart_skips_missing_and_clears_selection() {
        let (mut store, mut selection, _) = setup();
        selection.toggle("srv-003", true);
        selection.toggle("srv-007", true);
        store.delete_by_ids(&["srv-007".into()]);

        let changed = apply_power_action(&mut store, &mut selection, ServerStatus::Running);

        assert_eq!(changed, 1);
        assert!(selection.is_empty());
        assert_eq!(store.get_by_id("srv-003").map(|s| s.status), Some(ServerStatus::Running));
    }
}
