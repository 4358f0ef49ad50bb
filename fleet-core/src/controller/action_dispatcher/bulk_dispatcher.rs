// fleet-core/src/controller/action_dispatcher/bulk_dispatcher.rs
// Confirm → delete → undo window, and restart/shutdown for the selection

use tracing::info;

use super::{ActionHandler, DispatchResult};
use crate::controller::Action;
use crate::controller::bulk::{ConfirmRequest, DeleteOutcome, UndoToken, apply_power_action};
use crate::error::AppError;
use crate::model::app_state::AppState;
use crate::model::server::ServerStatus;
use crate::model::ui_state::{NotificationAction, UIOverlay};

#[derive(Debug, Default)]
pub struct BulkDispatcher;

impl BulkDispatcher {
    fn request_delete(state: &mut AppState) -> DispatchResult {
        if !state.bulk.request_delete(&state.list.selection) {
            return DispatchResult::NotHandled;
        }

        let t = &state.translator;
        let count = state.list.selection.len().to_string();
        state.ui.confirm = Some(ConfirmRequest {
            title: t.instant("SERVER_LIST.DELETE_CONFIRM_TITLE"),
            message: t.instant_with(
                "SERVER_LIST.DELETE_CONFIRM_MESSAGE",
                &[("count", count.as_str())],
            ),
            confirm_label: t.instant("SERVER_LIST.DELETE_BUTTON"),
            cancel_label: t.instant("COMMON.CANCEL"),
        });
        state.ui.open_overlay(UIOverlay::Confirm);
        DispatchResult::Continue
    }

    fn resolve_delete(state: &mut AppState, confirmed: bool) -> DispatchResult {
        state.ui.close_overlay();

        let outcome =
            state
                .bulk
                .resolve_delete(confirmed, &mut state.store, &mut state.list.selection);

        if let DeleteOutcome::Deleted { token, count } = outcome {
            state.reload_list();

            let count = count.to_string();
            let message = state
                .translator
                .instant_with("SERVER_LIST.DELETED", &[("count", count.as_str())]);
            let undo = NotificationAction::new(
                state.translator.instant("SERVER_LIST.UNDO"),
                Action::UndoDelete(token),
            )
            .on_dismiss(Action::DiscardUndo(token));

            let replaced = state.ui.show_warning_with_action(message, undo);
            state.retire_notification(replaced);
        }

        DispatchResult::Continue
    }

    fn undo(state: &mut AppState, token: UndoToken) -> DispatchResult {
        let Some(restored) = state.bulk.undo(token, &mut state.store) else {
            return DispatchResult::NotHandled;
        };

        state.reload_list();
        let count = restored.to_string();
        let message = state
            .translator
            .instant_with("SERVER_LIST.RESTORED", &[("count", count.as_str())]);
        let replaced = state.ui.show_success(message);
        state.retire_notification(replaced);
        DispatchResult::Continue
    }

    fn power_action(state: &mut AppState, status: ServerStatus) -> DispatchResult {
        if !state.list.selection.has_selection() {
            return DispatchResult::NotHandled;
        }

        let changed = apply_power_action(&mut state.store, &mut state.list.selection, status);
        state.reload_list();

        let key = match status {
            ServerStatus::Running => "SERVER_LIST.RESTARTED",
            _ => "SERVER_LIST.SHUT_DOWN",
        };
        let count = changed.to_string();
        let message = state.translator.instant_with(key, &[("count", count.as_str())]);
        let replaced = state.ui.show_success(message);
        state.retire_notification(replaced);

        info!(
            marker = "BULK_POWER_ACTION",
            operation_type = "bulk_action",
            %status,
            changed,
            "Bulk power action applied"
        );
        DispatchResult::Continue
    }
}

impl ActionHandler for BulkDispatcher {
    fn can_handle(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::RequestDeleteSelected
                | Action::ConfirmDialog(_)
                | Action::UndoDelete(_)
                | Action::DiscardUndo(_)
                | Action::RestartSelected
                | Action::ShutdownSelected
        )
    }

    async fn handle(
        &mut self,
        state: &mut AppState,
        action: Action,
    ) -> Result<DispatchResult, AppError> {
        let result = match action {
            Action::RequestDeleteSelected => Self::request_delete(state),
            Action::ConfirmDialog(confirmed) => Self::resolve_delete(state, confirmed),
            Action::UndoDelete(token) => Self::undo(state, token),
            Action::DiscardUndo(token) => {
                state.bulk.discard(token);
                DispatchResult::Continue
            }
            Action::RestartSelected => Self::power_action(state, ServerStatus::Running),
            Action::ShutdownSelected => Self::power_action(state, ServerStatus::Stopped),
            _ => DispatchResult::NotHandled,
        };

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "bulk"
    }
}
