// fleet-core/src/controller/action_dispatcher/detail_dispatcher.rs
// Detail view, edit mode and the add-server overlay

use tracing::{info, warn};

use super::{ActionHandler, DispatchResult};
use crate::controller::Action;
use crate::controller::server_detail::SaveOutcome;
use crate::error::AppError;
use crate::model::app_state::AppState;
use crate::model::form::ServerForm;
use crate::model::ui_state::{RedrawFlag, UIMode, UIOverlay};

#[derive(Debug, Default)]
pub struct DetailDispatcher;

impl DetailDispatcher {
    /// Form receiving input: the add overlay wins over detail edit mode.
    fn active_form(state: &mut AppState) -> Option<&mut ServerForm> {
        if state.ui.overlay == UIOverlay::AddServer {
            return state.ui.add_form.as_mut();
        }
        if state.ui.mode == UIMode::Edit {
            return state.detail.as_mut().map(|d| &mut d.form);
        }
        None
    }

    fn handle_form_input(state: &mut AppState, action: &Action) -> DispatchResult {
        let Some(form) = Self::active_form(state) else {
            return DispatchResult::NotHandled;
        };

        match action {
            Action::FormInput(c) => form.input_char(*c),
            Action::FormBackspace => form.backspace(),
            Action::FormCycleChoice { forward } => form.cycle_choice(*forward),
            Action::FormFocusNext => form.focus_next(),
            Action::FormFocusPrev => form.focus_prev(),
            _ => return DispatchResult::NotHandled,
        }

        state.ui.request_redraw(RedrawFlag::Overlay);
        state.ui.request_redraw(RedrawFlag::Main);
        DispatchResult::Continue
    }

    fn open_add_server(state: &mut AppState) -> DispatchResult {
        state.ui.add_form = Some(ServerForm::new_add());
        state.ui.open_overlay(UIOverlay::AddServer);
        DispatchResult::Continue
    }

    fn submit_add(state: &mut AppState) -> DispatchResult {
        let Some(form) = state.ui.add_form.as_mut() else {
            return DispatchResult::NotHandled;
        };

        let Some(patch) = form.to_patch() else {
            form.mark_all_touched();
            state.ui.request_redraw(RedrawFlag::Overlay);
            return DispatchResult::Continue;
        };

        let server = state.store.create(patch);
        state.ui.close_overlay();
        state.reload_list();

        let message = state
            .translator
            .instant_with("SERVER_LIST.ADDED", &[("hostname", server.hostname.as_str())]);
        let replaced = state.ui.show_success(message);
        state.retire_notification(replaced);
        DispatchResult::Continue
    }

    fn submit_edit(state: &mut AppState) -> DispatchResult {
        let Some(detail) = state.detail.as_mut() else {
            return DispatchResult::NotHandled;
        };

        match detail.save_changes(&mut state.store) {
            SaveOutcome::Saved => {
                detail.sync_chart(&state.translator, AppState::now_ms(), &mut state.rng);
                state.ui.mode = UIMode::Detail;
                let message = state.translator.instant("SERVER_DETAIL.SAVED");
                let replaced = state.ui.show_success(message);
                state.retire_notification(replaced);
            }
            SaveOutcome::Invalid => {}
            SaveOutcome::Missing => Self::close_detail(state),
        }

        state.ui.request_redraw(RedrawFlag::All);
        DispatchResult::Continue
    }

    fn cancel_form(state: &mut AppState) -> DispatchResult {
        if state.ui.overlay == UIOverlay::AddServer {
            state.ui.close_overlay();
            return DispatchResult::Continue;
        }

        let Some(detail) = state.detail.as_mut() else {
            return DispatchResult::NotHandled;
        };
        detail.cancel_edit();
        state.ui.mode = UIMode::Detail;
        state.ui.request_redraw(RedrawFlag::Main);
        DispatchResult::Continue
    }

    fn close_detail(state: &mut AppState) {
        state.detail = None;
        state.ui.mode = UIMode::Browse;
        state.reload_list();
        state.ui.request_redraw(RedrawFlag::All);
    }

    fn toggle_edit_mode(state: &mut AppState) -> DispatchResult {
        let Some(detail) = state.detail.as_mut() else {
            return DispatchResult::NotHandled;
        };

        detail.toggle_edit_mode();
        state.ui.mode = if detail.is_edit_mode() {
            UIMode::Edit
        } else {
            UIMode::Detail
        };
        state.ui.request_redraw(RedrawFlag::Main);
        DispatchResult::Continue
    }

    fn power_action(state: &mut AppState, restart: bool) -> DispatchResult {
        let Some(detail) = state.detail.as_mut() else {
            return DispatchResult::NotHandled;
        };

        let applied = if restart {
            detail.restart(&mut state.store)
        } else {
            detail.shut_down(&mut state.store)
        };

        if !applied {
            warn!(
                marker = "DETAIL_POWER_MISSING",
                id = %detail.server().id,
                "Server no longer exists"
            );
            return DispatchResult::NotHandled;
        }

        detail.sync_chart(&state.translator, AppState::now_ms(), &mut state.rng);
        info!(
            marker = "DETAIL_POWER_ACTION",
            operation_type = "power",
            id = %detail.server().id,
            restart,
            "Power state changed"
        );

        let key = if restart {
            "SERVER_DETAIL.RESTARTED"
        } else {
            "SERVER_DETAIL.SHUT_DOWN_DONE"
        };
        let replaced = state.ui.show_success(state.translator.instant(key));
        state.retire_notification(replaced);
        state.ui.request_redraw(RedrawFlag::Main);
        DispatchResult::Continue
    }
}

impl ActionHandler for DetailDispatcher {
    fn can_handle(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::OpenAddServer
                | Action::FormInput(_)
                | Action::FormBackspace
                | Action::FormCycleChoice { .. }
                | Action::FormFocusNext
                | Action::FormFocusPrev
                | Action::SubmitForm
                | Action::CancelForm
                | Action::CloseDetail
                | Action::ToggleEditMode
                | Action::RestartServer
                | Action::ShutdownServer
        )
    }

    async fn handle(
        &mut self,
        state: &mut AppState,
        action: Action,
    ) -> Result<DispatchResult, AppError> {
        let result = match action {
            Action::OpenAddServer => Self::open_add_server(state),
            Action::SubmitForm if state.ui.overlay == UIOverlay::AddServer => {
                Self::submit_add(state)
            }
            Action::SubmitForm => Self::submit_edit(state),
            Action::CancelForm => Self::cancel_form(state),
            Action::CloseDetail => {
                Self::close_detail(state);
                DispatchResult::Continue
            }
            Action::ToggleEditMode => Self::toggle_edit_mode(state),
            Action::RestartServer => Self::power_action(state, true),
            Action::ShutdownServer => Self::power_action(state, false),
            _ => Self::handle_form_input(state, &action),
        };

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "detail"
    }
}
