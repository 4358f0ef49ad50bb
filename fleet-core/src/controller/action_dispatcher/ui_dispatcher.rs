//! action_dispatcher/ui_dispatcher.rs
//! Overlays, preferences, notifications and ticks

use std::time::Instant;

use tracing::info;

use super::{ActionHandler, DispatchResult};
use crate::controller::Action;
use crate::error::AppError;
use crate::model::app_state::AppState;
use crate::model::ui_state::{RedrawFlag, UIOverlay};

/// UI control dispatcher for overlays and interface state
#[derive(Debug, Default)]
pub struct UIControlDispatcher;

impl UIControlDispatcher {
    fn handle_overlay(state: &mut AppState, action: &Action) -> DispatchResult {
        match action {
            Action::ToggleHelp => {
                if state.ui.overlay == UIOverlay::Help {
                    state.ui.close_overlay();
                } else {
                    state.ui.open_overlay(UIOverlay::Help);
                }
            }

            // Dismissing the confirm dialog is a cancel.
            Action::CloseOverlay if state.ui.overlay == UIOverlay::Confirm => {
                state.queue(Action::ConfirmDialog(false));
            }

            Action::CloseOverlay => state.ui.close_overlay(),

            _ => return DispatchResult::NotHandled,
        }

        DispatchResult::Continue
    }

    async fn cycle_theme(state: &mut AppState) -> Result<DispatchResult, AppError> {
        let theme = state.ui.theme.next();
        state.ui.set_theme(theme);

        let name = state.translator.instant(theme.label_key());
        let message = state
            .translator
            .instant_with("APP.THEME_CHANGED", &[("theme", name.as_str())]);
        let replaced = state.ui.show_info(message);
        state.retire_notification(replaced);

        info!(marker = "THEME_CHANGED", operation_type = "preferences", %theme, "Theme switched");

        // Saving last: a failed write still leaves the switch applied.
        state.persist_preferences().await?;
        Ok(DispatchResult::Continue)
    }

    async fn cycle_language(state: &mut AppState) -> Result<DispatchResult, AppError> {
        let language = state.translator.current().next();
        state.translator.use_language(language);

        state.list.refresh_labels(&state.translator);
        if let Some(detail) = state.detail.as_mut() {
            detail.sync_chart(&state.translator, AppState::now_ms(), &mut state.rng);
        }

        let message = state.translator.instant_with(
            "APP.LANGUAGE_CHANGED",
            &[("language", language.native_name())],
        );
        let replaced = state.ui.show_success(message);
        state.retire_notification(replaced);
        state.ui.request_redraw(RedrawFlag::All);

        info!(
            marker = "LANGUAGE_CHANGED",
            operation_type = "preferences",
            %language,
            "Language switched"
        );

        state.persist_preferences().await?;
        Ok(DispatchResult::Continue)
    }

    fn handle_notification(state: &mut AppState, action: &Action) -> DispatchResult {
        match action {
            Action::DismissNotification => {
                let gone = state.ui.dismiss_notification();
                state.retire_notification(gone);
            }

            Action::InvokeNotificationAction => {
                if let Some(follow_up) = state.ui.take_notification_action() {
                    state.queue(follow_up);
                }
            }

            Action::Tick => {
                let expired = state.ui.update_notification(Instant::now());
                state.retire_notification(expired);
            }

            _ => return DispatchResult::NotHandled,
        }

        DispatchResult::Continue
    }
}

impl ActionHandler for UIControlDispatcher {
    fn can_handle(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::ToggleHelp
                | Action::CloseOverlay
                | Action::CycleTheme
                | Action::CycleLanguage
                | Action::DismissNotification
                | Action::InvokeNotificationAction
                | Action::Tick
                | Action::Quit
                | Action::NoOp
        )
    }

    async fn handle(
        &mut self,
        state: &mut AppState,
        action: Action,
    ) -> Result<DispatchResult, AppError> {
        match action {
            Action::Quit => Ok(DispatchResult::Terminate),
            Action::NoOp => Ok(DispatchResult::Continue),
            Action::CycleTheme => Self::cycle_theme(state).await,
            Action::CycleLanguage => Self::cycle_language(state).await,
            Action::ToggleHelp | Action::CloseOverlay => Ok(Self::handle_overlay(state, &action)),
            _ => Ok(Self::handle_notification(state, &action)),
        }
    }

    fn name(&self) -> &'static str {
        "ui_control"
    }
}
