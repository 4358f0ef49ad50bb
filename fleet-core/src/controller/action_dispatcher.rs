//! ActionDispatcher: modular action processing.
//!
//! Every state change in the console happens here. Actions are routed to
//! the first sub-dispatcher whose `can_handle` accepts them:
//! - `UIControlDispatcher`: overlays, theme/language, notifications, ticks
//! - `NavigationDispatcher`: cursor movement and resize
//! - `ListDispatcher`: filters, search, sort, row selection, opening detail
//! - `BulkDispatcher`: delete/undo and the restart/shutdown bulk actions
//! - `DetailDispatcher`: the detail view and both server forms
//!
//! Handlers may queue follow-up actions on `AppState` (for example the
//! discard of an undo whose notification was replaced); those run before
//! `handle` returns.

use tracing::{debug, error, info, instrument};

use crate::controller::Action;
use crate::error::AppError;
use crate::model::app_state::AppState;

mod bulk_dispatcher;
mod detail_dispatcher;
mod list_dispatcher;
mod navigation_dispatcher;
mod ui_dispatcher;

pub use bulk_dispatcher::BulkDispatcher;
pub use detail_dispatcher::DetailDispatcher;
pub use list_dispatcher::ListDispatcher;
pub use navigation_dispatcher::NavigationDispatcher;
pub use ui_dispatcher::UIControlDispatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    Continue,
    Terminate,
    NotHandled,
}

/// One slice of the action space.
#[allow(async_fn_in_trait)]
pub trait ActionHandler {
    fn can_handle(&self, action: &Action) -> bool;

    async fn handle(
        &mut self,
        state: &mut AppState,
        action: Action,
    ) -> Result<DispatchResult, AppError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Default)]
pub struct ActionDispatcher {
    ui: UIControlDispatcher,
    navigation: NavigationDispatcher,
    list: ListDispatcher,
    bulk: BulkDispatcher,
    detail: DetailDispatcher,
}

impl ActionDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action` and any follow-ups it queued. Errors are reported as
    /// an error notification; the console keeps running.
    #[instrument(level = "trace", skip(self, state))]
    pub async fn handle(&mut self, state: &mut AppState, action: Action) -> DispatchResult {
        let mut next = Some(action);

        while let Some(action) = next.take() {
            if self.apply(state, action).await == DispatchResult::Terminate {
                return DispatchResult::Terminate;
            }
            next = state.next_follow_up();
        }

        DispatchResult::Continue
    }

    async fn apply(&mut self, state: &mut AppState, action: Action) -> DispatchResult {
        if action.is_high_frequency() {
            debug!(marker = "ACTION_DISPATCH", action = ?action, "Dispatching action");
        } else {
            info!(
                marker = "ACTION_DISPATCH",
                operation_type = "dispatch",
                action = ?action,
                "Dispatching action"
            );
        }

        let outcome = if self.ui.can_handle(&action) {
            (self.ui.name(), self.ui.handle(state, action).await)
        } else if self.navigation.can_handle(&action) {
            (self.navigation.name(), self.navigation.handle(state, action).await)
        } else if self.list.can_handle(&action) {
            (self.list.name(), self.list.handle(state, action).await)
        } else if self.bulk.can_handle(&action) {
            (self.bulk.name(), self.bulk.handle(state, action).await)
        } else if self.detail.can_handle(&action) {
            (self.detail.name(), self.detail.handle(state, action).await)
        } else {
            ("none", Ok(DispatchResult::NotHandled))
        };

        match outcome {
            (_, Ok(DispatchResult::Terminate)) => DispatchResult::Terminate,

            (handler, Ok(DispatchResult::NotHandled)) => {
                debug!(marker = "ACTION_NOT_HANDLED", handler, "Action had no effect");
                DispatchResult::Continue
            }

            (_, Ok(DispatchResult::Continue)) => DispatchResult::Continue,

            (handler, Err(e)) => {
                error!(marker = "ACTION_FAILED", handler, error = %e, "Action failed");
                let replaced = state.ui.show_error(e.to_string());
                state.retire_notification(replaced);
                DispatchResult::Continue
            }
        }
    }
}
