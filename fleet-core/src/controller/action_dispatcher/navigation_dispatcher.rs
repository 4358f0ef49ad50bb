// fleet-core/src/controller/action_dispatcher/navigation_dispatcher.rs
// Cursor movement over the visible list

use super::{ActionHandler, DispatchResult};
use crate::controller::Action;
use crate::error::AppError;
use crate::model::app_state::AppState;
use crate::model::ui_state::RedrawFlag;

/// Rows taken by the title, filter bar, table header, borders and status bar.
const CHROME_ROWS: u16 = 9;

#[derive(Debug, Default)]
pub struct NavigationDispatcher;

impl NavigationDispatcher {
    fn handle_selection(state: &mut AppState, action: &Action) -> DispatchResult {
        let len = state.list.visible().len();
        let page = isize::try_from(state.ui.viewport_rows.max(1)).unwrap_or(isize::MAX);

        match action {
            Action::MoveUp => state.ui.move_cursor(-1, len),
            Action::MoveDown => state.ui.move_cursor(1, len),
            Action::PageUp => state.ui.move_cursor(-page, len),
            Action::PageDown => state.ui.move_cursor(page, len),
            Action::SelectFirst => {
                state.ui.cursor = 0;
                state.ui.request_redraw(RedrawFlag::Main);
            }
            Action::SelectLast => {
                state.ui.cursor = len.saturating_sub(1);
                state.ui.request_redraw(RedrawFlag::Main);
            }
            _ => return DispatchResult::NotHandled,
        }

        DispatchResult::Continue
    }
}

impl ActionHandler for NavigationDispatcher {
    fn can_handle(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::MoveUp
                | Action::MoveDown
                | Action::PageUp
                | Action::PageDown
                | Action::SelectFirst
                | Action::SelectLast
                | Action::Resize(..)
        )
    }

    async fn handle(
        &mut self,
        state: &mut AppState,
        action: Action,
    ) -> Result<DispatchResult, AppError> {
        if let Action::Resize(_width, height) = action {
            state.ui.viewport_rows = usize::from(height.saturating_sub(CHROME_ROWS));
            state.ui.request_redraw(RedrawFlag::All);
            return Ok(DispatchResult::Continue);
        }

        Ok(Self::handle_selection(state, &action))
    }

    fn name(&self) -> &'static str {
        "navigation"
    }
}
