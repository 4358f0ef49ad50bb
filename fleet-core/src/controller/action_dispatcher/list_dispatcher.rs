// fleet-core/src/controller/action_dispatcher/list_dispatcher.rs
// Filters, debounced search, sort, row selection and opening the detail view

use tracing::{debug, warn};

use super::{ActionHandler, DispatchResult};
use crate::controller::Action;
use crate::controller::server_detail::ServerDetailController;
use crate::error::AppError;
use crate::model::app_state::AppState;
use crate::model::ui_state::{RedrawFlag, UIMode};

#[derive(Debug, Default)]
pub struct ListDispatcher;

impl ListDispatcher {
    /// A term the search pipeline decided to apply now.
    fn apply_term(state: &mut AppState, term: Option<String>) {
        if let Some(term) = term {
            state.list.set_search_term(term);
            state.ui.clamp_cursor(state.list.visible().len());
            state.ui.request_redraw(RedrawFlag::Main);
        }
        state.ui.request_redraw(RedrawFlag::StatusBar);
    }

    fn handle_search(state: &mut AppState, action: Action) -> DispatchResult {
        match action {
            Action::FocusSearch => state.ui.mode = UIMode::Search,
            Action::ExitSearch => state.ui.mode = UIMode::Browse,

            Action::SearchInput(c) => {
                let term = state.search.push_char(c);
                Self::apply_term(state, term);
            }

            Action::SearchBackspace => {
                let term = state.search.backspace();
                Self::apply_term(state, term);
            }

            Action::SearchCleared => {
                let term = state.search.clear();
                Self::apply_term(state, term);
                state.ui.mode = UIMode::Browse;
            }

            Action::SearchSettled(term) => {
                let term = state.search.settle(term);
                Self::apply_term(state, term);
            }

            _ => return DispatchResult::NotHandled,
        }

        state.ui.request_redraw(RedrawFlag::StatusBar);
        DispatchResult::Continue
    }

    fn handle_criteria(state: &mut AppState, action: Action) -> DispatchResult {
        match action {
            Action::CycleStatusFilter => state.list.cycle_status_filter(),
            Action::CycleLocationFilter => state.list.cycle_location_filter(),

            Action::ToggleSearchField => {
                let refiltered = state.list.toggle_search_field();
                debug!(
                    marker = "SEARCH_FIELD_CHANGED",
                    field = %state.list.criteria.search_field,
                    refiltered,
                    "Search field switched"
                );
            }

            Action::ClearAllFilters => {
                // Also empties the search box and drops a pending term.
                state.search.reset();
                state.list.clear_all_filters();
            }

            Action::SortBy(column) => state.list.sort(column),

            _ => return DispatchResult::NotHandled,
        }

        state.ui.clamp_cursor(state.list.visible().len());
        state.ui.request_redraw(RedrawFlag::All);
        DispatchResult::Continue
    }

    fn handle_selection(state: &mut AppState, action: &Action) -> DispatchResult {
        match action {
            Action::ToggleRowSelection => {
                let Some(id) = state.current_server().map(|s| s.id.clone()) else {
                    return DispatchResult::NotHandled;
                };
                state.list.toggle_row(&id);
            }
            Action::ToggleSelectAll => state.list.toggle_select_all(),
            _ => return DispatchResult::NotHandled,
        }

        state.ui.request_redraw(RedrawFlag::Main);
        state.ui.request_redraw(RedrawFlag::StatusBar);
        DispatchResult::Continue
    }

    fn open_detail(state: &mut AppState) -> DispatchResult {
        let Some(id) = state.current_server().map(|s| s.id.clone()) else {
            return DispatchResult::NotHandled;
        };

        match ServerDetailController::open(
            &id,
            &state.store,
            &state.translator,
            AppState::now_ms(),
            &mut state.rng,
        ) {
            Some(detail) => {
                state.detail = Some(detail);
                state.ui.mode = UIMode::Detail;
            }
            None => {
                warn!(marker = "OPEN_DETAIL_MISSING", %id, "Row no longer in store");
                let message = state
                    .translator
                    .instant_with("SERVER_DETAIL.NOT_FOUND", &[("id", id.as_str())]);
                let replaced = state.ui.show_warning(message);
                state.retire_notification(replaced);
                state.reload_list();
            }
        }

        state.ui.request_redraw(RedrawFlag::All);
        DispatchResult::Continue
    }
}

impl ActionHandler for ListDispatcher {
    fn can_handle(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::FocusSearch
                | Action::ExitSearch
                | Action::SearchInput(_)
                | Action::SearchBackspace
                | Action::SearchCleared
                | Action::SearchSettled(_)
                | Action::CycleStatusFilter
                | Action::CycleLocationFilter
                | Action::ToggleSearchField
                | Action::ClearAllFilters
                | Action::SortBy(_)
                | Action::ToggleRowSelection
                | Action::ToggleSelectAll
                | Action::OpenDetail
        )
    }

    async fn handle(
        &mut self,
        state: &mut AppState,
        action: Action,
    ) -> Result<DispatchResult, AppError> {
        let result = match action {
            Action::OpenDetail => Self::open_detail(state),
            Action::ToggleRowSelection | Action::ToggleSelectAll => {
                Self::handle_selection(state, &action)
            }
            Action::CycleStatusFilter
            | Action::CycleLocationFilter
            | Action::ToggleSearchField
            | Action::ClearAllFilters
            | Action::SortBy(_) => Self::handle_criteria(state, action),
            _ => Self::handle_search(state, action),
        };

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "list"
    }
}
