//! src/controller/server_list.rs
//! ============================================================================
//! # List view controller
//!
//! Owns the list's derived state: the copy of the collection, the visible
//! list (filtered, then sorted), the criteria, sort header state and the
//! row selection. Every criteria change goes through [`apply_filters`],
//! which also prunes the selection to the new visible list.
//!
//! [`apply_filters`]: ServerListController::apply_filters

use tracing::{debug, info, instrument};

use crate::engine::filter::{FilterCriteria, SearchField, filter_servers_with};
use crate::engine::sort::{SortColumn, SortState, sort_servers};
use crate::i18n::{LanguageSubscription, Translator};
use crate::model::selection::SelectionTracker;
use crate::model::server::{Location, Server, ServerStatus};
use crate::model::store::ServerStore;

/// Localized labels for the dropdown-style filters. `None` entries are the
/// "all" choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterLabels {
    pub statuses: Vec<(Option<ServerStatus>, String)>,
    pub locations: Vec<(Option<Location>, String)>,
    pub search_fields: Vec<(SearchField, String)>,
}

impl FilterLabels {
    #[must_use]
    pub fn localized(translator: &Translator) -> Self {
        let statuses = std::iter::once((None, translator.instant("SERVER_LIST.ALL_STATUSES")))
            .chain(
                ServerStatus::ALL
                    .into_iter()
                    .map(|s| (Some(s), translator.instant(s.label_key()))),
            )
            .collect();

        // Datacenter codes are not translated.
        let locations = std::iter::once((None, translator.instant("SERVER_LIST.ALL_LOCATIONS")))
            .chain(
                Location::ALL
                    .into_iter()
                    .map(|l| (Some(l), l.as_str().to_string())),
            )
            .collect();

        let search_fields = SearchField::ALL
            .into_iter()
            .map(|f| (f, translator.instant(f.label_key())))
            .collect();

        Self {
            statuses,
            locations,
            search_fields,
        }
    }

    #[must_use]
    pub fn status_label(&self, status: Option<ServerStatus>) -> &str {
        self.statuses
            .iter()
            .find(|(s, _)| *s == status)
            .map_or("", |(_, label)| label.as_str())
    }

    #[must_use]
    pub fn location_label(&self, location: Option<Location>) -> &str {
        self.locations
            .iter()
            .find(|(l, _)| *l == location)
            .map_or("", |(_, label)| label.as_str())
    }

    #[must_use]
    pub fn search_field_label(&self, field: SearchField) -> &str {
        self.search_fields
            .iter()
            .find(|(f, _)| *f == field)
            .map_or("", |(_, label)| label.as_str())
    }
}

#[derive(Debug)]
pub struct ServerListController {
    servers: Vec<Server>,
    visible: Vec<Server>,
    pub criteria: FilterCriteria,
    pub sort: SortState,
    pub selection: SelectionTracker,
    pub labels: FilterLabels,
    language: LanguageSubscription,
    min_search_length: usize,
}

impl ServerListController {
    pub fn new(translator: &Translator, min_search_length: usize) -> Self {
        Self {
            servers: Vec::new(),
            visible: Vec::new(),
            criteria: FilterCriteria::default(),
            sort: SortState::default(),
            selection: SelectionTracker::new(),
            labels: FilterLabels::localized(translator),
            language: translator.subscribe(),
            min_search_length,
        }
    }

    /// Take a fresh copy of the collection and recompute the visible list.
    #[instrument(level = "debug", skip_all)]
    pub fn load_servers(&mut self, store: &ServerStore) {
        self.servers = store.get_all();
        debug!(marker = "LIST_LOADED", total = self.servers.len(), "Server list reloaded");
        self.apply_filters();
    }

    /// Filter, then sort, then prune the selection to what is visible.
    pub fn apply_filters(&mut self) {
        let filtered = filter_servers_with(&self.servers, &self.criteria, self.min_search_length);
        self.visible = sort_servers(&filtered, self.sort.column, self.sort.direction);

        let pruned = self.selection.prune(&self.visible);
        debug!(
            marker = "LIST_FILTERED",
            operation_type = "filter",
            visible = self.visible.len(),
            total = self.servers.len(),
            pruned,
            "Visible list recomputed"
        );
    }

    pub fn on_status_filter_change(&mut self, status: Option<ServerStatus>) {
        self.criteria.status = status;
        self.apply_filters();
    }

    pub fn on_location_filter_change(&mut self, location: Option<Location>) {
        self.criteria.location = location;
        self.apply_filters();
    }

    /// All → running → stopped → maintenance → all.
    pub fn cycle_status_filter(&mut self) {
        let next = cycle_option(&ServerStatus::ALL, self.criteria.status);
        self.on_status_filter_change(next);
    }

    pub fn cycle_location_filter(&mut self) {
        let next = cycle_option(&Location::ALL, self.criteria.location);
        self.on_location_filter_change(next);
    }

    /// Apply a settled search term.
    pub fn set_search_term(&mut self, term: String) {
        self.criteria.search_term = term;
        self.apply_filters();
    }

    /// Switch hostname/os. Only refilters when the applied term already
    /// qualifies; returns whether it did.
    pub fn on_search_field_change(&mut self, field: SearchField) -> bool {
        self.criteria.search_field = field;
        if !self.criteria.search_active(self.min_search_length) {
            return false;
        }
        self.apply_filters();
        true
    }

    pub fn toggle_search_field(&mut self) -> bool {
        self.on_search_field_change(self.criteria.search_field.toggled())
    }

    /// Header click on `column`.
    pub fn sort(&mut self, column: SortColumn) {
        self.sort.click(column);
        info!(
            marker = "LIST_SORTED",
            operation_type = "sort",
            column = ?self.sort.column,
            direction = %self.sort.direction,
            "Sort changed"
        );
        self.apply_filters();
    }

    /// Reset status, location and search term. The search field choice is
    /// kept.
    pub fn clear_all_filters(&mut self) {
        self.criteria = FilterCriteria {
            search_field: self.criteria.search_field,
            ..FilterCriteria::default()
        };
        self.apply_filters();
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.criteria.is_active()
    }

    /// Rebuild the dropdown labels if the language changed.
    pub fn refresh_labels(&mut self, translator: &Translator) -> bool {
        if self.language.changed().is_none() {
            return false;
        }
        self.labels = FilterLabels::localized(translator);
        true
    }

    pub fn toggle_row(&mut self, id: &str) {
        self.selection.flip(id);
    }

    /// Header checkbox: select every visible row, or clear when all are
    /// already selected.
    pub fn toggle_select_all(&mut self) {
        let included = !self.selection.all_selected(&self.visible);
        self.selection.select_all(&self.visible, included);
    }

    #[must_use]
    pub fn visible(&self) -> &[Server] {
        &self.visible
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.servers.len()
    }

    #[must_use]
    pub fn server_at(&self, row: usize) -> Option<&Server> {
        self.visible.get(row)
    }

    #[must_use]
    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(&self.visible)
    }

    #[must_use]
    pub fn some_selected(&self) -> bool {
        self.selection.some_selected(&self.visible)
    }
}

fn cycle_option<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => all
            .iter()
            .position(|v| *v == value)
            .and_then(|i| all.get(i + 1))
            .copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::filter::MIN_SEARCH_LENGTH;
    use crate::engine::sort::SortDirection;
    use crate::i18n::Language;

    fn loaded() -> (ServerListController, Translator) {
        let translator = Translator::new(Language::En).expect("catalogs");
        let store = ServerStore::seeded().expect("fixture");
        let mut list = ServerListController::new(&translator, MIN_SEARCH_LENGTH);
        list.load_servers(&store);
        (list, translator)
    }

    fn visible_ids(list: &ServerListController) -> Vec<&str> {
        list.visible().iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_initial_view_is_sorted_by_hostname() {
        let (list, _) = loaded();
        assert_eq!(list.visible().len(), 12);
        let hostnames: Vec<&str> = list.visible().iter().map(|s| s.hostname.as_str()).collect();
        let mut sorted = hostnames.clone();
        sorted.sort_unstable();
        assert_eq!(hostnames, sorted);
        assert_eq!(list.sort.indicator(SortColumn::Hostname), Some(SortDirection::Asc));
    }

    #[test]
    fn test_status_filter_prunes_selection() {
        let (mut list, _) = loaded();
        list.toggle_row("srv-001");
        list.toggle_row("srv-003");

        list.on_status_filter_change(Some(ServerStatus::Running));

        assert!(list.visible().iter().all(|s| s.status == ServerStatus::Running));
        assert!(list.selection.is_selected("srv-001"));
        assert!(!list.selection.is_selected("srv-003"));
    }

    #[test]
    fn test_selection_is_subset_after_every_change() {
        let (mut list, _) = loaded();
        list.toggle_select_all();
        assert!(list.all_selected());

        list.on_location_filter_change(Some(Location::DcEurope));
        list.set_search_term("eu-".into());
        list.sort(SortColumn::CpuCores);

        for id in list.selection.ids() {
            assert!(list.visible().iter().any(|s| s.id == id));
        }
    }

    #[test]
    fn test_short_search_term_does_not_filter() {
        let (mut list, _) = loaded();
        list.set_search_term("we".into());
        assert_eq!(list.visible().len(), 12);
        assert!(list.has_active_filters());

        list.set_search_term("WEB".into());
        assert_eq!(visible_ids(&list), vec!["srv-001", "srv-005"]);
    }

    #[test]
    fn test_search_field_change_reapplies_only_for_qualifying_term() {
        let (mut list, _) = loaded();

        list.set_search_term("ub".into());
        assert!(!list.on_search_field_change(SearchField::Os));
        assert_eq!(list.visible().len(), 12);

        list.on_search_field_change(SearchField::Hostname);
        list.set_search_term("ubuntu".into());
        assert!(list.visible().is_empty());

        assert!(list.on_search_field_change(SearchField::Os));
        assert!(!list.visible().is_empty());
        assert!(list
            .visible()
            .iter()
            .all(|s| s.os.to_lowercase().contains("ubuntu")));
    }

    #[test]
    fn test_clear_all_filters_keeps_search_field() {
        let (mut list, _) = loaded();
        list.cycle_status_filter();
        list.cycle_location_filter();
        list.toggle_search_field();
        list.set_search_term("deb".into());

        list.clear_all_filters();

        assert!(!list.has_active_filters());
        assert_eq!(list.criteria.search_field, SearchField::Os);
        assert_eq!(list.visible().len(), 12);
    }

    #[test]
    fn test_filter_cycles_wrap_to_all() {
        let (mut list, _) = loaded();
        for expected in [
            Some(ServerStatus::Running),
            Some(ServerStatus::Stopped),
            Some(ServerStatus::Maintenance),
            None,
        ] {
            list.cycle_status_filter();
            assert_eq!(list.criteria.status, expected);
        }
    }

    #[test]
    fn test_header_click_cycle_restores_original_order() {
        let (mut list, _) = loaded();
        list.sort(SortColumn::Hostname);
        assert_eq!(list.sort.direction, SortDirection::Desc);
        list.sort(SortColumn::Hostname);
        assert_eq!(list.sort.column, None);
        assert_eq!(list.visible().first().map(|s| s.id.as_str()), Some("srv-001"));
        assert_eq!(list.visible().last().map(|s| s.id.as_str()), Some("srv-012"));
    }

    #[test]
    fn test_select_all_toggles_off_when_everything_selected() {
        let (mut list, _) = loaded();
        list.toggle_select_all();
        assert_eq!(list.selection.len(), 12);
        list.toggle_select_all();
        assert!(list.selection.is_empty());
        list.toggle_row("srv-004");
        assert!(list.some_selected());
    }

    #[test]
    fn test_labels_follow_language() {
        let (mut list, translator) = loaded();
        assert_eq!(list.labels.status_label(Some(ServerStatus::Running)), "Running");
        assert!(!list.refresh_labels(&translator));

        translator.use_language(Language::De);
        assert!(list.refresh_labels(&translator));
        assert_eq!(
            list.labels.status_label(Some(ServerStatus::Running)),
            translator.instant("SERVER.STATUS.RUNNING")
        );
        assert_eq!(list.labels.location_label(Some(Location::DcWest)), "DC-West");
    }
}
