// fleet-core/src/model/app_state.rs
// Single owner of everything the event loop mutates

use std::collections::VecDeque;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::controller::actions::Action;
use crate::controller::bulk::BulkCoordinator;
use crate::controller::search::SearchPipeline;
use crate::controller::server_detail::ServerDetailController;
use crate::controller::server_list::ServerListController;
use crate::error::AppError;
use crate::i18n::Translator;
use crate::model::server::Server;
use crate::model::store::ServerStore;
use crate::model::ui_state::{Notification, RedrawFlag, UIState};
use crate::util::debounce::DebounceConfig;

#[derive(Debug)]
pub struct AppState {
    pub config: Config,

    /// Where preferences are written back; `None` keeps them in memory.
    pub config_path: Option<PathBuf>,

    pub store: ServerStore,
    pub translator: Translator,

    pub list: ServerListController,
    pub detail: Option<ServerDetailController>,
    pub bulk: BulkCoordinator,
    pub search: SearchPipeline,

    pub ui: UIState,

    /// Chart jitter source.
    pub rng: SmallRng,

    /// Actions queued by the dispatcher itself (notification dismissals).
    follow_ups: VecDeque<Action>,
}

impl AppState {
    /// State over the seeded fixture. The receiver yields settled search
    /// terms and belongs to the event loop.
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
    ) -> Result<(Self, UnboundedReceiver<String>), AppError> {
        Self::with_store(config, config_path, ServerStore::seeded()?)
    }

    #[instrument(level = "info", skip_all, fields(servers = store.len()))]
    pub fn with_store(
        config: Config,
        config_path: Option<PathBuf>,
        store: ServerStore,
    ) -> Result<(Self, UnboundedReceiver<String>), AppError> {
        let translator = Translator::new(config.ui.language)?;
        let list = ServerListController::new(&translator, config.search.min_search_length);
        let (search, search_rx) =
            SearchPipeline::new(DebounceConfig::with_delay(config.search.debounce));
        let ui = UIState::new(config.ui.theme, config.notifications.clone());

        let mut state = Self {
            config,
            config_path,
            store,
            translator,
            list,
            detail: None,
            bulk: BulkCoordinator::new(),
            search,
            ui,
            rng: SmallRng::from_os_rng(),
            follow_ups: VecDeque::new(),
        };
        state.reload_list();

        info!(
            marker = "APP_STATE_READY",
            language = %state.translator.current(),
            theme = %state.ui.theme,
            "Application state initialized"
        );
        Ok((state, search_rx))
    }

    /// Re-read the store into the list and keep the cursor in range.
    pub fn reload_list(&mut self) {
        self.list.load_servers(&self.store);
        self.ui.clamp_cursor(self.list.visible().len());
        self.ui.request_redraw(RedrawFlag::Main);
    }

    /// Row under the cursor.
    #[must_use]
    pub fn current_server(&self) -> Option<&Server> {
        self.list.server_at(self.ui.cursor)
    }

    /// Record a notification that just went away so its dismiss action runs.
    pub fn retire_notification(&mut self, gone: Option<Notification>) {
        if let Some(action) = gone.as_ref().and_then(Notification::dismiss_action) {
            self.follow_ups.push_back(action);
        }
    }

    pub fn queue(&mut self, action: Action) {
        self.follow_ups.push_back(action);
    }

    pub fn next_follow_up(&mut self) -> Option<Action> {
        self.follow_ups.pop_front()
    }

    /// Write theme and language back to the config file.
    pub async fn persist_preferences(&mut self) -> Result<(), AppError> {
        self.config.ui.theme = self.ui.theme;
        self.config.ui.language = self.translator.current();

        let Some(path) = self.config_path.as_deref() else {
            warn!(marker = "PREFS_NOT_PERSISTED", "No config path; preferences kept in memory");
            return Ok(());
        };
        self.config.save_to(path).await
    }

    /// Wall clock in epoch milliseconds for chart timestamps.
    #[must_use]
    pub fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeName;
    use crate::i18n::Language;
    use crate::model::ui_state::NotificationAction;

    #[tokio::test]
    async fn test_new_state_loads_fixture() {
        let (state, _rx) = AppState::new(Config::default(), None).expect("state");
        assert_eq!(state.list.visible().len(), 12);
        assert!(state.current_server().is_some());
        assert!(state.detail.is_none());
    }

    #[tokio::test]
    async fn test_retired_notification_queues_dismiss_action() {
        let (mut state, _rx) = AppState::new(Config::default(), None).expect("state");
        state.ui.show_warning_with_action(
            "gone",
            NotificationAction::new("Undo", Action::ToggleHelp).on_dismiss(Action::NoOp),
        );

        let replaced = state.ui.show_info("next");
        state.retire_notification(replaced);

        assert_eq!(state.next_follow_up(), Some(Action::NoOp));
        assert_eq!(state.next_follow_up(), None);
    }

    #[tokio::test]
    async fn test_preferences_written_to_config_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let (mut state, _rx) =
            AppState::new(Config::default(), Some(path.clone())).expect("state");

        state.ui.set_theme(ThemeName::Green);
        state.translator.use_language(Language::Fr);
        state.persist_preferences().await.expect("persist");

        let saved = Config::load_from(&path).await.expect("load");
        assert_eq!(saved.ui.theme, ThemeName::Green);
        assert_eq!(saved.ui.language, Language::Fr);
    }
}
