//! src/controller/server_detail.rs
//! ============================================================================
//! # Detail / edit controller
//!
//! One open server: its latest copy from the store, the edit form and the
//! CPU chart. The record is re-read from the store after every mutation so
//! the view never shows a stale copy.

use rand::Rng;
use tracing::{info, instrument, warn};

use crate::i18n::Translator;
use crate::model::cpu_chart::CpuChart;
use crate::model::form::ServerForm;
use crate::model::server::{Server, ServerStatus};
use crate::model::store::ServerStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Validation failed; every field is now marked touched.
    Invalid,
    /// The record disappeared from the store.
    Missing,
}

#[derive(Debug)]
pub struct ServerDetailController {
    server: Server,
    edit_mode: bool,
    pub form: ServerForm,
    pub chart: CpuChart,
}

impl ServerDetailController {
    /// `None` when `id` is not in the store; the caller stays on the list.
    #[instrument(level = "debug", skip(store, translator, rng))]
    pub fn open<R: Rng + ?Sized>(
        id: &str,
        store: &ServerStore,
        translator: &Translator,
        now_ms: i64,
        rng: &mut R,
    ) -> Option<Self> {
        let Some(server) = store.get_by_id(id) else {
            warn!(marker = "DETAIL_NOT_FOUND", id, "Server not found");
            return None;
        };

        Some(Self {
            form: ServerForm::from_server(&server),
            chart: CpuChart::new(&server, translator, now_ms, rng),
            server,
            edit_mode: false,
        })
    }

    #[must_use]
    pub const fn server(&self) -> &Server {
        &self.server
    }

    #[must_use]
    pub const fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Enter or leave edit mode. Entering starts from the current record.
    pub fn toggle_edit_mode(&mut self) {
        self.edit_mode = !self.edit_mode;
        if self.edit_mode {
            self.form = ServerForm::from_server(&self.server);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_mode = false;
        self.form = ServerForm::from_server(&self.server);
    }

    pub fn save_changes(&mut self, store: &mut ServerStore) -> SaveOutcome {
        let Some(patch) = self.form.to_patch() else {
            self.form.mark_all_touched();
            return SaveOutcome::Invalid;
        };

        let Some(updated) = store.update(&self.server.id, patch) else {
            warn!(marker = "DETAIL_SAVE_MISSING", id = %self.server.id, "Save for removed server");
            return SaveOutcome::Missing;
        };

        info!(marker = "SERVER_UPDATED", operation_type = "edit", id = %updated.id, "Server saved");
        self.server = updated;
        self.edit_mode = false;
        self.form = ServerForm::from_server(&self.server);
        SaveOutcome::Saved
    }

    /// Set running and reset uptime. `false` when the record is gone.
    pub fn restart(&mut self, store: &mut ServerStore) -> bool {
        self.set_power_state(store, ServerStatus::Running)
    }

    pub fn shut_down(&mut self, store: &mut ServerStore) -> bool {
        self.set_power_state(store, ServerStatus::Stopped)
    }

    fn set_power_state(&mut self, store: &mut ServerStore, status: ServerStatus) -> bool {
        if store.set_power_state(std::slice::from_ref(&self.server.id), status) == 0 {
            return false;
        }
        self.reload(store)
    }

    /// Re-read the record. `false` when it no longer exists.
    pub fn reload(&mut self, store: &ServerStore) -> bool {
        match store.get_by_id(&self.server.id) {
            Some(server) => {
                self.server = server;
                true
            }
            None => false,
        }
    }

    /// Bring the chart in line with the record and the active language.
    pub fn sync_chart<R: Rng + ?Sized>(
        &mut self,
        translator: &Translator,
        now_ms: i64,
        rng: &mut R,
    ) -> bool {
        let server_changed = self.chart.sync_server(&self.server, translator, now_ms, rng);
        let language_changed = self.chart.refresh_if_language_changed(translator, now_ms, rng);
        server_changed || language_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::model::form::{FormField, REQUIRED};
    use rand::{SeedableRng, rngs::SmallRng};

    const NOW: i64 = 1_700_000_000_000;

    fn setup() -> (ServerStore, Translator, SmallRng) {
        (
            ServerStore::seeded().expect("fixture"),
            Translator::new(Language::En).expect("catalogs"),
            SmallRng::seed_from_u64(3),
        )
    }

    fn open(
        id: &str,
        store: &ServerStore,
        translator: &Translator,
        rng: &mut SmallRng,
    ) -> ServerDetailController {
        ServerDetailController::open(id, store, translator, NOW, rng).expect("open")
    }

    #[test]
    fn test_open_missing_returns_none() {
        let (store, translator, mut rng) = setup();
        let opened = ServerDetailController::open("srv-999", &store, &translator, NOW, &mut rng);
        assert!(opened.is_none());
    }

    #[test]
    fn test_save_updates_store_and_leaves_edit_mode() {
        let (mut store, translator, mut rng) = setup();
        let mut detail = open("srv-001", &store, &translator, &mut rng);

        detail.toggle_edit_mode();
        detail.form.hostname = "web-prod-99".into();
        assert_eq!(detail.save_changes(&mut store), SaveOutcome::Saved);

        assert!(!detail.is_edit_mode());
        assert_eq!(detail.server().hostname, "web-prod-99");
        assert_eq!(store.get_by_id("srv-001").map(|s| s.hostname), Some("web-prod-99".into()));
        assert_eq!(detail.server().status, ServerStatus::Running);
    }

    #[test]
    fn test_invalid_save_marks_fields_touched() {
        let (mut store, translator, mut rng) = setup();
        let mut detail = open("srv-002", &store, &translator, &mut rng);

        detail.toggle_edit_mode();
        detail.form.hostname.clear();
        assert!(!detail.form.is_touched(FormField::Hostname));

        assert_eq!(detail.save_changes(&mut store), SaveOutcome::Invalid);
        assert!(detail.is_edit_mode());
        assert_eq!(detail.form.visible_error(FormField::Hostname).map(|e| e.key), Some(REQUIRED));
        assert_eq!(store.get_by_id("srv-002").map(|s| s.hostname), Some("db-master-01".into()));
    }

    #[test]
    fn test_cancel_restores_form() {
        let (store, translator, mut rng) = setup();
        let mut detail = open("srv-003", &store, &translator, &mut rng);

        detail.toggle_edit_mode();
        detail.form.os = "Plan 9".into();
        detail.cancel_edit();

        assert!(!detail.is_edit_mode());
        assert_eq!(detail.form.os, "Debian 12");
    }

    #[test]
    fn test_restart_and_shutdown_reset_uptime() {
        let (mut store, translator, mut rng) = setup();
        let mut detail = open("srv-001", &store, &translator, &mut rng);
        assert_eq!(detail.server().uptime_hours, 1420);

        assert!(detail.shut_down(&mut store));
        assert_eq!(detail.server().status, ServerStatus::Stopped);
        assert_eq!(detail.server().uptime_hours, 0);

        assert!(detail.restart(&mut store));
        assert_eq!(detail.server().status, ServerStatus::Running);
        assert!(detail.sync_chart(&translator, NOW, &mut rng));
        assert_eq!(detail.chart.points.len(), 2);
    }

    #[test]
    fn test_power_actions_noop_when_record_absent() {
        let (mut store, translator, mut rng) = setup();
        let mut detail = open("srv-004", &store, &translator, &mut rng);
        store.delete_by_ids(&["srv-004".into()]);

        assert!(!detail.restart(&mut store));
        assert_eq!(detail.server().status, ServerStatus::Maintenance);
        assert_eq!(detail.save_changes(&mut store), SaveOutcome::Missing);
    }
}
