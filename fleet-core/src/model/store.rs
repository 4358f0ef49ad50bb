//! ``src/model/store.rs``
//! ============================================================================
//! # `ServerStore`: the fleet's system of record
//!
//! An in-process collection owned by `AppState` and lent to controllers.
//! Every read hands out copies so callers never alias the stored records.
//! Insertion order is kept; restored records go to the end.

use tracing::{debug, info, instrument};

use crate::error::AppError;
use crate::model::server::{Server, ServerId, ServerPatch, ServerStatus, generate_server_id};

const SEED_FIXTURE: &str = include_str!("../../assets/servers.json");

#[derive(Debug, Clone, Default)]
pub struct ServerStore {
    servers: Vec<Server>,
}

impl ServerStore {
    /// Empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            servers: Vec::new(),
        }
    }

    /// Store seeded from the bundled twelve-server fixture.
    pub fn seeded() -> Result<Self, AppError> {
        let servers: Vec<Server> = serde_json::from_str(SEED_FIXTURE)?;
        info!(
            marker = "STORE_SEEDED",
            operation_type = "store_init",
            count = servers.len(),
            "Server store seeded"
        );

        Ok(Self { servers })
    }

    #[must_use]
    pub fn from_servers(servers: Vec<Server>) -> Self {
        Self { servers }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Copy of every record, in store order.
    #[must_use]
    pub fn get_all(&self) -> Vec<Server> {
        self.servers.clone()
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<Server> {
        self.servers.iter().find(|s| s.id == id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.servers.iter().any(|s| s.id == id)
    }

    /// Append a new record with a generated id and defaults for unset fields.
    #[instrument(level = "debug", skip(self, patch))]
    pub fn create(&mut self, patch: ServerPatch) -> Server {
        let id = generate_server_id(&self.servers);
        let server = patch.into_server(id);

        info!(
            marker = "SERVER_CREATED",
            operation_type = "store_mutation",
            id = %server.id,
            hostname = %server.hostname,
            "Server created"
        );

        self.servers.push(server.clone());
        server
    }

    /// Merge the provided fields into the record with `id`.
    pub fn update(&mut self, id: &str, patch: ServerPatch) -> Option<Server> {
        let server = self.servers.iter_mut().find(|s| s.id == id)?;
        patch.apply_to(server);

        debug!(marker = "SERVER_UPDATED", operation_type = "store_mutation", id, "Server updated");
        Some(server.clone())
    }

    /// Remove every record whose id is listed. Unknown ids are ignored.
    pub fn delete_by_ids(&mut self, ids: &[ServerId]) -> usize {
        let before = self.servers.len();
        self.servers.retain(|s| !ids.contains(&s.id));
        let removed = before - self.servers.len();

        info!(
            marker = "SERVERS_DELETED",
            operation_type = "store_mutation",
            requested = ids.len(),
            removed,
            "Servers deleted"
        );
        removed
    }

    /// Re-insert previously removed records, skipping ids already present.
    pub fn restore_servers(&mut self, servers: Vec<Server>) -> usize {
        let mut restored = 0;
        for server in servers {
            if self.contains(&server.id) {
                debug!(marker = "RESTORE_SKIPPED", id = %server.id, "Id already present");
                continue;
            }
            self.servers.push(server);
            restored += 1;
        }

        info!(
            marker = "SERVERS_RESTORED",
            operation_type = "store_mutation",
            restored,
            "Servers restored"
        );
        restored
    }

    /// Set `status` and reset uptime for each listed id still in the store.
    pub fn set_power_state(&mut self, ids: &[ServerId], status: ServerStatus) -> usize {
        let mut changed = 0;
        for server in self.servers.iter_mut().filter(|s| ids.contains(&s.id)) {
            server.status = status;
            server.uptime_hours = 0;
            changed += 1;
        }

        info!(
            marker = "POWER_STATE_SET",
            operation_type = "store_mutation",
            status = %status,
            requested = ids.len(),
            changed,
            "Power state applied"
        );
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::server::Location;

    fn store() -> ServerStore {
        ServerStore::seeded().expect("fixture parses")
    }

    #[test]
    fn test_seed_fixture() {
        let store = store();
        assert_eq!(store.len(), 12);

        let first = store.get_by_id("srv-001").expect("srv-001 seeded");
        assert_eq!(first.hostname, "web-prod-01");
        assert_eq!(first.status, ServerStatus::Running);
        assert_eq!(first.location, Location::DcEast);
    }

    #[test]
    fn test_reads_are_copies() {
        let mut store = store();
        let mut copy = store.get_by_id("srv-001").expect("exists");
        copy.hostname = "mutated".into();

        assert_eq!(store.get_by_id("srv-001").map(|s| s.hostname), Some("web-prod-01".into()));

        let mut all = store.get_all();
        all.clear();
        assert_eq!(store.len(), 12);

        store.update("srv-001", ServerPatch::default());
        assert_eq!(store.len(), 12);
    }

    #[test]
    fn test_get_missing_is_none() {
        assert!(store().get_by_id("srv-999").is_none());
    }

    #[test]
    fn test_create_generates_next_id_with_defaults() {
        let mut store = store();
        let created = store.create(ServerPatch {
            hostname: Some("new-server".into()),
            ip_address: Some("10.0.0.1".into()),
            os: Some("Ubuntu".into()),
            ..ServerPatch::default()
        });

        assert_eq!(created.id, "srv-013");
        assert_eq!(created.hostname, "new-server");
        assert_eq!(created.status, ServerStatus::Stopped);
        assert_eq!(created.cpu_cores, 4);
        assert_eq!(store.len(), 13);
        assert_eq!(store.get_all().last().map(|s| s.id.clone()), Some("srv-013".into()));
    }

    #[test]
    fn test_update_merges_and_reports_missing() {
        let mut store = store();
        let old_ip = store.get_by_id("srv-001").map(|s| s.ip_address);

        let updated = store.update(
            "srv-001",
            ServerPatch {
                os: Some("Debian 12".into()),
                ..ServerPatch::default()
            },
        );
        assert_eq!(updated.map(|s| s.os), Some("Debian 12".into()));
        assert_eq!(store.get_by_id("srv-001").map(|s| s.ip_address), old_ip);

        assert!(store.update("srv-999", ServerPatch::default()).is_none());
    }

    #[test]
    fn test_delete_ignores_unknown_ids() {
        let mut store = store();
        let removed = store.delete_by_ids(&["srv-001".into(), "srv-002".into(), "srv-999".into()]);

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 10);
        assert!(store.get_by_id("srv-001").is_none());
    }

    #[test]
    fn test_restore_skips_existing_ids() {
        let mut store = store();
        let first = store.get_by_id("srv-001").expect("exists");
        let second = store.get_by_id("srv-002").expect("exists");
        store.delete_by_ids(&["srv-001".into()]);

        let restored = store.restore_servers(vec![first, second]);

        assert_eq!(restored, 1);
        assert_eq!(store.len(), 12);
        let ids: Vec<_> = store.get_all().into_iter().map(|s| s.id).collect();
        assert_eq!(ids.iter().filter(|id| *id == "srv-002").count(), 1);
        assert_eq!(ids.last().map(String::as_str), Some("srv-001"));
    }

    #[test]
    fn test_set_power_state_skips_missing() {
        let mut store = store();
        let changed =
            store.set_power_state(&["srv-003".into(), "srv-404".into()], ServerStatus::Running);

        assert_eq!(changed, 1);
        let server = store.get_by_id("srv-003").expect("exists");
        assert_eq!(server.status, ServerStatus::Running);
        assert_eq!(server.uptime_hours, 0);
    }
}
