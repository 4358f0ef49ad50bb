//! ``src/model/server.rs``
//! ============================================================================
//! # Server records
//!
//! The entity at the center of the console: a single machine in the fleet,
//! plus the partial-update shape used by create/update and the sequential id
//! generator.

use std::{fmt, str::FromStr};

use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// Server identity, formatted `srv-NNN`.
pub type ServerId = String;

const ID_PREFIX: &str = "srv-";

/// Power/lifecycle state of a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Running,
    Stopped,
    Maintenance,
}

impl ServerStatus {
    pub const ALL: [Self; 3] = [Self::Running, Self::Stopped, Self::Maintenance];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Maintenance => "maintenance",
        }
    }

    /// Catalog key for the display label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Running => "SERVER.STATUS.RUNNING",
            Self::Stopped => "SERVER.STATUS.STOPPED",
            Self::Maintenance => "SERVER.STATUS.MAINTENANCE",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown server status: {s}"))
    }
}

/// Datacenter a server is racked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
pub enum Location {
    #[serde(rename = "DC-East")]
    DcEast,

    #[serde(rename = "DC-West")]
    DcWest,

    #[serde(rename = "DC-Europe")]
    DcEurope,
}

impl Location {
    pub const ALL: [Self; 3] = [Self::DcEast, Self::DcWest, Self::DcEurope];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DcEast => "DC-East",
            Self::DcWest => "DC-West",
            Self::DcEurope => "DC-Europe",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|location| location.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown location: {s}"))
    }
}

/// A single machine in the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: ServerId,
    pub hostname: String,
    pub ip_address: String,
    pub status: ServerStatus,
    pub location: Location,
    pub os: String,
    pub cpu_cores: u32,
    pub ram_gb: u32,
    pub storage_gb: u32,
    pub uptime_hours: u32,
}

/// Partial server used by create (unset fields take defaults) and update
/// (unset fields are left alone).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerPatch {
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
    pub status: Option<ServerStatus>,
    pub location: Option<Location>,
    pub os: Option<String>,
    pub cpu_cores: Option<u32>,
    pub ram_gb: Option<u32>,
    pub storage_gb: Option<u32>,
    pub uptime_hours: Option<u32>,
}

impl ServerPatch {
    /// Shallow-merge the provided fields into `server`.
    pub fn apply_to(self, server: &mut Server) {
        if let Some(hostname) = self.hostname {
            server.hostname = hostname;
        }
        if let Some(ip_address) = self.ip_address {
            server.ip_address = ip_address;
        }
        if let Some(status) = self.status {
            server.status = status;
        }
        if let Some(location) = self.location {
            server.location = location;
        }
        if let Some(os) = self.os {
            server.os = os;
        }
        if let Some(cpu_cores) = self.cpu_cores {
            server.cpu_cores = cpu_cores;
        }
        if let Some(ram_gb) = self.ram_gb {
            server.ram_gb = ram_gb;
        }
        if let Some(storage_gb) = self.storage_gb {
            server.storage_gb = storage_gb;
        }
        if let Some(uptime_hours) = self.uptime_hours {
            server.uptime_hours = uptime_hours;
        }
    }

    /// Build a full record, filling defaults for every unset field.
    #[must_use]
    pub fn into_server(self, id: ServerId) -> Server {
        Server {
            id,
            hostname: self.hostname.unwrap_or_default(),
            ip_address: self.ip_address.unwrap_or_default(),
            status: self.status.unwrap_or(ServerStatus::Stopped),
            location: self.location.unwrap_or(Location::DcEast),
            os: self.os.unwrap_or_default(),
            cpu_cores: self.cpu_cores.unwrap_or(4),
            ram_gb: self.ram_gb.unwrap_or(8),
            storage_gb: self.storage_gb.unwrap_or(100),
            uptime_hours: self.uptime_hours.unwrap_or(0),
        }
    }
}

/// Numeric suffix of an id: the leading digits after the prefix.
fn id_number(id: &str) -> Option<u64> {
    let rest = id.strip_prefix(ID_PREFIX).unwrap_or(id);
    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];

    digits.parse().ok()
}

/// Next sequential id: max existing suffix + 1, zero-padded to at least three
/// digits. Ids without a numeric suffix are ignored.
#[must_use]
pub fn generate_server_id(servers: &[Server]) -> ServerId {
    next_id(servers.iter().map(|s| s.id.as_str()))
}

fn next_id<'a, I>(existing: I) -> ServerId
where
    I: IntoIterator<Item = &'a str>,
{
    let max_id: u64 = existing
        .into_iter()
        .filter_map(id_number)
        .max()
        .unwrap_or(0);

    format!("{ID_PREFIX}{:03}", max_id + 1)
}
