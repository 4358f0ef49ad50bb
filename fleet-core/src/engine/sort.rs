//! ``src/engine/sort.rs``
//! ============================================================================
//! # Single-column sorting
//!
//! Stable, non-mutating sort of the filtered list plus the header state
//! machine that decides which column and direction are active.

use std::cmp::Ordering;
use std::fmt;

use crate::model::server::Server;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Hostname,
    IpAddress,
    Status,
    Location,
    Os,
    CpuCores,
    RamGb,
    StorageGb,
    UptimeHours,
}

impl SortColumn {
    /// Column order of the list table.
    pub const ALL: [Self; 9] = [
        Self::Hostname,
        Self::IpAddress,
        Self::Status,
        Self::Location,
        Self::Os,
        Self::CpuCores,
        Self::RamGb,
        Self::StorageGb,
        Self::UptimeHours,
    ];

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::CpuCores | Self::RamGb | Self::StorageGb | Self::UptimeHours
        )
    }

    #[must_use]
    pub const fn header_key(self) -> &'static str {
        match self {
            Self::Hostname => "SERVER.FIELDS.HOSTNAME",
            Self::IpAddress => "SERVER.FIELDS.IP_ADDRESS",
            Self::Status => "SERVER.FIELDS.STATUS",
            Self::Location => "SERVER.FIELDS.LOCATION",
            Self::Os => "SERVER.FIELDS.OS",
            Self::CpuCores => "SERVER.FIELDS.CPU_CORES",
            Self::RamGb => "SERVER.FIELDS.RAM_GB",
            Self::StorageGb => "SERVER.FIELDS.STORAGE_GB",
            Self::UptimeHours => "SERVER.FIELDS.UPTIME",
        }
    }

    fn numeric_value(self, server: &Server) -> u32 {
        match self {
            Self::CpuCores => server.cpu_cores,
            Self::RamGb => server.ram_gb,
            Self::StorageGb => server.storage_gb,
            _ => server.uptime_hours,
        }
    }

    fn text_value(self, server: &Server) -> &str {
        match self {
            Self::Hostname => &server.hostname,
            Self::IpAddress => &server.ip_address,
            Self::Status => server.status.as_str(),
            Self::Location => server.location.as_str(),
            _ => &server.os,
        }
    }

    /// Compare two servers on this column, ascending.
    #[must_use]
    pub fn compare(self, a: &Server, b: &Server) -> Ordering {
        if self.is_numeric() {
            self.numeric_value(a).cmp(&self.numeric_value(b))
        } else {
            locale_compare(self.text_value(a), self.text_value(b))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Header state: `None` column means original order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: Some(SortColumn::Hostname),
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    #[must_use]
    pub const fn unsorted() -> Self {
        Self {
            column: None,
            direction: SortDirection::Asc,
        }
    }

    /// Header click: same column cycles asc → desc → unsorted, another
    /// column starts at asc.
    pub fn click(&mut self, column: SortColumn) {
        *self = match (self.column, self.direction) {
            (Some(current), SortDirection::Asc) if current == column => Self {
                column: Some(column),
                direction: SortDirection::Desc,
            },
            (Some(current), SortDirection::Desc) if current == column => Self::unsorted(),
            _ => Self {
                column: Some(column),
                direction: SortDirection::Asc,
            },
        };
    }

    /// Direction shown on `column`'s header, if it is the active one.
    #[must_use]
    pub fn indicator(&self, column: SortColumn) -> Option<SortDirection> {
        (self.column == Some(column)).then_some(self.direction)
    }
}

/// Sorted copy of `servers`. Ties keep input order; no column keeps the
/// input order entirely.
#[must_use]
pub fn sort_servers(
    servers: &[Server],
    column: Option<SortColumn>,
    direction: SortDirection,
) -> Vec<Server> {
    let mut sorted = servers.to_vec();
    if let Some(column) = column {
        sorted.sort_by(|a, b| direction.apply(column.compare(a, b)));
    }
    sorted
}

/// Collation class: whitespace, punctuation/symbols, digits, letters.
fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

fn primary_key(c: char) -> (u8, char) {
    (char_class(c), c.to_lowercase().next().unwrap_or(c))
}

/// Lowercase sorts before uppercase on the case level.
fn case_key(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

/// Locale-style string ordering: case-insensitive primary level with
/// punctuation < digits < letters, then lowercase before uppercase, then
/// code points as the final tie-break.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_key)
        .cmp(b.chars().map(primary_key))
        .then_with(|| a.chars().map(case_key).cmp(b.chars().map(case_key)))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::server::ServerPatch;

    fn with_cores(hostname: &str, cores: u32) -> Server {
        ServerPatch {
            hostname: Some(hostname.into()),
            cpu_cores: Some(cores),
            ..ServerPatch::default()
        }
        .into_server(format!("srv-{hostname}"))
    }

    fn cores(servers: &[Server]) -> Vec<u32> {
        servers.iter().map(|s| s.cpu_cores).collect()
    }

    #[test]
    fn test_numeric_sort_asc_and_desc() {
        let servers = vec![
            with_cores("a", 16),
            with_cores("b", 32),
            with_cores("c", 8),
            with_cores("d", 4),
        ];

        let asc = sort_servers(&servers, Some(SortColumn::CpuCores), SortDirection::Asc);
        assert_eq!(cores(&asc), [4, 8, 16, 32]);

        let desc = sort_servers(&servers, Some(SortColumn::CpuCores), SortDirection::Desc);
        assert_eq!(cores(&desc), [32, 16, 8, 4]);

        assert_eq!(cores(&servers), [16, 32, 8, 4]);
    }

    #[test]
    fn test_no_column_returns_input_order() {
        let servers = vec![with_cores("b", 1), with_cores("a", 2)];
        assert_eq!(sort_servers(&servers, None, SortDirection::Desc), servers);
    }

    #[test]
    fn test_ties_keep_input_order_both_directions() {
        let servers = vec![with_cores("x", 4), with_cores("y", 4), with_cores("z", 2)];

        let asc = sort_servers(&servers, Some(SortColumn::CpuCores), SortDirection::Asc);
        let names: Vec<_> = asc.iter().map(|s| s.hostname.as_str()).collect();
        assert_eq!(names, ["z", "x", "y"]);

        let desc = sort_servers(&servers, Some(SortColumn::CpuCores), SortDirection::Desc);
        let names: Vec<_> = desc.iter().map(|s| s.hostname.as_str()).collect();
        assert_eq!(names, ["x", "y", "z"]);
    }

    #[test]
    fn test_text_sort_ignores_case_at_primary_level() {
        let servers = vec![
            with_cores("Zeta", 1),
            with_cores("alpha", 1),
            with_cores("Beta", 1),
        ];

        let sorted = sort_servers(&servers, Some(SortColumn::Hostname), SortDirection::Asc);
        let names: Vec<_> = sorted.iter().map(|s| s.hostname.as_str()).collect();
        assert_eq!(names, ["alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn test_locale_compare_levels() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("-x", "1x"), Ordering::Less);
        assert_eq!(locale_compare("9", "a"), Ordering::Less);
        assert_eq!(locale_compare("web-01", "web01"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_header_click_cycle() {
        let mut state = SortState::default();
        assert_eq!(state.column, Some(SortColumn::Hostname));

        state.click(SortColumn::CpuCores);
        assert_eq!(
            state,
            SortState {
                column: Some(SortColumn::CpuCores),
                direction: SortDirection::Asc
            }
        );

        state.click(SortColumn::CpuCores);
        assert_eq!(state.direction, SortDirection::Desc);

        state.click(SortColumn::CpuCores);
        assert_eq!(state.column, None);

        state.click(SortColumn::CpuCores);
        assert_eq!(
            state,
            SortState {
                column: Some(SortColumn::CpuCores),
                direction: SortDirection::Asc
            }
        );

        state.click(SortColumn::CpuCores);
        state.click(SortColumn::Os);
        assert_eq!(
            state,
            SortState {
                column: Some(SortColumn::Os),
                direction: SortDirection::Asc
            }
        );
    }
}
