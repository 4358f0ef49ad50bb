//! ``src/engine/filter.rs``
//! ============================================================================
//! # Criteria filtering
//!
//! Pure derivation of the visible subset from the full collection. No I/O,
//! no mutation of the input; every call produces a fresh `Vec`.

use std::fmt;

use crate::model::server::{Location, Server, ServerStatus};

/// Terms shorter than this (in characters) impose no search filter.
pub const MIN_SEARCH_LENGTH: usize = 3;

/// Which attribute the free-text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Hostname,
    Os,
}

impl SearchField {
    pub const ALL: [Self; 2] = [Self::Hostname, Self::Os];

    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Hostname => "SERVER_LIST.SEARCH_BY_HOSTNAME",
            Self::Os => "SERVER_LIST.SEARCH_BY_OS",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Hostname => Self::Os,
            Self::Os => Self::Hostname,
        }
    }

    /// The text of `server` this field searches.
    #[must_use]
    pub fn value_of(self, server: &Server) -> &str {
        match self {
            Self::Hostname => &server.hostname,
            Self::Os => &server.os,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hostname => "hostname",
            Self::Os => "os",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: Option<ServerStatus>,
    pub location: Option<Location>,
    pub search_term: String,
    pub search_field: SearchField,
}

impl FilterCriteria {
    /// Whether the search term is long enough to filter.
    #[must_use]
    pub fn search_active(&self, min_len: usize) -> bool {
        self.search_term.chars().count() >= min_len
    }

    /// Any criterion that narrows the list, including a short search term the
    /// user has typed but that does not filter yet.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_some() || self.location.is_some() || !self.search_term.is_empty()
    }

    #[must_use]
    pub fn matches(&self, server: &Server, min_len: usize) -> bool {
        if self.status.is_some_and(|status| server.status != status) {
            return false;
        }
        if self.location.is_some_and(|location| server.location != location) {
            return false;
        }
        if !self.search_active(min_len) {
            return true;
        }

        contains_ignore_case(self.search_field.value_of(server), &self.search_term)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Subset of `servers` matching `criteria`, in input order.
#[must_use]
pub fn filter_servers(servers: &[Server], criteria: &FilterCriteria) -> Vec<Server> {
    filter_servers_with(servers, criteria, MIN_SEARCH_LENGTH)
}

/// [`filter_servers`] with a configurable search threshold.
#[must_use]
pub fn filter_servers_with(
    servers: &[Server],
    criteria: &FilterCriteria,
    min_search_length: usize,
) -> Vec<Server> {
    servers
        .iter()
        .filter(|server| criteria.matches(server, min_search_length))
        .cloned()
        .collect()
}
