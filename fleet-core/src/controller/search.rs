//! src/controller/search.rs
//! ============================================================================
//! # Debounced search pipeline
//!
//! Raw keystrokes edit the search box immediately; the term that filters the
//! list only changes after the box has been quiet for the debounce window.
//! Settled values come back through the receiver returned by
//! [`SearchPipeline::new`] and are fed to [`SearchPipeline::settle`].

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, trace};

use crate::util::debounce::{DebounceConfig, Debouncer};

#[derive(Debug)]
pub struct SearchPipeline {
    debouncer: Debouncer<String>,
    input: String,
    applied: String,
}

impl SearchPipeline {
    #[must_use]
    pub fn new(cfg: DebounceConfig) -> (Self, UnboundedReceiver<String>) {
        let (debouncer, rx) = Debouncer::new(cfg);
        (
            Self {
                debouncer,
                input: String::new(),
                applied: String::new(),
            },
            rx,
        )
    }

    /// Text currently in the search box.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Term the list is currently filtered by.
    #[must_use]
    pub fn applied(&self) -> &str {
        &self.applied
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// New box contents. Returns a term to apply right away, which only
    /// happens when the box became empty.
    pub fn on_input(&mut self, raw: String) -> Option<String> {
        self.input.clone_from(&raw);

        if raw.is_empty() {
            return self.clear();
        }

        trace!(marker = "SEARCH_KEYSTROKE", len = raw.len(), "Search input debounced");
        self.debouncer.submit(raw);
        None
    }

    pub fn push_char(&mut self, c: char) -> Option<String> {
        let mut next = self.input.clone();
        next.push(c);
        self.on_input(next)
    }

    pub fn backspace(&mut self) -> Option<String> {
        let mut next = self.input.clone();
        next.pop();
        self.on_input(next)
    }

    /// Empty the box and apply the empty term now.
    pub fn clear(&mut self) -> Option<String> {
        self.input.clear();
        self.debouncer.cancel();
        self.apply(String::new())
    }

    /// Empty the box and the applied term without reporting a change, for
    /// callers that reset the list criteria themselves.
    pub fn reset(&mut self) {
        self.input.clear();
        self.applied.clear();
        self.debouncer.cancel();
    }

    /// A debounced value arrived. Stale values (the box changed since) and
    /// values equal to the applied term are dropped.
    pub fn settle(&mut self, term: String) -> Option<String> {
        if term != self.input {
            debug!(marker = "SEARCH_STALE", "Dropping superseded search term");
            return None;
        }
        self.apply(term)
    }

    fn apply(&mut self, term: String) -> Option<String> {
        if term == self.applied {
            return None;
        }

        debug!(
            marker = "SEARCH_APPLIED",
            operation_type = "search",
            term = %term,
            "Search term applied"
        );
        self.applied.clone_from(&term);
        Some(term)
    }
}
