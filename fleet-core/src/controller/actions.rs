//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Console Commands
//!
//! Defines the `Action` enum: every user input and internal event the console
//! responds to. Key handling produces actions, notifications carry them, and
//! `ActionDispatcher::handle` is the only place they take effect.

use crate::controller::bulk::UndoToken;
use crate::engine::sort::SortColumn;

/// Represents a high-level action that the console can perform.
/// This abstracts away raw terminal events into meaningful commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add a digit/char to the focused form field.
    FormInput(char),

    FormBackspace,

    /// Step the focused choice field (location/status).
    FormCycleChoice { forward: bool },

    FormFocusNext,

    FormFocusPrev,

    /// Validate and submit the open form (add overlay or detail edit).
    SubmitForm,

    /// Leave the open form without saving.
    CancelForm,

    /// Close the currently active overlay.
    CloseOverlay,

    /// Clear status, location and search in one go.
    ClearAllFilters,

    /// Leave the detail view and return to the list.
    CloseDetail,

    /// Resolve the open confirmation dialog.
    ConfirmDialog(bool),

    CycleLanguage,

    CycleLocationFilter,

    CycleStatusFilter,

    CycleTheme,

    DismissNotification,

    /// Undo window closed without undo; drop the captured records.
    DiscardUndo(UndoToken),

    /// Focus the search box.
    FocusSearch,

    /// Leave the search box, keeping the typed term.
    ExitSearch,

    /// Run the current notification's attached action, if any.
    InvokeNotificationAction,

    MoveDown,

    MoveUp,

    PageDown,

    PageUp,

    SelectFirst,

    SelectLast,

    /// Open the detail view for the row under the cursor.
    OpenDetail,

    OpenAddServer,

    Quit,

    /// Ask for confirmation to delete the checked servers.
    RequestDeleteSelected,

    /// Terminal was resized.
    Resize(u16, u16),

    RestartSelected,

    ShutdownSelected,

    /// Restart the server on the detail view.
    RestartServer,

    /// Shut down the server on the detail view.
    ShutdownServer,

    SearchBackspace,

    /// Esc/clear inside the search box: apply an empty term now.
    SearchCleared,

    SearchInput(char),

    /// The debouncer settled on this term.
    SearchSettled(String),

    /// Header click on a sortable column.
    SortBy(SortColumn),

    /// Periodic tick for notification expiry.
    Tick,

    ToggleEditMode,

    ToggleHelp,

    /// Check/uncheck the row under the cursor.
    ToggleRowSelection,

    /// Header checkbox.
    ToggleSelectAll,

    ToggleSearchField,

    /// Put records removed by a delete back.
    UndoDelete(UndoToken),

    NoOp,
}

impl Action {
    /// Actions that only move or toggle local UI state and are too chatty to
    /// log at info level.
    #[must_use]
    pub const fn is_high_frequency(&self) -> bool {
        matches!(
            self,
            Self::Tick
                | Self::MoveDown
                | Self::MoveUp
                | Self::SearchInput(_)
                | Self::SearchBackspace
                | Self::FormInput(_)
                | Self::FormBackspace
                | Self::NoOp
        )
    }
}
