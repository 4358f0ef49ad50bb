//! src/controller/key_map.rs
//! ============================================================================
//! # Key bindings
//!
//! Maps a key press to an [`Action`] given what currently owns the keyboard.
//! Modal overlays swallow every key except their own confirm/cancel keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

use crate::controller::actions::Action;
use crate::engine::sort::SortColumn;
use crate::model::ui_state::{UIMode, UIOverlay, UIState};

/// The parts of UI state that decide how a key is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyContext {
    pub mode: UIMode,
    pub overlay: UIOverlay,
    pub has_notification: bool,
}

impl From<&UIState> for KeyContext {
    fn from(ui: &UIState) -> Self {
        Self {
            mode: ui.mode,
            overlay: ui.overlay,
            has_notification: ui.notification.is_some(),
        }
    }
}

/// Key column and catalog key for each help overlay row.
pub const HELP_BINDINGS: &[(&str, &str)] = &[
    ("↑/↓ j/k PgUp/PgDn g/G", "HELP.NAVIGATE"),
    ("Space", "HELP.TOGGLE_ROW"),
    ("a", "HELP.TOGGLE_ALL"),
    ("1-9", "HELP.SORT"),
    ("s", "HELP.STATUS_FILTER"),
    ("l", "HELP.LOCATION_FILTER"),
    ("/", "HELP.SEARCH"),
    ("Tab", "HELP.SEARCH_FIELD"),
    ("c", "HELP.CLEAR_FILTERS"),
    ("d Del", "HELP.DELETE"),
    ("r", "HELP.RESTART"),
    ("x", "HELP.SHUTDOWN"),
    ("n", "HELP.ADD"),
    ("Enter", "HELP.OPEN"),
    ("u", "HELP.UNDO"),
    ("t", "HELP.THEME"),
    ("L", "HELP.LANGUAGE"),
    ("q Ctrl+C", "HELP.QUIT"),
];

#[must_use]
pub fn map_key(key: KeyEvent, ctx: KeyContext) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let action = match ctx.overlay {
        UIOverlay::Confirm => confirm_keys(key),
        UIOverlay::AddServer => form_keys(key),
        UIOverlay::Help => help_keys(key),
        UIOverlay::None => match ctx.mode {
            UIMode::Browse => browse_keys(key, ctx),
            UIMode::Search => search_keys(key),
            UIMode::Detail => detail_keys(key, ctx),
            UIMode::Edit => form_keys(key),
        },
    };

    trace!(marker = "KEY_MAPPED", code = ?key.code, ?action, "Key mapped");
    action
}

fn confirm_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y' | 'Y') => Action::ConfirmDialog(true),
        KeyCode::Esc | KeyCode::Char('n' | 'N') => Action::ConfirmDialog(false),
        _ => Action::NoOp,
    }
}

fn help_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?' | 'q') | KeyCode::F(1) => Action::ToggleHelp,
        _ => Action::NoOp,
    }
}

/// Shared by the add overlay and detail edit mode.
fn form_keys(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => Action::SubmitForm,
        (KeyCode::Enter, _) => Action::SubmitForm,
        (KeyCode::Esc, _) => Action::CancelForm,
        (KeyCode::Tab | KeyCode::Down, _) => Action::FormFocusNext,
        (KeyCode::BackTab | KeyCode::Up, _) => Action::FormFocusPrev,
        (KeyCode::Left, _) => Action::FormCycleChoice { forward: false },
        (KeyCode::Right, _) => Action::FormCycleChoice { forward: true },
        (KeyCode::Backspace, _) => Action::FormBackspace,
        (KeyCode::Char(c), _) => Action::FormInput(c),
        _ => Action::NoOp,
    }
}

fn search_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::SearchCleared,
        KeyCode::Enter | KeyCode::Down => Action::ExitSearch,
        KeyCode::Tab => Action::ToggleSearchField,
        KeyCode::Backspace => Action::SearchBackspace,
        KeyCode::Char(c) => Action::SearchInput(c),
        _ => Action::NoOp,
    }
}

fn detail_keys(key: KeyEvent, ctx: KeyContext) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Action::CloseDetail,
        KeyCode::Char('e') => Action::ToggleEditMode,
        KeyCode::Char('r') => Action::RestartServer,
        KeyCode::Char('x') => Action::ShutdownServer,
        KeyCode::Char('u') if ctx.has_notification => Action::InvokeNotificationAction,
        _ => shared_keys(key),
    }
}

fn browse_keys(key: KeyEvent, ctx: KeyContext) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Action::SelectFirst,
        KeyCode::End | KeyCode::Char('G') => Action::SelectLast,

        KeyCode::Char(' ') => Action::ToggleRowSelection,
        KeyCode::Char('a') => Action::ToggleSelectAll,
        KeyCode::Char(c @ '1'..='9') => sort_key(c),

        KeyCode::Char('s') => Action::CycleStatusFilter,
        KeyCode::Char('l') => Action::CycleLocationFilter,
        KeyCode::Char('/') => Action::FocusSearch,
        KeyCode::Tab => Action::ToggleSearchField,
        KeyCode::Char('c') => Action::ClearAllFilters,

        KeyCode::Char('d') | KeyCode::Delete => Action::RequestDeleteSelected,
        KeyCode::Char('r') => Action::RestartSelected,
        KeyCode::Char('x') => Action::ShutdownSelected,
        KeyCode::Char('n') => Action::OpenAddServer,
        KeyCode::Enter => Action::OpenDetail,

        KeyCode::Char('u') if ctx.has_notification => Action::InvokeNotificationAction,
        KeyCode::Esc if ctx.has_notification => Action::DismissNotification,
        _ => shared_keys(key),
    }
}

/// Keys that work on both the list and the detail view.
fn shared_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('t') => Action::CycleTheme,
        KeyCode::Char('L') => Action::CycleLanguage,
        KeyCode::Char('?') | KeyCode::F(1) => Action::ToggleHelp,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::NoOp,
    }
}

fn sort_key(digit: char) -> Action {
    digit
        .to_digit(10)
        .and_then(|n| usize::try_from(n).ok())
        .and_then(|n| SortColumn::ALL.get(n.wrapping_sub(1)).copied())
        .map_or(Action::NoOp, Action::SortBy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn ctx(mode: UIMode, overlay: UIOverlay) -> KeyContext {
        KeyContext {
            mode,
            overlay,
            has_notification: false,
        }
    }

    #[test]
    fn test_confirm_overlay_is_modal() {
        let c = ctx(UIMode::Browse, UIOverlay::Confirm);
        assert_eq!(map_key(code(KeyCode::Enter), c), Action::ConfirmDialog(true));
        assert_eq!(map_key(key('n'), c), Action::ConfirmDialog(false));
        assert_eq!(map_key(code(KeyCode::Esc), c), Action::ConfirmDialog(false));
        for ignored in ['d', 'q', 't', ' ', '1'] {
            assert_eq!(map_key(key(ignored), c), Action::NoOp);
        }
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        assert_eq!(map_key(ctrl('c'), ctx(UIMode::Edit, UIOverlay::AddServer)), Action::Quit);
        assert_eq!(map_key(ctrl('c'), ctx(UIMode::Search, UIOverlay::None)), Action::Quit);
    }

    #[test]
    fn test_digits_sort_in_column_order() {
        let c = ctx(UIMode::Browse, UIOverlay::None);
        assert_eq!(map_key(key('1'), c), Action::SortBy(SortColumn::Hostname));
        assert_eq!(map_key(key('6'), c), Action::SortBy(SortColumn::CpuCores));
        assert_eq!(map_key(key('9'), c), Action::SortBy(SortColumn::UptimeHours));
    }

    #[test]
    fn test_search_mode_captures_letters() {
        let c = ctx(UIMode::Search, UIOverlay::None);
        assert_eq!(map_key(key('q'), c), Action::SearchInput('q'));
        assert_eq!(map_key(code(KeyCode::Esc), c), Action::SearchCleared);
        assert_eq!(map_key(code(KeyCode::Tab), c), Action::ToggleSearchField);
    }

    #[test]
    fn test_form_keys_in_add_and_edit() {
        for c in [ctx(UIMode::Browse, UIOverlay::AddServer), ctx(UIMode::Edit, UIOverlay::None)] {
            assert_eq!(map_key(key('x'), c), Action::FormInput('x'));
            assert_eq!(map_key(code(KeyCode::Enter), c), Action::SubmitForm);
            assert_eq!(map_key(code(KeyCode::Esc), c), Action::CancelForm);
            assert_eq!(map_key(code(KeyCode::Right), c), Action::FormCycleChoice { forward: true });
        }
    }

    #[test]
    fn test_undo_key_needs_notification() {
        let mut c = ctx(UIMode::Browse, UIOverlay::None);
        assert_eq!(map_key(key('u'), c), Action::NoOp);
        c.has_notification = true;
        assert_eq!(map_key(key('u'), c), Action::InvokeNotificationAction);
        assert_eq!(map_key(code(KeyCode::Esc), c), Action::DismissNotification);
    }

    #[test]
    fn test_theme_and_language_keys() {
        let c = ctx(UIMode::Browse, UIOverlay::None);
        assert_eq!(map_key(key('t'), c), Action::CycleTheme);
        assert_eq!(map_key(key('L'), c), Action::CycleLanguage);
        assert_eq!(map_key(key('l'), c), Action::CycleLocationFilter);
    }
}
