//! UI state: mode, overlays, notifications and redraw bookkeeping

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use compact_str::CompactString;

use crate::config::{NotificationConfig, ThemeName};
use crate::controller::actions::Action;
use crate::controller::bulk::ConfirmRequest;
use crate::model::form::ServerForm;
use crate::view::theme::Palette;

const DEFAULT_VIEWPORT_ROWS: usize = 10;

/// Atomic redraw flags for lock-free UI updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RedrawFlag {
    Main = 1,
    StatusBar = 2,
    Overlay = 4,
    Notification = 8,
    All = 15,
}

impl RedrawFlag {
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Which screen owns the keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum UIMode {
    #[default]
    Browse = 0,
    Search = 1,
    Detail = 2,
    Edit = 3,
}

/// Modal layers drawn over the current screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum UIOverlay {
    #[default]
    None = 0,
    Help = 1,
    Confirm = 2,
    AddServer = 3,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Info = 0,
    Success = 1,
    Warning = 2,
    Error = 3,
}

/// Button attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub label: String,
    pub action: Action,
    /// Dispatched when the notification goes away without the button being used.
    pub on_dismiss: Option<Action>,
}

impl NotificationAction {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
            on_dismiss: None,
        }
    }

    #[must_use]
    pub fn on_dismiss(mut self, action: Action) -> Self {
        self.on_dismiss = Some(action);
        self
    }
}

/// Compact notification with timestamp
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss: Option<Duration>,
    pub action: Option<NotificationAction>,
}

impl Notification {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.auto_dismiss
            .is_some_and(|ttl| now.saturating_duration_since(self.timestamp) >= ttl)
    }

    /// Follow-up to run because this notification left without its button
    /// being pressed.
    #[must_use]
    pub fn dismiss_action(&self) -> Option<Action> {
        self.action.as_ref().and_then(|a| a.on_dismiss.clone())
    }
}

#[derive(Debug)]
pub struct UIState {
    // Atomic flags for lock-free updates
    pub redraw_flags: AtomicU32,
    pub frame_count: AtomicU64,

    // Mode and overlay state
    pub mode: UIMode,
    pub overlay: UIOverlay,

    /// Row under the cursor in the visible list.
    pub cursor: usize,

    /// Table rows that fit on screen; page size for PageUp/PageDown.
    pub viewport_rows: usize,

    pub theme: ThemeName,
    pub palette: Palette,

    pub notification: Option<Notification>,
    notification_durations: NotificationConfig,

    pub confirm: Option<ConfirmRequest>,
    pub add_form: Option<ServerForm>,
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(ThemeName::default(), NotificationConfig::default())
    }
}

impl UIState {
    pub fn new(theme: ThemeName, notification_durations: NotificationConfig) -> Self {
        Self {
            redraw_flags: AtomicU32::new(u32::from(RedrawFlag::All.bits())),
            frame_count: AtomicU64::new(0),
            mode: UIMode::Browse,
            overlay: UIOverlay::None,
            cursor: 0,
            viewport_rows: DEFAULT_VIEWPORT_ROWS,
            theme,
            palette: Palette::for_theme(theme),
            notification: None,
            notification_durations,
            confirm: None,
            add_form: None,
        }
    }

    // Atomic redraw operations
    #[inline]
    pub fn request_redraw(&self, flag: RedrawFlag) {
        self.redraw_flags
            .fetch_or(u32::from(flag.bits()), Ordering::Relaxed);
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw_flags.load(Ordering::Relaxed) != 0
    }

    #[inline]
    pub fn clear_redraw(&self) {
        self.redraw_flags.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_frame(&self) {
        self.frame_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_theme(&mut self, theme: ThemeName) {
        self.theme = theme;
        self.palette = Palette::for_theme(theme);
        self.request_redraw(RedrawFlag::All);
    }

    // Cursor management
    pub fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let max = len - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
        self.request_redraw(RedrawFlag::Main);
    }

    // Notification system. Every show_* returns the notification it replaced
    // so the caller can run that one's dismiss action.
    pub fn show_notification(
        &mut self,
        message: impl Into<CompactString>,
        level: NotificationLevel,
        auto_dismiss: Option<Duration>,
        action: Option<NotificationAction>,
    ) -> Option<Notification> {
        let replaced = self.notification.replace(Notification {
            message: message.into(),
            level,
            timestamp: Instant::now(),
            auto_dismiss,
            action,
        });
        self.request_redraw(RedrawFlag::Notification);
        replaced
    }

    #[inline]
    pub fn show_info(&mut self, message: impl Into<CompactString>) -> Option<Notification> {
        let ttl = self.notification_durations.info;
        self.show_notification(message, NotificationLevel::Info, Some(ttl), None)
    }

    #[inline]
    pub fn show_success(&mut self, message: impl Into<CompactString>) -> Option<Notification> {
        let ttl = self.notification_durations.success;
        self.show_notification(message, NotificationLevel::Success, Some(ttl), None)
    }

    #[inline]
    pub fn show_warning(&mut self, message: impl Into<CompactString>) -> Option<Notification> {
        let ttl = self.notification_durations.warning;
        self.show_notification(message, NotificationLevel::Warning, Some(ttl), None)
    }

    /// Warning with a button; lives for the undo window.
    pub fn show_warning_with_action(
        &mut self,
        message: impl Into<CompactString>,
        action: NotificationAction,
    ) -> Option<Notification> {
        let ttl = self.notification_durations.undo_window;
        self.show_notification(message, NotificationLevel::Warning, Some(ttl), Some(action))
    }

    #[inline]
    pub fn show_error(&mut self, message: impl Into<CompactString>) -> Option<Notification> {
        self.show_notification(message, NotificationLevel::Error, None, None)
    }

    /// Auto-dismiss: removes and returns the notification once its lifetime
    /// has passed.
    pub fn update_notification(&mut self, now: Instant) -> Option<Notification> {
        if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.request_redraw(RedrawFlag::Notification);
            return self.notification.take();
        }
        None
    }

    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        let dismissed = self.notification.take();
        if dismissed.is_some() {
            self.request_redraw(RedrawFlag::Notification);
        }
        dismissed
    }

    /// Press the notification's button: closes it and yields the action.
    pub fn take_notification_action(&mut self) -> Option<Action> {
        if self.notification.as_ref()?.action.is_none() {
            return None;
        }

        self.request_redraw(RedrawFlag::Notification);
        self.notification
            .take()
            .and_then(|n| n.action)
            .map(|a| a.action)
    }

    // Overlay helpers
    pub fn open_overlay(&mut self, overlay: UIOverlay) {
        self.overlay = overlay;
        self.request_redraw(RedrawFlag::Overlay);
    }

    pub fn close_overlay(&mut self) {
        self.overlay = UIOverlay::None;
        self.confirm = None;
        self.add_form = None;
        self.request_redraw(RedrawFlag::All);
    }

    #[must_use]
    pub fn is_modal(&self) -> bool {
        matches!(self.overlay, UIOverlay::Confirm | UIOverlay::AddServer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::bulk::UndoToken;

    fn durations() -> NotificationConfig {
        NotificationConfig {
            success: Duration::from_millis(2000),
            info: Duration::from_millis(3000),
            warning: Duration::from_millis(5000),
            undo_window: Duration::from_millis(8000),
        }
    }

    #[test]
    fn test_atomic_operations() {
        let ui_state = UIState::default();
        assert!(ui_state.needs_redraw());

        ui_state.clear_redraw();
        assert!(!ui_state.needs_redraw());

        ui_state.request_redraw(RedrawFlag::Main);
        assert!(ui_state.needs_redraw());

        ui_state.increment_frame();
        assert_eq!(ui_state.frame_count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_notification_lifetimes_follow_config() {
        let mut ui = UIState::new(ThemeName::Dark, durations());

        ui.show_success("saved");
        let shown = ui.notification.as_ref().map(|n| n.timestamp).expect("shown");
        assert!(ui.update_notification(shown + Duration::from_millis(1999)).is_none());
        assert!(ui.update_notification(shown + Duration::from_millis(2000)).is_some());
        assert!(ui.notification.is_none());
    }

    #[test]
    fn test_action_notification_uses_undo_window() {
        let mut ui = UIState::new(ThemeName::Light, durations());
        let token_action = NotificationAction::new("Undo", Action::Quit).on_dismiss(Action::NoOp);

        ui.show_warning_with_action("deleted", token_action);
        let n = ui.notification.as_ref().expect("shown");
        assert_eq!(n.auto_dismiss, Some(Duration::from_millis(8000)));
        assert_eq!(n.dismiss_action(), Some(Action::NoOp));
    }

    #[test]
    fn test_replacing_returns_previous() {
        let mut ui = UIState::default();
        let token = UndoToken::from_raw(7);
        ui.show_warning_with_action(
            "deleted",
            NotificationAction::new("Undo", Action::UndoDelete(token))
                .on_dismiss(Action::DiscardUndo(token)),
        );

        let replaced = ui.show_success("restarted").expect("previous notification");
        assert_eq!(replaced.dismiss_action(), Some(Action::DiscardUndo(token)));
    }

    #[test]
    fn test_take_action_only_with_button() {
        let mut ui = UIState::default();
        ui.show_info("hello");
        assert_eq!(ui.take_notification_action(), None);
        assert!(ui.notification.is_some());

        ui.show_warning_with_action("x", NotificationAction::new("Go", Action::ToggleHelp));
        assert_eq!(ui.take_notification_action(), Some(Action::ToggleHelp));
        assert!(ui.notification.is_none());
    }

    #[test]
    fn test_cursor_bounds() {
        let mut ui = UIState::default();
        ui.move_cursor(5, 3);
        assert_eq!(ui.cursor, 2);
        ui.move_cursor(-10, 3);
        assert_eq!(ui.cursor, 0);
        ui.cursor = 9;
        ui.clamp_cursor(4);
        assert_eq!(ui.cursor, 3);
    }

    #[test]
    fn test_theme_switch_updates_palette() {
        let mut ui = UIState::default();
        ui.set_theme(ThemeName::Green);
        assert_eq!(ui.palette, Palette::for_theme(ThemeName::Green));
    }
}
