//! src/view/components/notification_overlay.rs
use crate::i18n::Translator;
use crate::model::ui_state::{Notification, NotificationLevel};
use crate::view::theme::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tracing::{instrument, trace};

pub struct NotificationOverlay;

impl NotificationOverlay {
    pub fn new() -> Self {
        Self
    }

    #[instrument(
        level = "trace",
        skip_all,
        fields(
            marker = "NOTIFICATION_DISPLAYED",
            operation_type = "notification_render",
            level = ?notification.level,
            message_len = notification.message.len(),
        )
    )]
    pub fn render_notification(
        &self,
        frame: &mut Frame<'_>,
        notification: &Notification,
        palette: &Palette,
        translator: &Translator,
        area: Rect,
    ) {
        frame.render_widget(Clear, area);

        let (color, icon) = match notification.level {
            NotificationLevel::Info => (palette.info, "ℹ"),
            NotificationLevel::Warning => (palette.warning, "⚠"),
            NotificationLevel::Error => (palette.error, "✕"),
            NotificationLevel::Success => (palette.success, "✓"),
        };
        let border_style = Style::default().fg(color);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {icon} "))
            .title_style(border_style.bold())
            .border_style(border_style)
            .style(palette.overlay());

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .split(inner_area);

        let message = Paragraph::new(notification.message.as_str())
            .style(palette.overlay())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(message, layout[0]);

        // Button row: the attached action if any, otherwise how to dismiss.
        let footer = match &notification.action {
            Some(action) => format!(
                "[u] {}   [Esc] {}",
                action.label,
                translator.instant("COMMON.CLOSE")
            ),
            None => format!("[Esc] {}", translator.instant("COMMON.CLOSE")),
        };
        trace!(footer = %footer, "Notification footer");

        let footer = Paragraph::new(footer)
            .style(Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Center);
        frame.render_widget(footer, layout[1]);
    }
}

impl Default for NotificationOverlay {
    fn default() -> Self {
        Self::new()
    }
}
