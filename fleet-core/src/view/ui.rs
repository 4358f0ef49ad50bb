//! src/view/ui.rs
//! ============================================================
//! Frame renderer: paints the whole console from `AppState`.
//! Only reads state; everything it shows was decided by the dispatcher.

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};
use tracing::{instrument, trace};

use crate::{
    model::{
        app_state::AppState,
        ui_state::{UIMode, UIOverlay},
    },
    view::components::{
        confirm_dialog::ConfirmDialog, detail_view::DetailView, filter_bar::FilterBar,
        help_overlay::HelpOverlay, notification_overlay::NotificationOverlay,
        server_form::ServerFormView, server_table::ServerTable, status_bar::StatusBar,
    },
};

const NOTIFICATION_WIDTH: u16 = 48;
const NOTIFICATION_HEIGHT: u16 = 5;

pub struct View;

impl View {
    #[instrument(level = "trace", skip_all)]
    pub fn redraw(frame: &mut Frame<'_>, state: &AppState) {
        let screen = frame.area();
        let palette = &state.ui.palette;

        frame.render_widget(Block::default().style(palette.base()), screen);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .split(screen);

        Self::draw_title(frame, state, main[0]);

        match (state.ui.mode, state.detail.as_ref()) {
            (UIMode::Detail | UIMode::Edit, Some(detail)) => {
                DetailView::new().render(frame, detail, palette, &state.translator, main[1]);
            }
            _ => Self::draw_list(frame, state, main[1]),
        }

        StatusBar::new().render(frame, state, main[2]);

        Self::draw_overlays(frame, state, screen);
        let frame_count = state.ui.frame_count.load(std::sync::atomic::Ordering::Relaxed);
        trace!(frame = frame_count, "Frame drawn");
    }

    fn draw_title(frame: &mut Frame<'_>, state: &AppState, area: Rect) {
        let title = Paragraph::new(state.translator.instant("APP.TITLE"))
            .style(state.ui.palette.accent().bold())
            .alignment(Alignment::Center);
        frame.render_widget(title, area);
    }

    fn draw_list(frame: &mut Frame<'_>, state: &AppState, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Fill(1)])
            .split(area);

        FilterBar::new().render(frame, state, chunks[0]);
        ServerTable::new().render(frame, state, chunks[1]);
    }

    fn draw_overlays(frame: &mut Frame<'_>, state: &AppState, screen: Rect) {
        let palette = &state.ui.palette;
        let t = &state.translator;

        match state.ui.overlay {
            UIOverlay::None => {}
            UIOverlay::Help => {
                HelpOverlay::new().render(frame, palette, t, centered_rect(60, 80, screen));
            }
            UIOverlay::Confirm => {
                if let Some(request) = state.ui.confirm.as_ref() {
                    ConfirmDialog::new(request).render(
                        frame,
                        palette,
                        centered_rect(50, 30, screen),
                    );
                }
            }
            UIOverlay::AddServer => {
                if let Some(form) = state.ui.add_form.as_ref() {
                    ServerFormView::new(form, t.instant("SERVER_LIST.ADD_TITLE")).render(
                        frame,
                        palette,
                        t,
                        centered_rect(60, 70, screen),
                    );
                }
            }
        }

        if let Some(notification) = state.ui.notification.as_ref() {
            NotificationOverlay::new().render_notification(
                frame,
                notification,
                palette,
                t,
                notification_rect(screen),
            );
        }
    }
}

/// Bottom-right toast, above the status bar.
fn notification_rect(screen: Rect) -> Rect {
    let width = NOTIFICATION_WIDTH.min(screen.width);
    let height = NOTIFICATION_HEIGHT.min(screen.height.saturating_sub(1));
    Rect {
        x: screen.x + screen.width.saturating_sub(width),
        y: screen.y + screen.height.saturating_sub(height + 1),
        width,
        height,
    }
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
