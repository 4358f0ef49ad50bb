//! src/view/components/filter_bar.rs
//!
//! Search box, search-field selector and the status/location filters above
//! the table. Keys are shown next to each control since there is no mouse.

use crate::{model::app_state::AppState, model::ui_state::UIMode};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub struct FilterBar;

impl FilterBar {
    pub fn new() -> Self {
        Self
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn render(&self, frame: &mut Frame<'_>, state: &AppState, area: Rect) {
        let palette = &state.ui.palette;
        let t = &state.translator;
        let list = &state.list;
        let searching = state.ui.mode == UIMode::Search;

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(3),
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Fill(1),
            ])
            .split(area);

        let search_title = format!(
            " {} ({}) [/] ",
            t.instant("SERVER_LIST.SEARCH"),
            list.labels.search_field_label(list.criteria.search_field)
        );
        let search_block = Block::default()
            .borders(Borders::ALL)
            .title(search_title)
            .border_style(if searching {
                palette.focused_border()
            } else {
                palette.border()
            });
        let search_input = state.search.input();
        frame.render_widget(
            Paragraph::new(search_input).style(palette.base()).block(search_block),
            chunks[0],
        );
        if searching {
            frame.set_cursor_position((
                chunks[0].x + 1 + search_input.chars().count() as u16,
                chunks[0].y + 1,
            ));
        }

        Self::dropdown(
            frame,
            chunks[1],
            format!(" {} [s] ", t.instant("SERVER.FIELDS.STATUS")),
            list.labels.status_label(list.criteria.status),
            list.criteria.status.is_some(),
            state,
        );
        Self::dropdown(
            frame,
            chunks[2],
            format!(" {} [l] ", t.instant("SERVER.FIELDS.LOCATION")),
            list.labels.location_label(list.criteria.location),
            list.criteria.location.is_some(),
            state,
        );

        let clear_style = if list.has_active_filters() {
            palette.accent()
        } else {
            palette.muted()
        };
        frame.render_widget(
            Paragraph::new(format!("{} [c]", t.instant("SERVER_LIST.CLEAR_FILTERS")))
                .style(clear_style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(palette.border())),
            chunks[3],
        );
    }

    fn dropdown(
        frame: &mut Frame<'_>,
        area: Rect,
        title: String,
        value: &str,
        active: bool,
        state: &AppState,
    ) {
        let palette = &state.ui.palette;
        let style = if active { palette.accent() } else { palette.base() };

        frame.render_widget(
            Paragraph::new(format!("{value} ▾")).style(style).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(palette.border()),
            ),
            area,
        );
    }
}

impl Default for FilterBar {
    fn default() -> Self {
        Self::new()
    }
}
