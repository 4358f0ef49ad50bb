//! src/view/components/status_bar.rs
//!
//! Bottom line: visible/total counts and selection on the left, mode,
//! theme and language on the right.

use crate::{model::app_state::AppState, model::ui_state::UIMode};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, state: &AppState, area: Rect) {
        let palette = &state.ui.palette;
        let t = &state.translator;

        let visible = state.list.visible().len().to_string();
        let total = state.list.total().to_string();
        let mut left_text = t.instant_with(
            "SERVER_LIST.SHOWING",
            &[("visible", visible.as_str()), ("total", total.as_str())],
        );

        if state.list.selection.has_selection() {
            let count = state.list.selection.len().to_string();
            left_text.push_str(" | ");
            left_text.push_str(
                &t.instant_with("SERVER_LIST.SELECTED_COUNT", &[("count", count.as_str())]),
            );
        }

        let mode_str = match state.ui.mode {
            UIMode::Browse => "Browse",
            UIMode::Search => "Search",
            UIMode::Detail => "Detail",
            UIMode::Edit => "Edit",
        };

        let right_text = format!(
            "{mode_str} | {} | {} | ? {}",
            t.instant(state.ui.theme.label_key()),
            state.translator.current().native_name(),
            t.instant("HELP.TITLE"),
        );

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let style = palette.header();

        Paragraph::new(left_text)
            .style(style)
            .alignment(Alignment::Left)
            .render(layout[0], frame.buffer_mut());

        Paragraph::new(right_text)
            .style(style)
            .alignment(Alignment::Right)
            .render(layout[1], frame.buffer_mut());
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
