//! src/view/components/confirm_dialog.rs
use crate::controller::bulk::ConfirmRequest;
use crate::view::theme::Palette;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct ConfirmDialog<'a> {
    request: &'a ConfirmRequest,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(request: &'a ConfirmRequest) -> Self {
        Self { request }
    }

    pub fn render(&self, frame: &mut Frame<'_>, palette: &Palette, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", self.request.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(palette.error_text())
            .style(palette.overlay());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(self.request.message.as_str())
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center),
            chunks[0],
        );

        let buttons = Line::from(vec![
            Span::styled(
                format!("[Enter/y] {}", self.request.confirm_label),
                palette.error_text().add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(format!("[Esc/n] {}", self.request.cancel_label), palette.muted()),
        ]);
        frame.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), chunks[1]);
    }
}
