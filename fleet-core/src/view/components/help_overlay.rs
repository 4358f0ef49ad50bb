//! Key binding reference, localized.
use crate::controller::key_map::HELP_BINDINGS;
use crate::i18n::Translator;
use crate::view::theme::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        palette: &Palette,
        translator: &Translator,
        area: Rect,
    ) {
        frame.render_widget(Clear, area);

        let lines: Vec<Line> = HELP_BINDINGS
            .iter()
            .map(|(keys, label_key)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {keys:<24}"),
                        palette.accent().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(translator.instant(label_key)),
                ])
            })
            .collect();

        let help_paragraph = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", translator.instant("HELP.TITLE")))
                    .title_alignment(Alignment::Center)
                    .border_style(palette.focused_border())
                    .style(palette.overlay()),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(help_paragraph, area);
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}
