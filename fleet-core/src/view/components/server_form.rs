//! ``src/view/components/server_form.rs``
//! ============================================================================
//! # Server form: add overlay and detail edit mode
//!
//! One row per field. Errors appear under a field once it has been touched;
//! submitting marks every field touched.

use crate::i18n::Translator;
use crate::model::form::{FormField, ServerForm};
use crate::view::theme::Palette;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

pub struct ServerFormView<'a> {
    form: &'a ServerForm,
    title: String,
}

impl<'a> ServerFormView<'a> {
    pub fn new(form: &'a ServerForm, title: String) -> Self {
        Self { form, title }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        palette: &Palette,
        translator: &Translator,
        area: Rect,
    ) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .border_style(palette.focused_border())
            .style(palette.overlay());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let focused = self.form.focused();
        let mut lines: Vec<Line> = Vec::with_capacity(self.form.fields().len() * 2 + 2);
        let mut cursor = None;

        for field in self.form.fields() {
            let is_focused = *field == focused;
            let label = format!("{:<14}", translator.instant(field.label_key()));
            let value = self.display_value(*field, translator);
            let value_text = if field.is_choice() {
                format!("◀ {value} ▶")
            } else {
                value
            };

            if is_focused && !field.is_choice() {
                let x = inner.x
                    + 2
                    + label.chars().count() as u16
                    + value_text.chars().count() as u16;
                cursor = Some((x, inner.y + lines.len() as u16));
            }

            let marker = if is_focused { "▶ " } else { "  " };
            let value_style = if is_focused {
                palette.accent().add_modifier(Modifier::BOLD)
            } else {
                palette.overlay()
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(label, palette.muted()),
                Span::styled(value_text, value_style),
            ]));

            if let Some(error) = self.form.visible_error(*field) {
                lines.push(Line::from(Span::styled(
                    format!("  {:<14}{}", "", error.render(translator)),
                    palette.error_text(),
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "[Enter] {}   [Esc] {}   [Tab] ↓   [←/→] ◀ ▶",
                translator.instant("COMMON.SAVE"),
                translator.instant("COMMON.CANCEL")
            ),
            palette.muted(),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
    }

    fn display_value(&self, field: FormField, translator: &Translator) -> String {
        match field {
            FormField::Status => self
                .form
                .status
                .map(|s| translator.instant(s.label_key()))
                .unwrap_or_default(),
            other => self.form.value(other),
        }
    }
}
