//! src/view/components/server_table.rs

use crate::{
    engine::{
        filter::SearchField,
        highlight::Highlighter,
        sort::{SortColumn, SortDirection},
    },
    controller::server_list::FilterLabels,
    model::{app_state::AppState, server::Server},
    util::humanize::{format_storage_gb, format_uptime},
    view::theme::Palette,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState},
};

const CHECKED: &str = "[x]";
const PARTIAL: &str = "[-]";
const UNCHECKED: &str = "[ ]";

pub struct ServerTable;

impl ServerTable {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, state: &AppState, area: Rect) {
        let palette = &state.ui.palette;
        let t = &state.translator;
        let list = &state.list;

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", t.instant("SERVER_LIST.TITLE")))
            .title_style(palette.accent().bold())
            .border_style(palette.border())
            .style(palette.base());

        if list.visible().is_empty() {
            let empty = Paragraph::new(t.instant("SERVER_LIST.EMPTY"))
                .style(palette.muted())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let select_all = if list.all_selected() {
            CHECKED
        } else if list.some_selected() {
            PARTIAL
        } else {
            UNCHECKED
        };

        let header_cells = std::iter::once(Cell::from(select_all)).chain(
            SortColumn::ALL.iter().enumerate().map(|(i, column)| {
                let arrow = match list.sort.indicator(*column) {
                    Some(SortDirection::Asc) => " ▲",
                    Some(SortDirection::Desc) => " ▼",
                    None => "",
                };
                Cell::from(format!("{} {}{arrow}", i + 1, t.instant(column.header_key())))
            }),
        );
        let header = Row::new(header_cells).style(palette.header());

        let highlighter = Highlighter::new(
            &list.criteria.search_term,
            state.config.search.highlight_min_length,
        );
        let offline = t.instant("COMMON.OFFLINE");

        let rows: Vec<Row> = list
            .visible()
            .iter()
            .map(|server| {
                Self::row(
                    server,
                    list.selection.is_selected(&server.id),
                    list.criteria.search_field,
                    highlighter.as_ref(),
                    palette,
                    &list.labels,
                    &offline,
                )
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Fill(2),
            Constraint::Length(16),
            Constraint::Length(13),
            Constraint::Length(11),
            Constraint::Fill(2),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(10),
        ];

        let mut table_state = TableState::default().with_selected(Some(state.ui.cursor));

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(palette.cursor_row())
            .highlight_symbol("▶ ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn row<'a>(
        server: &'a Server,
        selected: bool,
        search_field: SearchField,
        highlighter: Option<&Highlighter>,
        palette: &Palette,
        labels: &FilterLabels,
        offline: &str,
    ) -> Row<'a> {
        let searchable = |field: SearchField, text: &'a str| -> Cell<'a> {
            match highlighter {
                Some(h) if field == search_field => Cell::from(Self::highlighted(h, text, palette)),
                _ => Cell::from(text),
            }
        };

        Row::new(vec![
            Cell::from(if selected { CHECKED } else { UNCHECKED }),
            searchable(SearchField::Hostname, &server.hostname),
            Cell::from(server.ip_address.as_str()),
            Cell::from(labels.status_label(Some(server.status)).to_string())
                .style(palette.status(server.status)),
            Cell::from(server.location.as_str()),
            searchable(SearchField::Os, &server.os),
            Cell::from(server.cpu_cores.to_string()),
            Cell::from(format!("{} GB", server.ram_gb)),
            Cell::from(format_storage_gb(server.storage_gb)),
            Cell::from(format_uptime(server.uptime_hours, offline)),
        ])
        .style(if selected { palette.accent() } else { palette.base() })
    }

    fn highlighted<'a>(highlighter: &Highlighter, text: &'a str, palette: &Palette) -> Line<'a> {
        highlighter
            .segments(text)
            .into_iter()
            .map(|segment| {
                if segment.matched {
                    Span::styled(segment.text, palette.search_match())
                } else {
                    Span::raw(segment.text)
                }
            })
            .collect()
    }
}

impl Default for ServerTable {
    fn default() -> Self {
        Self::new()
    }
}
