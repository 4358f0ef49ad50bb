//! src/view/components/detail_view.rs
//!
//! Attributes of one server, its actions, and the synthetic CPU chart. In
//! edit mode the attribute panel is replaced by the edit form.

use chrono::{DateTime, Local};
use ratatui::{
    prelude::*,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::controller::server_detail::ServerDetailController;
use crate::i18n::Translator;
use crate::model::cpu_chart::CpuChart;
use crate::util::humanize::{format_storage_gb, format_uptime};
use crate::view::components::server_form::ServerFormView;
use crate::view::theme::Palette;

pub struct DetailView;

impl DetailView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        detail: &ServerDetailController,
        palette: &Palette,
        translator: &Translator,
        area: Rect,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let server = detail.server();
        if detail.is_edit_mode() {
            let title = translator.instant_with(
                "SERVER_DETAIL.EDIT_TITLE",
                &[("hostname", server.hostname.as_str())],
            );
            ServerFormView::new(&detail.form, title).render(frame, palette, translator, chunks[0]);
        } else {
            Self::render_attributes(frame, detail, palette, translator, chunks[0]);
        }

        Self::render_chart(frame, &detail.chart, palette, translator, chunks[1]);
    }

    fn render_attributes(
        frame: &mut Frame<'_>,
        detail: &ServerDetailController,
        palette: &Palette,
        translator: &Translator,
        area: Rect,
    ) {
        let server = detail.server();
        let field = |key: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<16}", translator.instant(key)), palette.muted()),
                Span::raw(value),
            ])
        };

        let mut lines = vec![
            field("SERVER.FIELDS.ID", server.id.clone()),
            field("SERVER.FIELDS.HOSTNAME", server.hostname.clone()),
            field("SERVER.FIELDS.IP_ADDRESS", server.ip_address.clone()),
            Line::from(vec![
                Span::styled(
                    format!("{:<16}", translator.instant("SERVER.FIELDS.STATUS")),
                    palette.muted(),
                ),
                Span::styled(
                    translator.instant(server.status.label_key()),
                    palette.status(server.status),
                ),
            ]),
            field("SERVER.FIELDS.LOCATION", server.location.to_string()),
            field("SERVER.FIELDS.OS", server.os.clone()),
            field("SERVER.FIELDS.CPU_CORES", server.cpu_cores.to_string()),
            field("SERVER.FIELDS.RAM_GB", format!("{} GB", server.ram_gb)),
            field("SERVER.FIELDS.STORAGE_GB", format_storage_gb(server.storage_gb)),
            field(
                "SERVER.FIELDS.UPTIME",
                format_uptime(server.uptime_hours, &translator.instant("COMMON.OFFLINE")),
            ),
            Line::from(""),
        ];

        lines.push(Line::from(Span::styled(
            format!(
                "[e] {}   [r] {}   [x] {}   [Esc] {}",
                translator.instant("COMMON.EDIT"),
                translator.instant("SERVER_DETAIL.RESTART"),
                translator.instant("SERVER_DETAIL.SHUT_DOWN"),
                translator.instant("COMMON.BACK"),
            ),
            palette.accent(),
        )));

        let title = translator.instant_with(
            "SERVER_DETAIL.TITLE",
            &[("hostname", server.hostname.as_str())],
        );
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {title} "))
                    .title_style(palette.accent().bold())
                    .border_style(palette.border())
                    .style(palette.base()),
            ),
            area,
        );
    }

    #[allow(clippy::cast_precision_loss)]
    fn render_chart(
        frame: &mut Frame<'_>,
        chart: &CpuChart,
        palette: &Palette,
        translator: &Translator,
        area: Rect,
    ) {
        let data: Vec<(f64, f64)> = chart
            .points
            .iter()
            .map(|p| (p.timestamp_ms as f64, p.usage))
            .collect();
        let (start, end) = chart.time_bounds();

        let datasets = vec![
            Dataset::default()
                .name(chart.labels.series.as_str())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(palette.accent())
                .data(&data),
        ];

        let x_labels: Vec<Span> = [start, start + (end - start) / 2, end]
            .into_iter()
            .map(|ms| Span::raw(clock_label(ms)))
            .collect();

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", chart.labels.title))
            .border_style(palette.border())
            .style(palette.base());

        // Latest reading, since a terminal chart has no hover.
        if let Some(latest) = chart.points.last() {
            let value = format!("{:.1}", latest.usage);
            let time = clock_label(latest.timestamp_ms);
            let caption = translator.instant_with(
                "CHART.CPU_USAGE_TOOLTIP",
                &[("value", value.as_str()), ("time", time.as_str())],
            );
            block = block.title_bottom(Line::from(format!(" {caption} ")).right_aligned());
        }

        let widget = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title(chart.labels.x_axis.as_str())
                    .style(palette.muted())
                    .bounds([start as f64, end as f64])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(chart.labels.y_axis.as_str())
                    .style(palette.muted())
                    .bounds([0.0, 100.0])
                    .labels(["0", "50", "100"]),
            );

        frame.render_widget(widget, area);
    }
}

fn clock_label(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|utc| utc.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_default()
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}
