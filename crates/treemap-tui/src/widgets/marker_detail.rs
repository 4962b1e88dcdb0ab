//! Detail pane, the terminal equivalent of a marker popup.
//!
//! Terminal output is not HTML, so fields are shown as plain text here; the
//! escaped [`treemap_core::Popup`] is only needed by HTML renderers.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use treemap_core::CanonicalRecord;

pub struct MarkerDetail<'a> {
    record: Option<&'a CanonicalRecord>,
    theme: &'a Theme,
}

impl<'a> MarkerDetail<'a> {
    pub fn new(record: Option<&'a CanonicalRecord>, theme: &'a Theme) -> Self {
        Self { record, theme }
    }
}

impl Widget for MarkerDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Details")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(record) = self.record else {
            return;
        };

        Paragraph::new(detail_lines(record, self.theme))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<10}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn detail_lines(record: &CanonicalRecord, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            record.name().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(
                format!("{:<10}", "Status"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                record.moderation().to_string(),
                theme.state_style(record.moderation()),
            ),
        ]),
        field("Access", record.access().to_string()),
        field(
            "Location",
            format!("{:.6}, {:.6}", record.latitude(), record.longitude()),
        ),
    ];

    if let Some(ts) = record.submitted_at() {
        lines.push(field("Submitted", ts.to_string()));
    }
    if let Some(url) = record.photo_url() {
        lines.push(field("Photo", url.to_string()));
    }
    if !record.notes().is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(record.notes().to_string()));
    }

    lines
}
