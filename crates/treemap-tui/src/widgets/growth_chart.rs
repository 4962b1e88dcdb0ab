//! Bar chart of approved submissions per month.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{BarChart, Block, Paragraph, Widget, Wrap},
};
use treemap_core::growth::GrowthSeries;

const BAR_WIDTH: u16 = 7;

pub struct GrowthChart<'a> {
    /// `None` when the last load failed.
    series: Option<&'a GrowthSeries>,
    note: &'a str,
    theme: &'a Theme,
}

impl<'a> GrowthChart<'a> {
    pub fn new(series: Option<&'a GrowthSeries>, note: &'a str, theme: &'a Theme) -> Self {
        Self { series, note, theme }
    }
}

impl Widget for GrowthChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(2)])
            .split(area);

        let block = Block::bordered()
            .title("New approved trees per month")
            .border_style(self.theme.border_focused);

        match self.series.filter(|s| !s.is_empty()) {
            Some(series) => {
                let labels: Vec<String> = series.months.iter().map(|m| m.month.to_string()).collect();
                let data: Vec<(&str, u64)> = labels
                    .iter()
                    .zip(&series.months)
                    .map(|(label, m)| (label.as_str(), m.count as u64))
                    .collect();

                BarChart::default()
                    .block(block)
                    .data(&data[..])
                    .bar_width(BAR_WIDTH)
                    .bar_gap(1)
                    .bar_style(self.theme.chart_bar)
                    .value_style(self.theme.chart_value)
                    .render(parts[0], buf);
            }
            None => block.render(parts[0], buf),
        }

        Paragraph::new(Line::styled(
            self.note.to_string(),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .wrap(Wrap { trim: true })
        .render(parts[1], buf);
    }
}
