//! Tab bar widget — the strip of views at the top of the screen.

use crate::app::View;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders the 1-line view strip. The pending-layer state is shown next to
/// the markers tab, and keybinding hints are right-aligned in the same row.
pub struct TabBar<'a> {
    active: View,
    show_pending: bool,
    _theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(active: View, show_pending: bool, theme: &'a Theme) -> Self {
        Self { active, show_pending, _theme: theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pending = if self.show_pending { " +pending" } else { "" };
        let labels = vec![
            Line::from(format!(" 1:markers{pending} ")),
            Line::from(" 2:growth "),
        ];

        let selected = match self.active {
            View::Markers => 0,
            View::Growth => 1,
        };

        Tabs::new(labels)
            .select(selected)
            .highlight_style(
                Style::default()
                    .bg(ratatui::style::Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("")
            .render(area, buf);

        let hint = " q:quit  r:reload  p:pending  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
