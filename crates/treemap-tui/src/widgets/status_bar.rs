//! One-line summary of the last load.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Widget},
};

/// Outcome of the last load as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loading,
    Loaded(String),
    Failed(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Loading => "Loading trees…",
            Status::Loaded(s) | Status::Failed(s) => s,
        }
    }
}

pub struct StatusBar<'a> {
    status: &'a Status,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(status: &'a Status, theme: &'a Theme) -> Self {
        Self { status, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = match self.status {
            Status::Failed(_) => self.theme.status_error,
            _ => self.theme.status_ok,
        };
        Paragraph::new(Line::from(format!(" {}", self.status.text())))
            .style(style)
            .render(area, buf);
    }
}
