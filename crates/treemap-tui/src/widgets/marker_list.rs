//! Marker list widget — the scrollable list of visible markers on the left.
//!
//! Approved markers come first, then pending ones when the pending layer is
//! shown. The cursor is an absolute index into `records`; moving it past the
//! visible window scrolls the window.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use treemap_core::CanonicalRecord;

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct MarkerListState {
    pub records: Vec<CanonicalRecord>,
    /// Absolute index of the highlighted record.
    pub cursor: usize,
    /// Index of the first visible record.
    pub offset: usize,
    pub show_coordinates: bool,
    /// Cached from the last render so `handle()` can keep the cursor visible.
    last_height: Cell<usize>,
}

impl MarkerListState {
    pub fn new(records: Vec<CanonicalRecord>) -> Self {
        Self {
            records,
            cursor: 0,
            offset: 0,
            show_coordinates: true,
            last_height: Cell::new(20),
        }
    }

    /// Replace the records after a load or a pending toggle, keeping the
    /// cursor in range.
    pub fn set_records(&mut self, records: Vec<CanonicalRecord>) {
        self.records = records;
        let last = self.records.len().saturating_sub(1);
        self.cursor = self.cursor.min(last);
        self.offset = self.offset.min(self.cursor);
    }

    pub fn selected(&self) -> Option<&CanonicalRecord> {
        self.records.get(self.cursor)
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    fn move_to(&mut self, target: usize) {
        let last = self.records.len().saturating_sub(1);
        self.cursor = target.min(last);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height() {
            self.offset = self.cursor + 1 - self.height();
        }
    }

    pub fn handle(&mut self, event: &AppEvent) {
        if self.records.is_empty() {
            return;
        }

        match event {
            AppEvent::Nav(Direction::Up) => self.move_to(self.cursor.saturating_sub(1)),
            AppEvent::Nav(Direction::Down) => self.move_to(self.cursor + 1),
            AppEvent::ScrollUp => self.move_to(self.cursor.saturating_sub(PAGE_STEP)),
            AppEvent::ScrollDown => self.move_to(self.cursor + PAGE_STEP),
            AppEvent::Top => self.move_to(0),
            AppEvent::Bottom => self.move_to(self.records.len()),
            _ => return,
        }

        tracing::debug!(cursor = self.cursor, offset = self.offset, "markers: cursor moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct MarkerList<'a> {
    state: &'a MarkerListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> MarkerList<'a> {
    pub fn new(state: &'a MarkerListState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for MarkerList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = format!("Markers ({})", self.state.records.len());
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        self.state.last_height.set(height);

        let total = self.state.records.len();
        let start = self.state.offset.min(total);
        let end = (start + height).min(total);

        let lines: Vec<Line<'static>> = self.state.records[start..end]
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let mut line = render_record(record, self.state.show_coordinates, self.theme);
                if self.focused && start + row == self.state.cursor {
                    line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
                }
                line
            })
            .collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        if lines.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "no markers to show",
                Style::default().add_modifier(Modifier::DIM),
            )))
            .render(text_area, buf);
            return;
        }

        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total)
            .position(start)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

fn render_record(record: &CanonicalRecord, show_coordinates: bool, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = vec![
        Span::styled("● ", theme.state_style(record.moderation())),
        Span::raw(format!("{:<24} ", record.name())),
        Span::styled(
            record.access().to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];

    if show_coordinates {
        spans.push(Span::styled(
            format!("  ({:.5}, {:.5})", record.latitude(), record.longitude()),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    Line::from(spans)
}
