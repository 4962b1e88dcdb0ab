//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Loads go through the
//! caller-supplied [`Loader`] so the shell itself never touches the network.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        growth_chart::GrowthChart,
        help::HelpPopup,
        marker_detail::MarkerDetail,
        marker_list::{MarkerList, MarkerListState},
        status_bar::{Status, StatusBar},
        tab_bar::TabBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use treemap_core::{
    config::Config,
    growth::{GrowthSeries, LOAD_ERROR_NOTE},
    partition::LOAD_ERROR_STATUS,
    LoadReport, MarkerGroups,
};

/// Fetches and processes the sheet. Called once at startup and again on
/// every reload request.
pub type Loader = Box<dyn FnMut() -> anyhow::Result<LoadReport>>;

// ---------------------------------------------------------------------------
// Focus + view types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Markers,
    Growth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub view: View,
    pub focus: Focus,
    pub markers: MarkerListState,
    /// Groups from the last successful load.
    pub groups: Option<MarkerGroups>,
    /// `None` after a failed load.
    pub growth: Option<GrowthSeries>,
    pub growth_note: String,
    pub status: Status,
    pub show_pending: bool,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Set by `r` / `:reload`; the event loop performs the load.
    pub reload_requested: bool,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme) -> Self {
        let mut markers = MarkerListState::new(Vec::new());
        markers.show_coordinates = config.ui.show_coordinates;

        Self {
            view: View::Markers,
            focus: Focus::List,
            markers,
            groups: None,
            growth: None,
            growth_note: String::new(),
            status: Status::Loading,
            show_pending: config.ui.show_pending,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            reload_requested: true,
            quit: false,
        }
    }

    /// Replace everything derived from the previous load.
    pub fn apply_report(&mut self, report: LoadReport) {
        tracing::info!(
            total = report.groups.total_count,
            approved = report.groups.approved.len(),
            pending = report.groups.pending.len(),
            "load applied"
        );
        self.status = Status::Loaded(report.groups.status_line());
        self.growth_note = report.growth.note();
        self.growth = Some(report.growth);
        self.groups = Some(report.groups);
        self.refresh_markers();
    }

    /// Clear all markers and show the load error in both views.
    pub fn apply_error(&mut self, err: &anyhow::Error) {
        tracing::error!(error = %err, "load failed");
        self.status = Status::Failed(LOAD_ERROR_STATUS.to_string());
        self.groups = None;
        self.growth = None;
        self.growth_note = LOAD_ERROR_NOTE.to_string();
        self.refresh_markers();
    }

    pub fn toggle_pending(&mut self) {
        self.show_pending = !self.show_pending;
        tracing::debug!(show_pending = self.show_pending, "pending layer toggled");
        self.refresh_markers();
    }

    fn refresh_markers(&mut self) {
        let records = self
            .groups
            .as_ref()
            .map(|g| g.visible(self.show_pending).cloned().collect())
            .unwrap_or_default();
        self.markers.set_records(records);
    }

    fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        if self.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.command_bar.clear();
                    self.focus = Focus::List;
                }
                AppEvent::Enter => {
                    let input = self.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            self.command_bar.clear();
                            self.focus = Focus::List;
                            execute_command(self, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            self.command_bar.clear();
                            self.focus = Focus::List;
                        }
                        Err(msg) => self.command_bar.error = Some(msg),
                    }
                }
                AppEvent::Quit => self.quit = true,
                other => self.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!("entering command mode");
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::Char('1') | AppEvent::Nav(Direction::Left) => self.view = View::Markers,
            AppEvent::Char('2') | AppEvent::Nav(Direction::Right) => self.view = View::Growth,
            AppEvent::NextView => {
                self.view = match self.view {
                    View::Markers => View::Growth,
                    View::Growth => View::Markers,
                };
                tracing::debug!(view = ?self.view, "view switched");
            }
            AppEvent::TogglePending => self.toggle_pending(),
            AppEvent::Reload => self.reload_requested = true,
            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}
            other if self.view == View::Markers => self.markers.handle(&other),
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    loader: Loader,
}

impl App {
    pub fn new(config: Config, theme: Theme, loader: Loader) -> Self {
        App {
            state: AppState::new(config, theme),
            loader,
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            if self.state.reload_requested {
                self.state.reload_requested = false;
                self.state.status = Status::Loading;
                {
                    let s = &self.state;
                    terminal.draw(|frame| draw(frame, s))?;
                }
                self.reload();
            }

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if self.state.focus == Focus::Command {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn reload(&mut self) {
        match (self.loader)() {
            Ok(report) => self.state.apply_report(report),
            Err(err) => self.state.apply_error(&err),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line tab bar | body | 1-line status bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        TabBar::new(state.view, state.show_pending, &state.theme),
        vert[0],
    );

    match state.view {
        View::Markers => {
            let horiz = Layout::default()
                .direction(LayoutDir::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Fill(1)])
                .split(vert[1]);
            frame.render_widget(
                MarkerList::new(&state.markers, state.focus == Focus::List, &state.theme),
                horiz[0],
            );
            frame.render_widget(
                MarkerDetail::new(state.markers.selected(), &state.theme),
                horiz[1],
            );
        }
        View::Growth => {
            frame.render_widget(
                GrowthChart::new(state.growth.as_ref(), &state.growth_note, &state.theme),
                vert[1],
            );
        }
    }

    frame.render_widget(StatusBar::new(&state.status, &state.theme), vert[2]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use treemap_core::{Normalizer, RawRecord};

    fn state() -> AppState {
        AppState::new(Config::defaults(), Theme::load_default())
    }

    fn report() -> LoadReport {
        let rows = vec![
            RawRecord::new()
                .with("lat", "52.1")
                .with("lng", "0.1")
                .with("review_status", "approved")
                .with("Timestamp", "2026-03-04 10:00:00"),
            RawRecord::new().with("lat", "52.2").with("lng", "0.2"),
            RawRecord::new()
                .with("lat", "52.3")
                .with("lng", "0.3")
                .with("review_status", "rejected"),
        ];
        LoadReport::from_rows(&Normalizer::default(), &rows, chrono::Utc::now())
    }

    fn type_command(s: &mut AppState, text: &str) {
        s.handle(AppEvent::Char(':'));
        for c in text.chars() {
            s.handle(AppEvent::Char(c));
        }
        s.handle(AppEvent::Enter);
    }

    #[test]
    fn starts_loading_with_reload_pending() {
        let s = state();
        assert_eq!(s.status, Status::Loading);
        assert!(s.reload_requested);
        assert!(!s.show_pending);
    }

    #[test]
    fn apply_report_hides_pending_by_default() {
        let mut s = state();
        s.apply_report(report());
        assert_eq!(s.markers.records.len(), 1);
        assert_eq!(
            s.status.text(),
            "Showing 2 trees (1 approved, 1 pending) out of 3 total records."
        );
        s.handle(AppEvent::TogglePending);
        assert_eq!(s.markers.records.len(), 2);
    }

    #[test]
    fn apply_error_clears_markers_and_chart() {
        let mut s = state();
        s.apply_report(report());
        s.apply_error(&anyhow::anyhow!("connection refused"));
        assert!(s.markers.records.is_empty());
        assert!(s.growth.is_none());
        assert_eq!(s.growth_note, LOAD_ERROR_NOTE);
        assert_eq!(s.status, Status::Failed(LOAD_ERROR_STATUS.to_string()));
    }

    #[test]
    fn reload_key_sets_flag() {
        let mut s = state();
        s.reload_requested = false;
        s.handle(AppEvent::Reload);
        assert!(s.reload_requested);
    }

    #[test]
    fn tab_cycles_views() {
        let mut s = state();
        s.handle(AppEvent::NextView);
        assert_eq!(s.view, View::Growth);
        s.handle(AppEvent::NextView);
        assert_eq!(s.view, View::Markers);
    }

    #[test]
    fn left_right_follow_tab_order() {
        let mut s = state();
        s.handle(AppEvent::Nav(Direction::Right));
        assert_eq!(s.view, View::Growth);
        s.handle(AppEvent::Nav(Direction::Right));
        assert_eq!(s.view, View::Growth);
        s.handle(AppEvent::Nav(Direction::Left));
        assert_eq!(s.view, View::Markers);
    }

    #[test]
    fn help_swallows_other_keys() {
        let mut s = state();
        s.handle(AppEvent::Char('?'));
        s.handle(AppEvent::NextView);
        assert_eq!(s.view, View::Markers);
        s.handle(AppEvent::Escape);
        assert!(!s.show_help);
    }

    #[test]
    fn command_bar_executes_commands() {
        let mut s = state();
        type_command(&mut s, "chart");
        assert_eq!(s.view, View::Growth);
        assert_eq!(s.focus, Focus::List);

        type_command(&mut s, "pending");
        assert!(s.show_pending);

        type_command(&mut s, "q");
        assert!(s.quit);
    }

    #[test]
    fn bad_command_keeps_bar_open() {
        let mut s = state();
        type_command(&mut s, "nope");
        assert_eq!(s.focus, Focus::Command);
        assert!(s.command_bar.error.is_some());
        s.handle(AppEvent::Escape);
        assert_eq!(s.focus, Focus::List);
    }
}
