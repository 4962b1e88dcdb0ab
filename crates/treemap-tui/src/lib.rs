//! treemap TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, Loader};

/// Start the TUI. `loader` is called for the initial load and on every reload.
pub fn run(config: treemap_core::config::Config, loader: Loader) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    App::new(config, theme, loader).run()
}
