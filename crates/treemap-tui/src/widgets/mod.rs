//! Ratatui widgets for the treemap TUI.

pub mod command_bar;
pub mod growth_chart;
pub mod help;
pub mod marker_detail;
pub mod marker_list;
pub mod status_bar;
pub mod tab_bar;
