//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! | Key(s)                  | Event                 |
//! |-------------------------|-----------------------|
//! | `q`, `Ctrl+c`           | `Quit`                |
//! | `Tab`                   | `NextView`            |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`            |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`          |
//! | `g` / `G`               | `Top` / `Bottom`      |
//! | `p`                     | `TogglePending`       |
//! | `r`                     | `Reload`              |
//! | `↑` / `k`, `↓` / `j`    | `Nav(Up)`, `Nav(Down)`|
//! | `←` / `h`, `→` / `l`    | `Nav(Left)`, `Nav(Right)` (switch view) |
//! | printable char          | `Char(c)`             |
//! | `Backspace`             | `Backspace`           |
//! | `Enter`                 | `Enter`               |
//! | `Esc`                   | `Escape`              |
//! | terminal resize         | `Resize(w, h)`        |
//!
//! ## Insert mode
//!
//! While the command bar is open the event loop calls [`to_app_event_insert`]
//! instead: every printable character is forwarded as `Char`, and only
//! `Ctrl+c`, `Escape`, `Enter`, `Backspace` and the arrow keys keep their
//! special bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Switch between the marker list and the growth chart.
    NextView,
    ScrollUp,
    ScrollDown,
    Top,
    Bottom,
    /// Show or hide the pending group.
    TogglePending,
    /// Re-fetch the sheet.
    Reload,
    Nav(Direction),
    Char(char),
    Backspace,
    Enter,
    Resize(u16, u16),
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal mode).
///
/// Returns `None` for events with no meaning to the application (mouse
/// events, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for the command bar.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::NextView),

        PageUp => Some(AppEvent::ScrollUp),
        PageDown => Some(AppEvent::ScrollDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollDown),

        // Uppercase G may or may not carry SHIFT depending on the terminal.
        Char('G') => Some(AppEvent::Bottom),
        Char('g') if key.modifiers == Mod::NONE => Some(AppEvent::Top),
        Home => Some(AppEvent::Top),
        End => Some(AppEvent::Bottom),

        Char('p') if key.modifiers == Mod::NONE => Some(AppEvent::TogglePending),
        Char('r') if key.modifiers == Mod::NONE => Some(AppEvent::Reload),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
