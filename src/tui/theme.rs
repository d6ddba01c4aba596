//! Color palettes for the two display modes.
//!
//! The mode lives in core state (it is flipped by an action); this module
//! is the only place that interprets it. Nothing else depends on the mode.

use ratatui::style::{Color, Modifier, Style};

use crate::core::state::ThemeMode;

#[derive(Debug, Clone)]
pub struct Theme {
    /// Overall background color to paint the full frame
    pub background: Color,

    // Bubbles
    pub user_text: Style,
    pub user_border: Style,
    pub assistant_text: Style,
    pub assistant_border: Style,

    // Chrome
    pub title: Style,
    pub status: Style,
    pub spinner: Style,

    // Input area
    pub input_text: Style,
    pub input_border: Style,

    // Attachment overlay
    pub overlay_border: Style,
    pub overlay_item: Style,
    pub overlay_selected: Style,
    pub hint: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            background: Color::Reset,
            user_text: Style::default().fg(Color::Cyan),
            user_border: Style::default().fg(Color::Cyan),
            assistant_text: Style::default().fg(Color::Green),
            assistant_border: Style::default().fg(Color::Green),

            title: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::DarkGray),
            spinner: Style::default().fg(Color::Green),

            input_text: Style::default().fg(Color::White),
            input_border: Style::default().fg(Color::Gray),

            overlay_border: Style::default().fg(Color::DarkGray),
            overlay_item: Style::default().fg(Color::Gray),
            overlay_selected: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            hint: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn light() -> Self {
        Theme {
            background: Color::White,
            user_text: Style::default().fg(Color::Blue),
            user_border: Style::default().fg(Color::Blue),
            assistant_text: Style::default().fg(Color::Rgb(0, 100, 0)),
            assistant_border: Style::default().fg(Color::Rgb(0, 100, 0)),

            title: Style::default().fg(Color::DarkGray),
            status: Style::default().fg(Color::Gray),
            spinner: Style::default().fg(Color::Rgb(0, 100, 0)),

            input_text: Style::default().fg(Color::Black),
            input_border: Style::default().fg(Color::DarkGray),

            overlay_border: Style::default().fg(Color::Gray),
            overlay_item: Style::default().fg(Color::DarkGray),
            overlay_selected: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            hint: Style::default().fg(Color::Gray),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}
