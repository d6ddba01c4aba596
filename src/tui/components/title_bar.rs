//! # TitleBar Component
//!
//! One-line header showing the application title, model, status line,
//! display mode, and a "new content below" marker.
//!
//! TitleBar is purely presentational: it receives all data as props and
//! has no internal state. The props come from different owners (model and
//! status from core state, the unseen-content flag from the transcript
//! view) but the bar doesn't care; it renders what it's given.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// Top status bar component.
///
/// # Props
///
/// - `model_name`: the remote model in use
/// - `status_message`: transient status (e.g. "Waiting for a reply...")
/// - `theme_label`: current display mode name
/// - `has_unseen_content`: content exists below the scroll position
pub struct TitleBar {
    pub model_name: String,
    pub status_message: String,
    pub theme_label: &'static str,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(
        model_name: String,
        status_message: String,
        theme_label: &'static str,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            model_name,
            status_message,
            theme_label,
            has_unseen_content,
        }
    }

    fn title_text(&self) -> String {
        let mut text = format!("Kaiwa (model: {})", self.model_name);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            text.push_str(" | ↓ New");
        }
        text.push_str(&format!(" | {}", self.theme_label));
        text
    }

    pub fn render_themed(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Span::styled(self.title_text(), theme.title), area);
    }
}

impl Component for TitleBar {
    /// Render the title bar as a single line with conditional formatting.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.title_text()), area);
    }
}
