use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{Author, Message};
use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubble width as a fraction of the row width (numerator / denominator).
const WIDTH_NUM: u16 = 2;
const WIDTH_DEN: u16 = 3;
/// Never shrink a bubble below this, even in a very narrow terminal.
const MIN_BUBBLE_WIDTH: u16 = 16;

/// A single transcript bubble.
///
/// `Bubble` is a transient component: created fresh each frame with the
/// message and theme it needs. User messages sit against the left edge
/// with one treatment, assistant messages against the right edge with
/// another, both bounded to a fraction of the row width so long replies
/// wrap instead of spanning the terminal.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered
/// height with `textwrap` options matching Ratatui's `Paragraph` wrapping,
/// so the parent view can lay out and scroll without rendering first.
#[derive(Clone, Copy)]
pub struct Bubble<'a> {
    pub message: &'a Message,
    pub theme: &'a Theme,
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, theme: &'a Theme) -> Self {
        Self { message, theme }
    }

    /// Bounded bubble width for a transcript row of the given width.
    pub fn bubble_width(row_width: u16) -> u16 {
        (row_width * WIDTH_NUM / WIDTH_DEN)
            .max(MIN_BUBBLE_WIDTH)
            .min(row_width)
    }

    /// Calculate the height required for this message given the row width.
    ///
    /// The wrapping options must match the Ratatui default for `Paragraph`
    /// to ensure 1:1 mapping between calculated and actual height.
    pub fn calculate_height(message: &Message, row_width: u16) -> u16 {
        let content_width = Self::bubble_width(row_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }

        let content = message.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

impl<'a> Widget for Bubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let (role, text_style, border_style, align_right) = match self.message.author {
            Author::User => ("you", self.theme.user_text, self.theme.user_border, false),
            Author::Assistant => (
                "gemini",
                self.theme.assistant_text,
                self.theme.assistant_border,
                true,
            ),
        };

        // Position the bounded bubble inside the full-width row.
        let width = Self::bubble_width(area.width).min(area.width);
        let x = if align_right {
            area.x + area.width.saturating_sub(width)
        } else {
            area.x
        };
        let bubble_area = Rect::new(x, area.y, width, area.height);

        let block = Block::bordered()
            .title(role)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(bubble_area);
        block.render(bubble_area, buf);

        let paragraph = Paragraph::new(self.message.text.trim())
            .style(text_style)
            .wrap(Wrap { trim: true });

        paragraph.render(inner_area, buf);
    }
}

impl<'a> Component for Bubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
