//! # InputBox Component
//!
//! Growable multi-line text entry.
//!
//! ## Responsibilities
//!
//! - Capture text input and editing (backspace, delete, cursor movement, paste)
//! - Report a preferred height derived from the wrapped line count on every
//!   edit, clamped to a maximum (internal scrolling takes over beyond that)
//! - Handle submission (Enter): emit the text, clear the buffer, collapse
//!   back to one line
//!
//! ## State Management
//!
//! The buffer, cursor byte offset, and scroll offset are internal state.
//! The parent queries [`InputBox::calculate_height`] each frame to size the
//! layout.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border width)
const BORDER_OFFSET: u16 = 1;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed with non-blank content)
    Submit(String),
    /// Text content changed (parent recomputes the layout height)
    ContentChanged,
}

/// Build textwrap options configured for the input box inner width.
fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Calculate the inner content width after subtracting border/padding overhead.
fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Count wrapped lines for the given text, accounting for trailing newlines
/// that textwrap may not represent as empty lines.
fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }

    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = (lines.len() as u16).max(1);

    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count += 1;
    }

    count
}

/// Find the byte offset of the previous character boundary before `pos`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Multi-line text input whose preferred height follows its content.
///
/// # State
///
/// - `buffer`: current text being typed
/// - `cursor_pos`: cursor position as byte offset (0..=buffer.len())
/// - `scroll_offset`: first visible wrapped line when content exceeds
///   [`MAX_VISIBLE_LINES`]
pub struct InputBox {
    pub buffer: String,
    cursor_pos: usize,
    scroll_offset: u16,
    /// Cached content width from last render (used for vertical movement)
    last_content_width: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Replace the buffer contents, placing the cursor at the end. Used to
    /// hand back text whose submission was rejected mid-round-trip.
    pub fn set_text(&mut self, text: String) {
        self.cursor_pos = text.len();
        self.buffer = text;
        self.scroll_offset = 0;
    }

    /// Preferred height for the current buffer content, clamped to the
    /// viewport limit. Returns a value in
    /// [1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD].
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        let content_lines = wrap_line_count(&self.buffer, width);
        content_lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Which wrapped line (0-based) the cursor is on.
    fn cursor_line(&self, width: u16) -> u16 {
        if width == 0 {
            return 0;
        }
        let before = &self.buffer[..self.cursor_pos];
        let lines = textwrap::wrap(before, wrap_options(width));
        let mut line = lines.len().saturating_sub(1) as u16;

        // A cursor sitting right after a newline starts a fresh line that
        // textwrap does not represent.
        if self.cursor_pos > 0
            && self.buffer.as_bytes()[self.cursor_pos - 1] == b'\n'
            && !lines.last().is_some_and(|l| l.is_empty())
        {
            line += 1;
        }
        line
    }

    /// Keep the cursor's line inside the visible window.
    fn update_scroll_offset(&mut self, content_width: u16) {
        let width = inner_width(content_width);
        if wrap_line_count(&self.buffer, width) <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.cursor_line(width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// The lines currently in view, honoring the scroll offset.
    fn visible_text(&self, content_width: u16) -> String {
        if self.scroll_offset == 0 {
            return self.buffer.clone();
        }

        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }

        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = self.scroll_offset as usize;
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    /// Move the cursor one wrapped line up or down, keeping the column
    /// where possible. Returns `true` if the cursor moved.
    fn move_vertically(&mut self, direction: i16) -> bool {
        let width = inner_width(self.last_content_width);
        if width == 0 || self.buffer.is_empty() {
            return false;
        }

        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        if lines.is_empty() {
            return false;
        }

        // Byte length of a wrapped line including its trailing newline
        let line_byte_span = |line: &str, offset: usize| -> usize {
            let has_newline = offset + line.len() < self.buffer.len()
                && self.buffer.as_bytes()[offset + line.len()] == b'\n';
            line.len() + usize::from(has_newline)
        };

        // Locate the cursor's wrapped line and column
        let mut byte_offset = 0;
        let mut current_line = 0;
        let mut column = 0;
        for (idx, line) in lines.iter().enumerate() {
            if byte_offset + line.len() >= self.cursor_pos {
                current_line = idx;
                column = self.cursor_pos - byte_offset;
                break;
            }
            byte_offset += line_byte_span(line, byte_offset);
        }

        let target_line = if direction < 0 {
            if current_line == 0 {
                return false;
            }
            current_line - 1
        } else {
            if current_line + 1 >= lines.len() {
                return false;
            }
            current_line + 1
        };

        let mut target_start = 0;
        for line in lines.iter().take(target_line) {
            target_start += line_byte_span(line, target_start);
        }

        self.cursor_pos = target_start + column.min(lines[target_line].len());
        true
    }

    /// Screen position for the cursor based on the wrapped layout.
    /// The column is measured in display columns, not chars, so CJK text
    /// places the cursor correctly.
    fn cursor_screen_pos(&self, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + BORDER_OFFSET, area.y + BORDER_OFFSET);
        }

        let before = &self.buffer[..self.cursor_pos];
        let cursor_line = self.cursor_line(width);

        // Column: display width of the tail of the current logical line,
        // re-wrapped to find the segment the cursor sits on. textwrap trims
        // trailing whitespace, so the segment boundaries come from wrapping
        // just this logical line.
        let line_start = before.rfind('\n').map(|p| p + 1).unwrap_or(0);
        let logical_line = &before[line_start..];
        let segments = textwrap::wrap(logical_line, wrap_options(width));

        let cursor_col = if segments.is_empty() {
            0
        } else {
            let chars_in_prev: usize = segments
                .iter()
                .take(segments.len() - 1)
                .map(|seg| seg.chars().count())
                .sum();
            let tail: String = logical_line.chars().skip(chars_in_prev).collect();
            tail.width() as u16
        };

        let visible_line = cursor_line.saturating_sub(self.scroll_offset);
        (
            area.x + BORDER_OFFSET + 1 + cursor_col, // +1 for the padding column
            area.y + BORDER_OFFSET + visible_line,
        )
    }

    pub fn render_themed(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.last_content_width = area.width;
        self.update_scroll_offset(area.width);

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(theme.input_border)
            .title("Message")
            .title_style(theme.input_border)
            .padding(ratatui::widgets::Padding::horizontal(1));

        let input = Paragraph::new(self.visible_text(area.width))
            .block(block)
            .style(theme.input_text);

        frame.render_widget(input, area);

        let (cursor_x, cursor_y) = self.cursor_screen_pos(area);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = Theme::dark();
        self.render_themed(frame, area, &theme);
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor_pos, *c);
                self.cursor_pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor_pos, text);
                self.cursor_pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor_pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor_pos);
                    self.buffer.drain(prev..self.cursor_pos);
                    self.cursor_pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor_pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor_pos);
                    self.buffer.drain(self.cursor_pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor_pos > 0 {
                    self.cursor_pos = prev_char_boundary(&self.buffer, self.cursor_pos);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor_pos < self.buffer.len() {
                    self.cursor_pos = next_char_boundary(&self.buffer, self.cursor_pos);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor_pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor_pos != line_start).then(|| {
                    self.cursor_pos = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor_pos..]
                    .find('\n')
                    .map(|i| self.cursor_pos + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor_pos != line_end).then(|| {
                    self.cursor_pos = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorUp => self
                .move_vertically(-1)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .move_vertically(1)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    None
                } else {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor_pos = 0;
                    self.scroll_offset = 0;
                    Some(InputEvent::Submit(text))
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_input_box_new_is_empty_single_line() {
        let input = InputBox::new();
        assert!(input.buffer.is_empty());
        assert_eq!(input.calculate_height(80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_handle_input_edits_buffer() {
        let mut input = InputBox::new();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");

        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_multibyte_editing_stays_on_boundaries() {
        let mut input = InputBox::new();
        type_str(&mut input, "日本語");
        assert_eq!(input.buffer, "日本語");

        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "日本");

        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "日");
    }

    #[test]
    fn test_height_grows_with_line_count() {
        let mut input = InputBox::new();
        assert_eq!(input.calculate_height(80), 1 + VERTICAL_OVERHEAD);

        type_str(&mut input, "line one\nline two\nline three");
        assert_eq!(input.calculate_height(80), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_height_grows_when_text_wraps() {
        let mut input = InputBox::new();
        // Inner width at content_width 24 is 20; 30 chars wrap to 2 lines.
        type_str(&mut input, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        assert_eq!(input.calculate_height(24), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_height_is_clamped_to_max_visible_lines() {
        let mut input = InputBox::new();
        type_str(&mut input, &"x\n".repeat(20));
        assert_eq!(
            input.calculate_height(80),
            MAX_VISIBLE_LINES + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn test_submit_emits_text_and_resets() {
        let mut input = InputBox::new();
        type_str(&mut input, "hello\nworld");
        assert!(input.calculate_height(80) > 1 + VERTICAL_OVERHEAD);

        let res = input.handle_event(&TuiEvent::Submit);
        match res {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "hello\nworld"),
            other => panic!("Expected Submit event, got {other:?}"),
        }

        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
        assert_eq!(input.cursor_pos, 0);
        // Preferred height collapses back to one line.
        assert_eq!(input.calculate_height(80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_submit_blank_buffer_is_swallowed() {
        let mut input = InputBox::new();
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);

        type_str(&mut input, "   \n ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        // The (whitespace) buffer is left alone on a swallowed submit
        assert_eq!(input.buffer, "   \n ");
    }

    #[test]
    fn test_set_text_restores_buffer_with_cursor_at_end() {
        let mut input = InputBox::new();
        input.set_text("kept text".to_string());
        assert_eq!(input.buffer, "kept text");
        assert_eq!(input.cursor_pos, "kept text".len());
    }

    #[test]
    fn test_paste_preserves_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("one\ntwo".to_string()));
        assert_eq!(input.buffer, "one\ntwo");
        assert_eq!(input.calculate_height(80), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_home_and_end_move_within_logical_line() {
        let mut input = InputBox::new();
        type_str(&mut input, "first\nsecond");

        input.handle_event(&TuiEvent::CursorHome);
        assert_eq!(input.cursor_pos, 6); // start of "second"

        input.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(input.cursor_pos, input.buffer.len());
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut input = InputBox::new();
        type_str(&mut input, "abcdef\nabc\nabcdef");
        // Cursor at end of the last line (column 6)
        assert!(input.handle_event(&TuiEvent::CursorUp).is_some());
        // Middle line is shorter; column clamps to its length
        assert_eq!(input.cursor_pos, "abcdef\nabc".len());

        assert!(input.handle_event(&TuiEvent::CursorUp).is_some());
        assert!(input.handle_event(&TuiEvent::CursorUp).is_none()); // top boundary
    }

    #[test]
    fn test_render_shows_title_and_content() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut input = InputBox::new();
        type_str(&mut input, "hi");

        terminal
            .draw(|f| {
                input.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains("Message"));
        assert!(text.contains("hi"));
    }
}
