//! # TranscriptView Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display the transcript as left/right aligned bubbles
//! - Manage scrolling (stick-to-bottom auto-scroll, re-pin, clamping)
//! - Cache bubble heights so layout never re-renders to measure
//! - Show the waiting spinner while a reply is outstanding
//!
//! ## Architecture
//!
//! `TranscriptView` is a transient component (created each frame) that
//! wraps `&mut TranscriptViewState` (persistent state) and the transcript
//! (props). Since `Component::render` takes `&mut self`, the layout cache
//! and scroll state can be updated during the render pass, aligning with
//! Ratatui's `StatefulWidget` pattern.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::bubble::Bubble;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Rows reserved below the last bubble for the waiting spinner.
const SPINNER_ROWS: u16 = 1;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Layout and scroll state for the transcript view.
/// Must be persisted in the parent TuiState.
pub struct TranscriptViewState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// True when content exists below the current scroll position
    pub has_unseen_content: bool,
}

impl Default for TranscriptViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
            has_unseen_content: false,
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    /// Prevents overscrolling past the last bubble.
    pub fn clamp_scroll(&mut self) {
        let total: u16 = self.layout.heights.iter().sum();
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the
    /// bottom. Called on scroll-down events so that scrolling past the end
    /// re-pins to bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let total: u16 = self.layout.heights.iter().sum();
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// EventHandler is implemented on `TranscriptViewState` rather than
/// `TranscriptView` because event handling needs the persistent scroll
/// state, while the view itself is recreated each frame.
impl EventHandler for TranscriptViewState {
    type Event = (); // Scrolling is handled internally

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                None
            }
            _ => None,
        }
    }
}

/// Scrollable conversation view.
/// Created fresh each frame with references to state and data.
pub struct TranscriptView<'a> {
    pub state: &'a mut TranscriptViewState,
    pub transcript: &'a Transcript,
    pub theme: &'a Theme,
    pub awaiting_reply: bool,
    pub spinner_frame: usize,
}

impl<'a> TranscriptView<'a> {
    pub fn new(
        state: &'a mut TranscriptViewState,
        transcript: &'a Transcript,
        theme: &'a Theme,
        awaiting_reply: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            theme,
            awaiting_reply,
            spinner_frame,
        }
    }
}

impl<'a> Component for TranscriptView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let messages = self.transcript.messages();

        // 1. Update the layout cache. Messages are immutable once appended,
        // so cached heights stay valid until the width changes.
        let reusable = self.state.layout.reusable_count(messages.len(), content_width);
        self.state.layout.heights.truncate(reusable);
        for message in messages.iter().skip(self.state.layout.heights.len()) {
            self.state
                .layout
                .heights
                .push(Bubble::calculate_height(message, content_width));
        }
        self.state.layout.rebuild_prefix_heights();
        self.state.layout.update_metadata(messages.len(), content_width);

        let total_height: u16 = self.state.layout.heights.iter().sum();
        let canvas_height = if self.awaiting_reply {
            total_height + SPINNER_ROWS
        } else {
            total_height
        };

        // 2. Clamp scroll offset to prevent overscrolling past content.
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render the visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible.start > 0 {
            self.state.layout.prefix_heights[visible.start - 1]
        } else {
            0
        };

        for i in visible {
            let height = self.state.layout.heights[i];
            let row = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Bubble::new(&messages[i], self.theme), row);
            y_offset += height;
        }

        // 4. Waiting indicator: one spinner row where the reply will appear
        // (the assistant side), visible exactly while the call is outstanding.
        if self.awaiting_reply {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            let line = Paragraph::new(Line::from(format!("{spinner} thinking")))
                .style(self.theme.spinner)
                .alignment(Alignment::Right);
            let row = Rect::new(0, total_height, content_width, SPINNER_ROWS);
            scroll_view.render_widget(line, row);
        }

        // Auto-scroll: stay pinned to the bottom unless the user scrolled up.
        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // 5. Unseen-content marker for the title bar
        let current_offset = self.state.scroll_state.offset().y;
        self.state.has_unseen_content = canvas_height > area.height
            && current_offset < canvas_height.saturating_sub(area.height);
    }
}

/// Cached layout measurements. Bubbles are append-only and immutable, so
/// the cache only invalidates on width change or transcript reset.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights are still valid.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        // Fewer messages than cached would mean the transcript was replaced
        if message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc += h;
                Some(*acc)
            })
            .collect();
    }

    /// Which message indices can intersect the viewport, with half a
    /// viewport of slack either side.
    pub fn visible_range(
        &self,
        scroll_offset: u16,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
