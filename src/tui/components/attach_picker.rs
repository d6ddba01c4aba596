//! # Attach Picker Component
//!
//! Centered overlay for picking a file to "attach" to the conversation.
//! Opened with Ctrl+F, dismissed with Esc.
//!
//! Picking is deliberately inert: the selection is recorded in session
//! state and echoed in the status line, but the file is never opened and
//! never transmitted.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `AttachPickerState` lives in `TuiState` while the overlay is open
//! - `AttachPicker` is created each frame with borrowed state

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Persistent state for the attach picker overlay.
pub struct AttachPickerState {
    pub entries: Vec<PathBuf>,
    pub selected: usize,
    pub list_state: ListState,
}

impl AttachPickerState {
    /// Build a picker over the files of the given directory (sorted by
    /// name, directories excluded). Unreadable directories yield an empty
    /// picker rather than an error.
    pub fn for_dir(dir: &std::path::Path) -> Self {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
            .map(|rd| {
                rd.filter_map(|res| res.ok())
                    .map(|e| e.path())
                    .filter(|p| p.is_file())
                    .collect()
            })
            .unwrap_or_default();
        entries.sort();
        Self::new(entries)
    }

    pub fn new(entries: Vec<PathBuf>) -> Self {
        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            entries,
            selected: 0,
            list_state,
        }
    }

    /// Handle a key event, returning a PickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.entries.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1).min(self.entries.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .entries
                .get(self.selected)
                .map(|path| PickerEvent::Pick(path.clone())),
            _ => None,
        }
    }
}

/// Events emitted by the attach picker.
#[derive(Debug, PartialEq, Eq)]
pub enum PickerEvent {
    Pick(PathBuf),
    Dismiss,
}

/// Transient render wrapper for the attach picker overlay.
pub struct AttachPicker<'a> {
    state: &'a mut AttachPickerState,
    theme: &'a Theme,
}

impl<'a> AttachPicker<'a> {
    pub fn new(state: &'a mut AttachPickerState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Center the overlay and clear whatever is underneath
        let overlay = centered_rect(60, 60, area);
        frame.render_widget(Clear, overlay);

        let help_text = " Enter Attach  Esc Back ";
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.overlay_border)
            .title(" Attach a file ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.state.entries.is_empty() {
            let empty = Paragraph::new("No files here.")
                .style(self.theme.hint)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let style = if i == self.state.selected {
                    self.theme.overlay_selected
                } else {
                    self.theme.overlay_item
                };
                ListItem::new(Line::styled(name, style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
