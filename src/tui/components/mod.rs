//! # TUI Components
//!
//! Components follow two patterns:
//!
//! **Stateless (props-based)**: created fresh each frame with the data
//! they render: [`TitleBar`], [`Bubble`].
//!
//! **Stateful (event-driven)**: persistent state in `TuiState`, wrapped
//! by a transient view each frame: [`InputBox`], the transcript view, the
//! attach picker overlay.
//!
//! Components compose: the transcript view renders one [`Bubble`] per
//! message. There is no inheritance anywhere; parents construct children
//! with explicit props, which keeps every dependency visible and every
//! component testable with ratatui's `TestBackend`.

pub mod attach_picker;
pub mod bubble;
pub mod input_box;
pub mod title_bar;
pub mod transcript_view;

pub use attach_picker::{AttachPicker, AttachPickerState, PickerEvent};
pub use bubble::Bubble;
pub use input_box::{InputBox, InputEvent};
pub use title_bar::TitleBar;
pub use transcript_view::{TranscriptView, TranscriptViewState};
