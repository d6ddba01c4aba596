//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Waiting on a reply**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! ## Exchange flow
//!
//! `Effect::CallRemote` snapshots the transcript and spawns the remote
//! call on the async runtime; completion comes back over an mpsc channel
//! as `Action::ReplyArrived` and is applied by the reducer on this thread.
//! Submissions while a reply is outstanding are rejected by the reducer,
//! so the transcript alternates strictly and the snapshot can never race
//! a concurrent append.

mod component;
mod components;
mod event;
mod theme;
mod ui;

pub use component::{Component, EventHandler};
pub use theme::Theme;

use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::remote::{GeminiReplier, Replier};
use crate::tui::components::{
    AttachPickerState, InputBox, InputEvent, PickerEvent, TranscriptViewState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core session logic)
pub struct TuiState {
    pub transcript_view: TranscriptViewState,
    pub input_box: InputBox,
    /// Attach picker overlay (None = hidden)
    pub attach_picker: Option<AttachPickerState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            transcript_view: TranscriptViewState::new(),
            input_box: InputBox::new(),
            attach_picker: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the production replier from the resolved config.
pub fn build_replier(config: &ResolvedConfig) -> Arc<dyn Replier> {
    Arc::new(GeminiReplier::new(
        config.api_key.clone(),
        Some(config.base_url.clone()),
    ))
}

pub fn run(config: &ResolvedConfig) -> std::io::Result<()> {
    let replier = build_replier(config);
    let mut app = App::new(replier, config.model_name.clone(), config.theme);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel delivering completed exchanges back from the async runtime
    let (tx, rx) = mpsc::channel();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // The spinner animates while a reply is outstanding
        let animating = app.awaiting_reply;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Ctrl+T flips the display mode
            if matches!(event, TuiEvent::ToggleTheme) {
                update(&mut app, Action::ToggleTheme);
                continue;
            }

            // Ctrl+F opens the attach picker over the working directory
            if matches!(event, TuiEvent::OpenAttachPicker) {
                let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                tui.attach_picker = Some(AttachPickerState::for_dir(&dir));
                continue;
            }

            // When the picker is open, it owns all events
            if let Some(ref mut picker) = tui.attach_picker {
                match picker.handle_event(&event) {
                    Some(PickerEvent::Pick(path)) => {
                        update(&mut app, Action::FileAttached(path));
                        tui.attach_picker = None;
                    }
                    Some(PickerEvent::Dismiss) => {
                        tui.attach_picker = None;
                    }
                    None => {}
                }
                continue;
            }

            // Scroll events always go to the transcript view
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
                    | TuiEvent::ScrollToBottom
            ) {
                tui.transcript_view.handle_event(&event);
                continue;
            }

            // The input box handles everything else
            if let Some(input_event) = tui.input_box.handle_event(&event) {
                match input_event {
                    InputEvent::Submit(text) => {
                        // The box clears itself on submit; keep a copy so a
                        // rejected submission isn't lost.
                        let rejected = app.awaiting_reply.then(|| text.clone());
                        let effect = update(&mut app, Action::Submit(text));
                        if effect == Effect::CallRemote {
                            spawn_exchange(&app, tx.clone());
                        } else if let Some(text) = rejected {
                            tui.input_box.set_text(text);
                        }
                    }
                    InputEvent::ContentChanged => {}
                }
            }
        }

        if should_quit {
            break;
        }

        // Apply completed exchanges from the async runtime
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            match effect {
                Effect::Quit => should_quit = true,
                Effect::CallRemote => spawn_exchange(&app, tx.clone()),
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Snapshot the transcript and dispatch one remote round trip. The result
/// comes back to the event loop as `Action::ReplyArrived`.
fn spawn_exchange(app: &App, tx: mpsc::Sender<Action>) {
    info!("Dispatching exchange to {}", app.replier.name());

    let replier = app.replier.clone();
    let transcript = app.transcript.clone();
    let model = app.model_name.clone();

    tokio::spawn(async move {
        let result = replier.reply(&transcript, &model).await;
        if tx.send(Action::ReplyArrived(result)).is_err() {
            warn!("Failed to deliver reply: receiver dropped");
        }
    });
}
