//! # Actions
//!
//! Everything that can happen in Kaiwa becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The API answers? That's `Action::ReplyArrived(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the `Effect` the caller must perform. I/O happens
//! elsewhere (the TUI adapter spawns the remote call and feeds the result
//! back in as another action).
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```
//!
//! A full exchange is the `Submit`/`ReplyArrived` pair: `Submit` appends
//! the user message and asks for the remote call, `ReplyArrived` appends
//! exactly one assistant message: the reply text, or a plain-text
//! rendering of the failure. That pairing keeps the transcript strictly
//! alternating: while a reply is outstanding, further submissions are
//! rejected with a status notice rather than queued or raced.

use std::path::PathBuf;

use crate::core::state::App;
use crate::remote::RemoteError;

/// Everything that can happen in the application.
#[derive(Debug)]
pub enum Action {
    /// The user submitted text from the input box.
    Submit(String),
    /// The remote round trip finished, successfully or not.
    ReplyArrived(Result<String, RemoteError>),
    /// Flip the display mode (cosmetic only).
    ToggleTheme,
    /// The user picked a file in the attach overlay. The path is recorded
    /// and shown; the file is never read or transmitted.
    FileAttached(PathBuf),
    Quit,
}

/// I/O the caller must perform after a reducer step.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Snapshot the transcript and dispatch the remote call.
    CallRemote,
    Quit,
}

/// Status line shown while a round trip is outstanding.
const STATUS_WAITING: &str = "Waiting for a reply...";
/// Status line shown when a submission is rejected mid-round-trip.
const STATUS_BUSY: &str = "Still waiting for a reply";

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let trimmed = text.trim();
            // Empty or whitespace-only input is a silent no-op, not an error.
            if trimmed.is_empty() {
                return Effect::None;
            }
            if app.awaiting_reply {
                app.status_message = STATUS_BUSY.to_string();
                return Effect::None;
            }
            app.transcript.push_user(trimmed);
            app.awaiting_reply = true;
            app.status_message = STATUS_WAITING.to_string();
            Effect::CallRemote
        }
        Action::ReplyArrived(result) => {
            let text = match result {
                Ok(reply) => reply,
                Err(e) => {
                    log::warn!("Remote call failed: {}", e);
                    format!("An error occurred: {e}")
                }
            };
            app.transcript.push_assistant(text);
            app.awaiting_reply = false;
            app.status_message.clear();
            Effect::None
        }
        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            app.status_message = format!("Theme: {}", app.theme.label());
            Effect::None
        }
        Action::FileAttached(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            app.status_message = format!("Attached: {name} (not sent)");
            app.attachment = Some(path);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Author;
    use crate::test_support::test_app;

    #[test]
    fn test_submit_appends_user_message_and_requests_call() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("Hello".to_string()));

        assert_eq!(effect, Effect::CallRemote);
        assert_eq!(app.transcript.len(), 1);
        let msg = app.transcript.last().unwrap();
        assert_eq!(msg.author, Author::User);
        assert_eq!(msg.text, "Hello");
        assert!(app.awaiting_reply);
        assert_eq!(app.status_message, STATUS_WAITING);
    }

    #[test]
    fn test_submit_trims_input() {
        let mut app = test_app();
        update(&mut app, Action::Submit("  Hello  \n".to_string()));
        assert_eq!(app.transcript.last().unwrap().text, "Hello");
    }

    #[test]
    fn test_submit_empty_input_is_a_no_op() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit(String::new()));

        assert_eq!(effect, Effect::None);
        assert!(app.transcript.is_empty());
        assert!(!app.awaiting_reply);
    }

    #[test]
    fn test_submit_whitespace_only_input_is_a_no_op() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("   \n\t  ".to_string()));

        assert_eq!(effect, Effect::None);
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn test_submit_while_awaiting_is_rejected() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));

        // Second submission before the reply lands: transcript untouched,
        // no second call requested.
        let effect = update(&mut app, Action::Submit("second".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript.len(), 1);
        assert_eq!(app.status_message, STATUS_BUSY);
        assert!(app.awaiting_reply);
    }

    #[test]
    fn test_reply_appends_assistant_message() {
        let mut app = test_app();
        update(&mut app, Action::Submit("Hello".to_string()));
        let effect = update(&mut app, Action::ReplyArrived(Ok("Hi there".to_string())));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript.len(), 2);
        let msgs = app.transcript.messages();
        assert_eq!(msgs[0].author, Author::User);
        assert_eq!(msgs[0].text, "Hello");
        assert_eq!(msgs[1].author, Author::Assistant);
        assert_eq!(msgs[1].text, "Hi there");
        assert!(!app.awaiting_reply);
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn test_failed_reply_appends_error_text() {
        let mut app = test_app();
        update(&mut app, Action::Submit("Test".to_string()));
        update(
            &mut app,
            Action::ReplyArrived(Err(RemoteError::Api {
                status: 429,
                message: "quota exceeded".to_string(),
            })),
        );

        assert_eq!(app.transcript.len(), 2);
        let msg = app.transcript.last().unwrap();
        assert_eq!(msg.author, Author::Assistant);
        assert!(msg.text.contains("quota exceeded"));
        // The indicator ends hidden even on failure.
        assert!(!app.awaiting_reply);
    }

    #[test]
    fn test_replayed_exchanges_keep_submission_order() {
        let mut app = test_app();
        let n = 5;
        for i in 0..n {
            update(&mut app, Action::Submit(format!("question {i}")));
            update(&mut app, Action::ReplyArrived(Ok(format!("answer {i}"))));
        }

        assert_eq!(app.transcript.len(), 2 * n);
        for (i, pair) in app.transcript.messages().chunks(2).enumerate() {
            assert_eq!(pair[0].author, Author::User);
            assert_eq!(pair[0].text, format!("question {i}"));
            assert_eq!(pair[1].author, Author::Assistant);
            assert_eq!(pair[1].text, format!("answer {i}"));
        }
    }

    #[test]
    fn test_toggle_theme_flips_mode_only() {
        use crate::core::state::ThemeMode;

        let mut app = test_app();
        update(&mut app, Action::Submit("Hello".to_string()));
        let before = app.transcript.len();

        let effect = update(&mut app, Action::ToggleTheme);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.theme, ThemeMode::Light);
        assert_eq!(app.transcript.len(), before);

        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_file_attached_records_path_without_side_effects() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::FileAttached(PathBuf::from("/tmp/notes.txt")),
        );

        assert_eq!(effect, Effect::None);
        assert_eq!(app.attachment.as_deref(), Some(std::path::Path::new("/tmp/notes.txt")));
        assert!(app.status_message.contains("notes.txt"));
        assert!(app.status_message.contains("not sent"));
        // The transcript and the remote seam are untouched.
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn test_quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
