//! # Application State
//!
//! Core session state for Kaiwa. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── replier: Arc<dyn Replier>     // remote service handle
//! ├── transcript: Transcript        // append-only conversation log
//! ├── model_name: String            // remote model in use
//! ├── awaiting_reply: bool          // a round trip is outstanding
//! ├── status_message: String        // title bar status text
//! ├── theme: ThemeMode              // display mode (cosmetic)
//! └── attachment: Option<PathBuf>   // picked file, never read or sent
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::transcript::Transcript;
use crate::remote::Replier;

/// Display mode for the interface. Toggling it changes colors and nothing
/// else; no logic reads it outside the theme lookup.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Returns a human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
        }
    }
}

pub struct App {
    pub replier: Arc<dyn Replier>,
    pub transcript: Transcript,
    pub model_name: String,
    /// True between a submission and the arrival of its reply (or error).
    pub awaiting_reply: bool,
    pub status_message: String,
    pub theme: ThemeMode,
    /// Most recently picked attachment. Recorded for display only; the file
    /// is never opened and never leaves the machine.
    pub attachment: Option<PathBuf>,
}

impl App {
    pub fn new(replier: Arc<dyn Replier>, model_name: String, theme: ThemeMode) -> Self {
        Self {
            replier,
            transcript: Transcript::new(),
            model_name,
            awaiting_reply: false,
            status_message: String::new(),
            theme,
            attachment: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.transcript.is_empty());
        assert!(!app.awaiting_reply);
        assert!(app.status_message.is_empty());
        assert!(app.attachment.is_none());
        assert_eq!(app.model_name, "test-model");
    }

    #[test]
    fn test_theme_mode_toggles_between_two_modes() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn test_theme_mode_labels() {
        assert_eq!(ThemeMode::Dark.label(), "Dark");
        assert_eq!(ThemeMode::Light.label(), "Light");
    }
}
