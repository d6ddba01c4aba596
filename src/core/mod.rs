//! # Core Application Logic
//!
//! This module contains Kaiwa's session logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Transcript (log)     │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │   remote   │
//!           │  Adapter   │              │   (seam)   │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`transcript`]: The append-only conversation log
//! - [`state`]: The `App` struct — all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Startup configuration, built once and read-only after

pub mod action;
pub mod config;
pub mod state;
pub mod transcript;
