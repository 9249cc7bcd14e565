//! Shared test utilities for the Asset Forge workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never published.
//!
//! - [`prompt`] — [`prompt::ScriptedPrompt`], a recording double for the
//!   reconciler's decision and type-assumption callbacks
//! - [`project`] — temp-dir project and store builders

pub mod project;
pub mod prompt;

pub use project::{temp_store, test_project};
pub use prompt::{CallLog, PromptCall, ScriptedPrompt};
