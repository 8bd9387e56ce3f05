//! State management module
//!
//! This module handles all application state, including:
//! - The screen state machine (controller.rs)
//! - Screen records and the generated code (data.rs)
//! - Help carousel (help.rs) and About dialog contents (about.rs)
//! - Persisted preferences in SQLite (prefs.rs)
//! - User settings stored as JSON (settings.rs)

pub mod about;
pub mod controller;
pub mod data;
pub mod help;
pub mod prefs;
pub mod settings;
