//! Screen records owned by the controller
//!
//! Each screen carries its own ephemeral state. Switching screens builds a
//! fresh record and drops the old one, so dialogs, drawer and carousel
//! position never leak across a transition.

use chrono::NaiveDate;

use super::help::HelpCarousel;
use crate::code::{EncodingError, SquareImage};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Input,
    Display,
}

/// The current screen together with its local state
#[derive(Debug)]
pub enum Screen {
    Input(InputScreenState),
    Display(DisplayScreenState),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Input(_) => ScreenKind::Input,
            Screen::Display(_) => ScreenKind::Display,
        }
    }
}

/// Local state of the input screen
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputScreenState {
    /// Text in the field, pre-filled with the stored identifier on re-edit
    pub draft_text: String,
    /// Open help carousel, `None` while the help dialog is hidden
    pub help: Option<HelpCarousel>,
}

impl InputScreenState {
    pub fn new(draft_text: impl Into<String>) -> Self {
        Self {
            draft_text: draft_text.into(),
            help: None,
        }
    }

    #[cfg(test)]
    pub fn help_dialog_visible(&self) -> bool {
        self.help.is_some()
    }
}

/// Local state of the code display screen
#[derive(Debug)]
pub struct DisplayScreenState {
    pub drawer_open: bool,
    pub about_dialog_visible: bool,
    /// Code for the date of the last recompute
    pub code: GeneratedCode,
}

impl DisplayScreenState {
    pub fn new(code: GeneratedCode) -> Self {
        Self {
            drawer_open: false,
            about_dialog_visible: false,
            code,
        }
    }
}

/// Payload and its encoded symbol
#[derive(Debug)]
pub struct GeneratedCode {
    /// `identifier/YYYY-MM-DD/role`
    pub payload: String,
    /// Date embedded in the payload
    pub date: NaiveDate,
    /// Encoded bitmap, or why encoding failed
    pub symbol: Result<SquareImage, EncodingError>,
    /// Increases every time a new symbol is encoded
    pub generation: u64,
}

impl GeneratedCode {
    /// The bitmap, absent when encoding failed
    pub fn bitmap(&self) -> Option<&SquareImage> {
        self.symbol.as_ref().ok()
    }

    pub fn error(&self) -> Option<&EncodingError> {
        self.symbol.as_ref().err()
    }
}
