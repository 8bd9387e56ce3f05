//! Application controller
//!
//! Two screens, one authority:
//! - `Input`: no identifier yet, or the user asked to change it
//! - `Display`: identifier saved, code for today shown
//!
//! All mutations go through `handle` (or the named operations it calls),
//! one event at a time. The only durable side effect is the store write on
//! a successful save.

use log::{debug, info, warn};

use super::about::AboutLink;
use super::data::{DisplayScreenState, GeneratedCode, InputScreenState, Screen, ScreenKind};
use super::help::HelpCarousel;
use super::prefs::{Store, StoreError, QR_TEXT_KEY};
use super::settings::Settings;
use crate::code::content::iso_date;
use crate::code::{CodeFormatter, DateProvider, EncodingError, SquareImage, SymbolEncoder};

/// Discrete UI and lifecycle events
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The input field changed
    DraftEdited(String),
    /// Save the current draft
    Save,
    OpenHelp,
    CloseHelp,
    NextHelpImage,
    PreviousHelpImage,
    ToggleDrawer,
    /// "Change QR Text" menu action
    RequestEdit,
    OpenAbout,
    CloseAbout,
    OpenLink(AboutLink),
    /// The application came back to the foreground
    Resumed,
}

/// Side effects the shell has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenLink(&'static str),
}

/// Result of a save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Identifier stored, now showing the code
    Saved,
    /// Empty or whitespace-only text; nothing changed
    BlankRejected,
    /// Not on the input screen
    Ignored,
}

pub struct Controller<S, D, E> {
    store: S,
    dates: D,
    encoder: E,
    formatter: CodeFormatter,
    code_size: u32,
    stored_identifier: Option<String>,
    screen: Screen,
    generation: u64,
}

impl<S, D, E> Controller<S, D, E>
where
    S: Store,
    D: DateProvider,
    E: SymbolEncoder,
{
    /// Load the stored identifier and pick the initial screen
    pub fn new(store: S, dates: D, encoder: E, settings: &Settings) -> Result<Self, StoreError> {
        let stored_identifier = store.get(QR_TEXT_KEY)?;

        let mut controller = Controller {
            store,
            dates,
            encoder,
            formatter: CodeFormatter::new(settings.role_tag.clone()),
            code_size: settings.code_size,
            stored_identifier,
            screen: Screen::Input(InputScreenState::default()),
            generation: 0,
        };

        info!("🏷️  Role tag: {}", controller.formatter.role_tag());
        if controller.stored_identifier.is_some() {
            controller.enter_display();
        } else {
            info!("✏️  No saved text, starting on the input screen");
        }

        Ok(controller)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn stored_identifier(&self) -> Option<&str> {
        self.stored_identifier.as_deref()
    }

    /// The code currently shown, `None` on the input screen
    pub fn code(&self) -> Option<&GeneratedCode> {
        match &self.screen {
            Screen::Display(display) => Some(&display.code),
            Screen::Input(_) => None,
        }
    }

    /// Resume notifications matter only while the code is visible
    pub fn wants_resume_notifications(&self) -> bool {
        self.screen_kind() == ScreenKind::Display
    }

    /// Apply one event
    pub fn handle(&mut self, event: Event) -> Result<Option<Effect>, StoreError> {
        // Screen transitions first, local toggles below
        match event {
            Event::Save => {
                if let Screen::Input(input) = &self.screen {
                    let draft = input.draft_text.clone();
                    self.save(&draft)?;
                    return Ok(None);
                }
            }
            Event::RequestEdit if self.screen_kind() == ScreenKind::Display => {
                self.request_edit();
                return Ok(None);
            }
            Event::Resumed if self.screen_kind() == ScreenKind::Display => {
                self.recompute();
                return Ok(None);
            }
            _ => {}
        }

        match (&mut self.screen, event) {
            (Screen::Input(input), Event::DraftEdited(text)) => {
                input.draft_text = text;
            }
            (Screen::Input(input), Event::OpenHelp) => {
                input.help = Some(HelpCarousel::new());
            }
            (Screen::Input(input), Event::CloseHelp) => {
                input.help = None;
            }
            (Screen::Input(input), Event::NextHelpImage) => {
                if let Some(help) = input.help.as_mut() {
                    help.next();
                }
            }
            (Screen::Input(input), Event::PreviousHelpImage) => {
                if let Some(help) = input.help.as_mut() {
                    help.previous();
                }
            }
            (Screen::Display(display), Event::ToggleDrawer) => {
                display.drawer_open = !display.drawer_open;
            }
            (Screen::Display(display), Event::OpenAbout) => {
                display.about_dialog_visible = true;
            }
            (Screen::Display(display), Event::CloseAbout) => {
                display.about_dialog_visible = false;
            }
            (Screen::Display(display), Event::OpenLink(link)) if display.about_dialog_visible => {
                debug!("🔗 Opening {}", link.url());
                return Ok(Some(Effect::OpenLink(link.url())));
            }
            (screen, event) => {
                debug!("Ignoring {:?} on the {:?} screen", event, screen.kind());
            }
        }
        Ok(None)
    }

    /// Store `text` and switch to the code screen.
    ///
    /// Blank text is rejected without touching anything. A failed store
    /// write is returned and leaves the controller where it was.
    pub fn save(&mut self, text: &str) -> Result<SaveOutcome, StoreError> {
        if self.screen_kind() != ScreenKind::Input {
            debug!("Save ignored outside the input screen");
            return Ok(SaveOutcome::Ignored);
        }
        if text.trim().is_empty() {
            info!("✋ Blank text rejected");
            return Ok(SaveOutcome::BlankRejected);
        }

        self.store.set(QR_TEXT_KEY, text)?;
        self.stored_identifier = Some(text.to_string());
        info!("💾 Saved QR text");

        self.enter_display();
        Ok(SaveOutcome::Saved)
    }

    /// Go back to the input screen with the stored text pre-filled.
    /// The stored identifier itself is kept.
    pub fn request_edit(&mut self) {
        if self.screen_kind() != ScreenKind::Display {
            return;
        }
        let draft = self.stored_identifier.clone().unwrap_or_default();
        self.screen = Screen::Input(InputScreenState::new(draft));
        info!("✏️  Editing QR text");
    }

    /// Rebuild the code for today's date.
    ///
    /// Returns true if a new symbol was encoded. Calling it again on the
    /// same day is a no-op.
    pub fn recompute(&mut self) -> bool {
        let Screen::Display(display) = &self.screen else {
            return false;
        };
        let Some(identifier) = self.stored_identifier() else {
            return false;
        };

        let date = self.dates.today();
        let payload = self.formatter.format(identifier, &iso_date(date));
        if payload == display.code.payload {
            debug!("Code still current for {}", iso_date(date));
            return false;
        }

        let symbol = self.encode(&payload);
        self.generation += 1;
        let code = GeneratedCode {
            payload,
            date,
            symbol,
            generation: self.generation,
        };
        info!("🔄 Code refreshed for {}", iso_date(date));

        if let Screen::Display(display) = &mut self.screen {
            display.code = code;
        }
        true
    }

    fn enter_display(&mut self) {
        let Some(identifier) = self.stored_identifier() else {
            return;
        };

        let date = self.dates.today();
        let payload = self.formatter.format(identifier, &iso_date(date));
        let symbol = self.encode(&payload);
        self.generation += 1;

        self.screen = Screen::Display(DisplayScreenState::new(GeneratedCode {
            payload,
            date,
            symbol,
            generation: self.generation,
        }));
        info!("🔳 Showing code for {}", iso_date(date));
    }

    fn encode(&self, payload: &str) -> Result<SquareImage, EncodingError> {
        debug!("Encoding payload {:?}", payload);
        let symbol = self.encoder.encode(payload, self.code_size, self.code_size);
        if let Err(e) = &symbol {
            warn!("⚠️  Could not generate QR code: {}", e);
        }
        symbol
    }
}

impl<S, D, E> std::fmt::Debug for Controller<S, D, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("screen", &self.screen)
            .field("generation", &self.generation)
            .finish()
    }
}
