use std::time::Duration;

use env_logger::Env;
use iced::widget::image as iced_image;
use iced::{window, Element, Subscription, Task, Theme};
use log::{error, info};

mod code;
mod error;
mod state;
mod ui;

use code::{LocalDate, QrEncoder};
use error::AppError;
use state::about::AboutLink;
use state::controller::{Controller, Effect, Event};
use state::data::{Screen, ScreenKind};
use state::prefs::Prefs;
use state::settings::Settings;

/// Main application state
struct QrcGenerator {
    /// Owns the screens and the saved text
    controller: Controller<Prefs, LocalDate, QrEncoder>,
    settings: Settings,
    /// GPU handle of the code on screen, tagged with its generation
    texture: Option<(u64, iced_image::Handle)>,
    /// Error shown below the input field
    status: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    DraftChanged(String),
    Save,
    OpenHelp,
    CloseHelp,
    NextHelp,
    PreviousHelp,
    ToggleDrawer,
    /// "Change QR Text" in the side menu
    ChangeText,
    OpenAbout,
    CloseAbout,
    OpenLink(AboutLink),
    /// Window regained focus, or the refresh timer fired
    Resumed,
}

impl From<Message> for Event {
    fn from(message: Message) -> Self {
        match message {
            Message::DraftChanged(text) => Event::DraftEdited(text),
            Message::Save => Event::Save,
            Message::OpenHelp => Event::OpenHelp,
            Message::CloseHelp => Event::CloseHelp,
            Message::NextHelp => Event::NextHelpImage,
            Message::PreviousHelp => Event::PreviousHelpImage,
            Message::ToggleDrawer => Event::ToggleDrawer,
            Message::ChangeText => Event::RequestEdit,
            Message::OpenAbout => Event::OpenAbout,
            Message::CloseAbout => Event::CloseAbout,
            Message::OpenLink(link) => Event::OpenLink(link),
            Message::Resumed => Event::Resumed,
        }
    }
}

impl QrcGenerator {
    fn new(controller: Controller<Prefs, LocalDate, QrEncoder>, settings: Settings) -> Self {
        let mut app = QrcGenerator {
            controller,
            settings,
            texture: None,
            status: None,
        };
        app.sync_texture();
        app
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match self.controller.handle(message.into()) {
            Ok(effect) => {
                if self.controller.screen_kind() == ScreenKind::Display {
                    self.status = None;
                }
                if let Some(Effect::OpenLink(url)) = effect {
                    ui::links::open(url);
                }
            }
            Err(e) => {
                error!("❌ Could not save QR text: {}", e);
                self.status = Some(format!("Could not save: {}", e));
            }
        }

        self.sync_texture();
        Task::none()
    }

    /// Convert a newly encoded code into an image handle, once per generation
    fn sync_texture(&mut self) {
        let Some(code) = self.controller.code() else {
            self.texture = None;
            return;
        };
        if matches!(&self.texture, Some((generation, _)) if *generation == code.generation) {
            return;
        }

        self.texture = code.bitmap().map(|bitmap| {
            let handle = iced_image::Handle::from_rgba(
                bitmap.side(),
                bitmap.side(),
                bitmap.as_rgba().to_vec(),
            );
            (code.generation, handle)
        });
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match self.controller.screen() {
            Screen::Input(input) => ui::input::view(input, self.status.as_deref()),
            Screen::Display(display) => ui::display::view(
                display,
                self.texture.as_ref().map(|(_, handle)| handle),
                self.settings.preview_size,
            ),
        }
    }

    /// Resume notifications, only while the code is on screen
    fn subscription(&self) -> Subscription<Message> {
        if !self.controller.wants_resume_notifications() {
            return Subscription::none();
        }

        let focus = iced::event::listen_with(|event, _status, _window| match event {
            iced::Event::Window(window::Event::Focused) => Some(Message::Resumed),
            _ => None,
        });

        if self.settings.refresh_interval_secs == 0 {
            return focus;
        }

        let tick = iced::time::every(Duration::from_secs(self.settings.refresh_interval_secs))
            .map(|_| Message::Resumed);

        Subscription::batch([focus, tick])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    info!("🎨 {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let settings = Settings::load();
    let prefs = Prefs::open_default()?;
    if let Some(path) = prefs.path() {
        info!("📁 Preferences at: {}", path.display());
    }
    let controller = Controller::new(prefs, LocalDate, QrEncoder, &settings)?;
    let app = QrcGenerator::new(controller, settings);

    iced::application("QRC Generator PySpider", QrcGenerator::update, QrcGenerator::view)
        .subscription(QrcGenerator::subscription)
        .theme(QrcGenerator::theme)
        .window_size((480.0, 760.0))
        .centered()
        .run_with(move || (app, Task::none()))?;

    Ok(())
}
